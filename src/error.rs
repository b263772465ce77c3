use crate::items::ItemKind;
use crate::status::Ailment;
use thiserror::Error;

/// A rejected battle action. The battle is left exactly as it was and the
/// caller is expected to pick another action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("{combatant} has no PP left for {move_name}")]
    NoPp { combatant: String, move_name: String },
    #[error("move slot {index} is empty ({available} moves known)")]
    InvalidMoveIndex { index: usize, available: usize },
    #[error("cannot switch to roster slot {index}: {reason}")]
    InvalidSwitchTarget { index: usize, reason: &'static str },
    #[error("{combatant} is already {current}")]
    AlreadyStatusAffected { combatant: String, current: Ailment },
    #[error("no {0} left in the bag")]
    ItemUnavailable(ItemKind),
    #[error("can't escape now")]
    RunNotAllowed,
    #[error("the active combatant fainted; choose a replacement first")]
    ReplacementRequired,
    #[error("{combatant} still has a move it can use")]
    MovesRemaining { combatant: String },
    #[error("the battle is already over")]
    BattleOver,
}

/// Malformed data at the loading boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("{name}: level must be at least 1")]
    ZeroLevel { name: String },
    #[error("{name}: a combatant needs at least one type")]
    NoTypes { name: String },
    #[error("{name}: at most two types are allowed, got {count}")]
    TooManyTypes { name: String, count: usize },
    #[error("{name}: at most four moves are allowed, got {count}")]
    TooManyMoves { name: String, count: usize },
    #[error("{name}: current HP {current} exceeds max HP {max}")]
    HpOutOfRange { name: String, current: u32, max: u32 },
    #[error("{name}: base stats must all be positive")]
    ZeroStat { name: String },
    #[error("{name}: stat stages must stay within -6..=6")]
    StageOutOfRange { name: String },
    #[error("move {name}: current PP {current} exceeds max PP {max}")]
    PpOutOfRange { name: String, current: u8, max: u8 },
    #[error("move {name}: effect chance {chance} is outside [0, 1]")]
    ChanceOutOfRange { name: String, chance: f64 },
    #[error("move {name}: status moves have no power")]
    StatusMoveWithPower { name: String },
    #[error("the player roster is empty")]
    EmptyRoster,
    #[error("every combatant in the player roster has fainted")]
    AllFainted,
    #[error("{name} has already fainted")]
    OpponentFainted { name: String },
}
