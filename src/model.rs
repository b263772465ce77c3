use crate::error::{BattleError, ModelError};
use crate::items::Inventory;
use crate::random::RandomSource;
use crate::stats::{apply_stage_multiplier, BaseStats, Stat, StatStages};
use crate::status::{Ailment, StatusCondition, StatusRules};
use crate::types::ElementType;
use serde::{Deserialize, Serialize};

pub const MAX_MOVES: usize = 4;
pub const MAX_TYPES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

fn default_chance() -> f64 {
    1.0
}

fn default_accuracy() -> u32 {
    100
}

fn default_pp() -> u8 {
    10
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub status: Ailment,
    #[serde(default = "default_chance")]
    pub chance: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[serde(rename = "self")]
    User,
    #[default]
    Opponent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatChange {
    pub stat: Stat,
    pub stages: i8,
    #[serde(default)]
    pub target: Target,
}

#[derive(Debug, Clone, Deserialize)]
struct MoveRecord {
    name: String,
    #[serde(rename = "type")]
    element_type: ElementType,
    category: MoveCategory,
    #[serde(default)]
    power: u32,
    #[serde(default = "default_accuracy")]
    accuracy: u32,
    #[serde(default = "default_pp")]
    max_pp: u8,
    #[serde(default)]
    current_pp: Option<u8>,
    #[serde(default)]
    status_effect: Option<StatusEffect>,
    #[serde(default)]
    stat_changes: Vec<StatChange>,
}

/// A move slot. `accuracy == 0` marks a move that never misses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MoveRecord")]
pub struct Move {
    pub name: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    pub category: MoveCategory,
    pub power: u32,
    pub accuracy: u32,
    pub max_pp: u8,
    pub current_pp: u8,
    pub status_effect: Option<StatusEffect>,
    pub stat_changes: Vec<StatChange>,
}

impl TryFrom<MoveRecord> for Move {
    type Error = ModelError;

    fn try_from(record: MoveRecord) -> Result<Self, Self::Error> {
        let mv = Move {
            current_pp: record.current_pp.unwrap_or(record.max_pp),
            name: record.name,
            element_type: record.element_type,
            category: record.category,
            power: record.power,
            accuracy: record.accuracy,
            max_pp: record.max_pp,
            status_effect: record.status_effect,
            stat_changes: record.stat_changes,
        };
        mv.validate()?;
        Ok(mv)
    }
}

impl Move {
    pub fn new(
        name: impl Into<String>,
        element_type: ElementType,
        category: MoveCategory,
        power: u32,
        accuracy: u32,
        max_pp: u8,
    ) -> Self {
        Self {
            name: name.into(),
            element_type,
            category,
            power: if category == MoveCategory::Status { 0 } else { power },
            accuracy,
            max_pp,
            current_pp: max_pp,
            status_effect: None,
            stat_changes: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: Ailment, chance: f64) -> Self {
        self.status_effect = Some(StatusEffect { status, chance });
        self
    }

    pub fn with_stat_change(mut self, stat: Stat, stages: i8, target: Target) -> Self {
        self.stat_changes.push(StatChange {
            stat,
            stages,
            target,
        });
        self
    }

    pub fn has_pp(&self) -> bool {
        self.current_pp > 0
    }

    pub fn is_damaging(&self) -> bool {
        self.category != MoveCategory::Status && self.power > 0
    }

    pub fn restore_pp(&mut self) {
        self.current_pp = self.max_pp;
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.current_pp > self.max_pp {
            return Err(ModelError::PpOutOfRange {
                name: self.name.clone(),
                current: self.current_pp,
                max: self.max_pp,
            });
        }
        if self.category == MoveCategory::Status && self.power > 0 {
            return Err(ModelError::StatusMoveWithPower {
                name: self.name.clone(),
            });
        }
        if let Some(effect) = &self.status_effect {
            if !(0.0..=1.0).contains(&effect.chance) {
                return Err(ModelError::ChanceOutOfRange {
                    name: self.name.clone(),
                    chance: effect.chance,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
struct CombatantRecord {
    name: String,
    #[serde(default)]
    species_id: u32,
    level: u32,
    stats: BaseStats,
    #[serde(default)]
    current_hp: Option<u32>,
    types: Vec<ElementType>,
    #[serde(default)]
    moves: Vec<Move>,
    #[serde(default)]
    stat_stages: StatStages,
    #[serde(default)]
    status: StatusCondition,
    #[serde(default)]
    experience: u32,
    #[serde(default)]
    evolution_level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CombatantRecord")]
pub struct Combatant {
    pub name: String,
    pub species_id: u32,
    pub level: u32,
    pub stats: BaseStats,
    pub current_hp: u32,
    pub types: Vec<ElementType>,
    pub moves: Vec<Move>,
    pub stat_stages: StatStages,
    pub status: StatusCondition,
    pub experience: u32,
    pub evolution_level: u32,
}

impl TryFrom<CombatantRecord> for Combatant {
    type Error = ModelError;

    fn try_from(record: CombatantRecord) -> Result<Self, Self::Error> {
        let combatant = Combatant {
            current_hp: record.current_hp.unwrap_or(record.stats.hp),
            name: record.name,
            species_id: record.species_id,
            level: record.level,
            stats: record.stats,
            types: record.types,
            moves: record.moves,
            stat_stages: record.stat_stages,
            status: record.status,
            experience: record.experience,
            evolution_level: record.evolution_level,
        };
        combatant.validate()?;
        Ok(combatant)
    }
}

impl Combatant {
    /// A fresh combatant at full HP with no status.
    pub fn new(
        name: impl Into<String>,
        species_id: u32,
        level: u32,
        stats: BaseStats,
        types: Vec<ElementType>,
        moves: Vec<Move>,
    ) -> Self {
        Self {
            name: name.into(),
            species_id,
            level,
            current_hp: stats.hp,
            stats,
            types,
            moves,
            stat_stages: StatStages::default(),
            status: StatusCondition::Healthy,
            experience: 0,
            evolution_level: 0,
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        let name = || self.name.clone();
        if self.level == 0 {
            return Err(ModelError::ZeroLevel { name: name() });
        }
        if self.types.is_empty() {
            return Err(ModelError::NoTypes { name: name() });
        }
        if self.types.len() > MAX_TYPES {
            return Err(ModelError::TooManyTypes {
                name: name(),
                count: self.types.len(),
            });
        }
        if self.moves.len() > MAX_MOVES {
            return Err(ModelError::TooManyMoves {
                name: name(),
                count: self.moves.len(),
            });
        }
        if self.stats.has_zero() {
            return Err(ModelError::ZeroStat { name: name() });
        }
        if self.current_hp > self.stats.hp {
            return Err(ModelError::HpOutOfRange {
                name: name(),
                current: self.current_hp,
                max: self.stats.hp,
            });
        }
        if !self.stat_stages.in_range() {
            return Err(ModelError::StageOutOfRange { name: name() });
        }
        self.moves.iter().try_for_each(Move::validate)
    }

    pub fn max_hp(&self) -> u32 {
        self.stats.hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn has_type(&self, element_type: ElementType) -> bool {
        self.types.contains(&element_type)
    }

    /// Subtract HP, stopping at zero. Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.current_hp);
        self.current_hp -= lost;
        lost
    }

    /// Add HP, stopping at max. Returns the HP actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_hp().saturating_sub(self.current_hp));
        self.current_hp += restored;
        restored
    }

    pub fn restore_full(&mut self) -> u32 {
        self.heal(self.max_hp())
    }

    /// Base stat scaled by its current stage. `None` for accuracy and
    /// evasion, which have no base value.
    pub fn effective_stat(&self, stat: Stat) -> Option<u32> {
        self.stats
            .get(stat)
            .map(|base| apply_stage_multiplier(base, self.stat_stages.get(stat)))
    }

    pub fn modify_stage(&mut self, stat: Stat, delta: i8) -> i8 {
        self.stat_stages.apply(stat, delta)
    }

    pub fn reset_stages(&mut self) {
        self.stat_stages.reset();
    }

    pub fn move_at(&self, index: usize) -> Result<&Move, BattleError> {
        self.moves.get(index).ok_or(BattleError::InvalidMoveIndex {
            index,
            available: self.moves.len(),
        })
    }

    /// Slots that still have PP, in order.
    pub fn usable_moves(&self) -> Vec<usize> {
        self.moves
            .iter()
            .enumerate()
            .filter(|(_, mv)| mv.has_pp())
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn restore_all_pp(&mut self) {
        self.moves.iter_mut().for_each(Move::restore_pp);
    }

    /// Statuses never stack: a second one is rejected and the first stays.
    pub fn inflict_status(
        &mut self,
        ailment: Ailment,
        rules: &StatusRules,
        rng: &mut dyn RandomSource,
    ) -> Result<StatusCondition, BattleError> {
        if let Some(current) = self.status.ailment() {
            return Err(BattleError::AlreadyStatusAffected {
                combatant: self.name.clone(),
                current,
            });
        }
        self.status = StatusCondition::begin(ailment, rules, rng);
        Ok(self.status)
    }

    /// Clear `ailment` if it is the current status.
    pub fn cure(&mut self, ailment: Ailment) -> bool {
        if self.status.ailment() == Some(ailment) {
            self.status = StatusCondition::Healthy;
            true
        } else {
            false
        }
    }
}

fn default_bag() -> Inventory {
    Inventory::starter()
}

/// Everything one battle needs from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    pub player: Vec<Combatant>,
    pub opponent: Combatant,
    #[serde(default = "default_bag")]
    pub bag: Inventory,
}

impl Roster {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.player.is_empty() {
            return Err(ModelError::EmptyRoster);
        }
        Ok(())
    }
}
