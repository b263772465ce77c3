use crate::battle::Outcome;
use crate::items::ItemKind;
use crate::stats::Stat;
use crate::status::Ailment;
use crate::types::Effectiveness;
use serde::Serialize;
use serde_json::json;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// Something the presentation layer should show, in order.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BattleEvent {
    TurnStarted {
        turn: u32,
    },
    MoveUsed {
        side: Side,
        user: String,
        move_name: String,
    },
    Missed {
        side: Side,
        user: String,
    },
    Damage {
        side: Side,
        target: String,
        amount: u32,
        remaining_hp: u32,
        max_hp: u32,
    },
    Effectiveness {
        side: Side,
        target: String,
        effectiveness: Effectiveness,
    },
    StatusInflicted {
        side: Side,
        target: String,
        ailment: Ailment,
    },
    StatusFailed {
        side: Side,
        target: String,
        current: Ailment,
    },
    StatChanged {
        side: Side,
        target: String,
        stat: Stat,
        change: i8,
        requested: i8,
    },
    CannotAct {
        side: Side,
        name: String,
        reason: Ailment,
    },
    WokeUp {
        side: Side,
        name: String,
    },
    ResidualDamage {
        side: Side,
        name: String,
        ailment: Ailment,
        amount: u32,
        remaining_hp: u32,
    },
    NoMovesLeft {
        side: Side,
        name: String,
    },
    Fainted {
        side: Side,
        name: String,
    },
    SwitchedOut {
        name: String,
    },
    SentOut {
        side: Side,
        name: String,
    },
    ItemUsed {
        item: ItemKind,
    },
    StatusCured {
        name: String,
        ailment: Ailment,
    },
    Healed {
        name: String,
        amount: u32,
        current_hp: u32,
    },
    ItemHadNoEffect {
        item: ItemKind,
    },
    Caught {
        name: String,
    },
    BrokeFree {
        name: String,
    },
    Escaped,
    BattleEnded {
        outcome: Outcome,
    },
}

fn stage_phrase(change: i8, requested: i8) -> &'static str {
    match change {
        0 if requested > 0 => "won't go any higher",
        0 => "won't go any lower",
        1 => "rose",
        -1 => "fell",
        c if c >= 3 => "rose drastically",
        2 => "rose sharply",
        c if c <= -3 => "severely fell",
        _ => "harshly fell",
    }
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEvent::TurnStarted { turn } => write!(f, "Turn {turn}"),
            BattleEvent::MoveUsed {
                user, move_name, ..
            } => write!(f, "{user} used {move_name}!"),
            BattleEvent::Missed { user, .. } => write!(f, "{user}'s attack missed!"),
            BattleEvent::Damage {
                target,
                amount,
                remaining_hp,
                max_hp,
                ..
            } => write!(
                f,
                "{target} took {amount} damage ({remaining_hp}/{max_hp} HP)"
            ),
            BattleEvent::Effectiveness {
                target,
                effectiveness,
                ..
            } => match effectiveness {
                Effectiveness::SuperEffective => write!(f, "It's super effective!"),
                Effectiveness::NotVeryEffective => write!(f, "It's not very effective..."),
                Effectiveness::NoEffect => write!(f, "It doesn't affect {target}..."),
                Effectiveness::Neutral => Ok(()),
            },
            BattleEvent::StatusInflicted {
                target, ailment, ..
            } => write!(f, "{target} is now {ailment}!"),
            BattleEvent::StatusFailed {
                target, current, ..
            } => write!(f, "{target} is already {current}!"),
            BattleEvent::StatChanged {
                target,
                stat,
                change,
                requested,
                ..
            } => write!(
                f,
                "{target}'s {} {}!",
                stat.label(),
                stage_phrase(*change, *requested)
            ),
            BattleEvent::CannotAct { name, reason, .. } => match reason {
                Ailment::Paralysis => write!(f, "{name} is paralyzed! It can't move!"),
                Ailment::Freeze => write!(f, "{name} is frozen solid!"),
                Ailment::Sleep => write!(f, "{name} is fast asleep."),
                other => write!(f, "{name} is {other} and can't move!"),
            },
            BattleEvent::WokeUp { name, .. } => write!(f, "{name} woke up!"),
            BattleEvent::ResidualDamage {
                name,
                ailment,
                amount,
                ..
            } => match ailment {
                Ailment::Burn => write!(f, "{name} is hurt by its burn! (-{amount} HP)"),
                Ailment::Poison => write!(f, "{name} is hurt by poison! (-{amount} HP)"),
                other => write!(f, "{name} is hurt by being {other}! (-{amount} HP)"),
            },
            BattleEvent::NoMovesLeft { name, .. } => write!(f, "{name} has no moves left!"),
            BattleEvent::Fainted { name, .. } => write!(f, "{name} fainted!"),
            BattleEvent::SwitchedOut { name } => write!(f, "{name}, come back!"),
            BattleEvent::SentOut { side, name } => match side {
                Side::Player => write!(f, "Go! {name}!"),
                Side::Opponent => write!(f, "The opponent sent out {name}!"),
            },
            BattleEvent::ItemUsed { item } => write!(f, "You used a {item}!"),
            BattleEvent::StatusCured { name, ailment } => {
                write!(f, "{name} is no longer {ailment}.")
            }
            BattleEvent::Healed {
                name,
                amount,
                current_hp,
            } => write!(f, "{name} recovered {amount} HP ({current_hp} HP)."),
            BattleEvent::ItemHadNoEffect { item } => write!(f, "The {item} had no effect."),
            BattleEvent::Caught { name } => write!(f, "Gotcha! {name} was caught!"),
            BattleEvent::BrokeFree { name } => write!(f, "Oh no! {name} broke free!"),
            BattleEvent::Escaped => write!(f, "Got away safely!"),
            BattleEvent::BattleEnded { outcome } => write!(f, "Battle over: {outcome}"),
        }
    }
}

/// Ordered record of everything that happened in a battle.
#[derive(Clone, Debug, Default)]
pub struct BattleLog {
    events: Vec<BattleEvent>,
}

impl BattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: BattleEvent) {
        tracing::debug!(%event, "battle event");
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Events recorded at or after `start`.
    pub fn since(&self, start: usize) -> &[BattleEvent] {
        &self.events[start.min(self.events.len())..]
    }

    /// Rendered messages, skipping events with nothing to say.
    pub fn messages(&self) -> Vec<String> {
        self.events
            .iter()
            .map(ToString::to_string)
            .filter(|line| !line.is_empty())
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "events": self.events,
            "log": self.messages(),
        })
    }
}
