//! Major status conditions.
//!
//! A combatant carries at most one condition. Sleep is the only one that
//! expires on its own; the rest stay until an item cures them.

use crate::random::RandomSource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A status a move can inflict or an item can cure, without any counters.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ailment {
    Paralysis,
    Burn,
    Poison,
    Freeze,
    Sleep,
}

impl Ailment {
    pub fn describe(self) -> &'static str {
        match self {
            Ailment::Paralysis => "paralyzed",
            Ailment::Burn => "burned",
            Ailment::Poison => "poisoned",
            Ailment::Freeze => "frozen solid",
            Ailment::Sleep => "asleep",
        }
    }
}

impl fmt::Display for Ailment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusCondition {
    #[default]
    #[serde(rename = "none")]
    Healthy,
    Paralyzed,
    Burned,
    Poisoned,
    Frozen,
    Asleep {
        turns_left: u8,
    },
}

impl StatusCondition {
    pub fn ailment(&self) -> Option<Ailment> {
        match self {
            StatusCondition::Healthy => None,
            StatusCondition::Paralyzed => Some(Ailment::Paralysis),
            StatusCondition::Burned => Some(Ailment::Burn),
            StatusCondition::Poisoned => Some(Ailment::Poison),
            StatusCondition::Frozen => Some(Ailment::Freeze),
            StatusCondition::Asleep { .. } => Some(Ailment::Sleep),
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, StatusCondition::Healthy)
    }

    /// Enter a condition. Sleep draws its length here.
    pub fn begin(ailment: Ailment, rules: &StatusRules, rng: &mut dyn RandomSource) -> Self {
        match ailment {
            Ailment::Paralysis => StatusCondition::Paralyzed,
            Ailment::Burn => StatusCondition::Burned,
            Ailment::Poison => StatusCondition::Poisoned,
            Ailment::Freeze => StatusCondition::Frozen,
            Ailment::Sleep => {
                let (lo, hi) = rules.sleep_range();
                let turns = rng.range_inclusive(lo as u32, hi as u32) as u8;
                tracing::trace!(turns, "sleep duration drawn");
                StatusCondition::Asleep { turns_left: turns }
            }
        }
    }
}

/// What the condition allows when its holder is about to act.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ActionGate {
    Act,
    FullyParalyzed,
    Frozen,
    /// The turn is spent sleeping. `woke_up` is set on the last sleeping turn.
    Asleep { woke_up: bool },
}

impl ActionGate {
    pub fn can_act(&self) -> bool {
        matches!(self, ActionGate::Act)
    }
}

/// Check (and advance) a condition right before its holder acts.
pub fn before_action(
    status: &mut StatusCondition,
    rules: &StatusRules,
    rng: &mut dyn RandomSource,
) -> ActionGate {
    match *status {
        StatusCondition::Healthy | StatusCondition::Burned | StatusCondition::Poisoned => {
            ActionGate::Act
        }
        StatusCondition::Paralyzed => {
            if rng.chance(rules.paralysis_chance) {
                ActionGate::FullyParalyzed
            } else {
                ActionGate::Act
            }
        }
        StatusCondition::Frozen => ActionGate::Frozen,
        StatusCondition::Asleep { turns_left: 0 } => {
            *status = StatusCondition::Healthy;
            ActionGate::Act
        }
        StatusCondition::Asleep { turns_left } => {
            let turns_left = turns_left - 1;
            if turns_left == 0 {
                *status = StatusCondition::Healthy;
            } else {
                *status = StatusCondition::Asleep { turns_left };
            }
            ActionGate::Asleep {
                woke_up: turns_left == 0,
            }
        }
    }
}

/// End-of-turn damage for burn and poison: `floor(max_hp / denominator)`.
pub fn residual_damage(
    status: &StatusCondition,
    max_hp: u32,
    rules: &StatusRules,
) -> Option<(Ailment, u32)> {
    match status {
        StatusCondition::Burned => Some((Ailment::Burn, max_hp / rules.burn_denominator.max(1))),
        StatusCondition::Poisoned => {
            Some((Ailment::Poison, max_hp / rules.poison_denominator.max(1)))
        }
        _ => None,
    }
}

fn default_burn_denominator() -> u32 {
    16
}

fn default_poison_denominator() -> u32 {
    8
}

fn default_paralysis_chance() -> f64 {
    0.25
}

fn default_sleep_min() -> u8 {
    2
}

fn default_sleep_max() -> u8 {
    5
}

/// Residual fractions, paralysis odds and sleep length.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusRules {
    #[serde(default = "default_burn_denominator")]
    pub burn_denominator: u32,
    #[serde(default = "default_poison_denominator")]
    pub poison_denominator: u32,
    #[serde(default = "default_paralysis_chance")]
    pub paralysis_chance: f64,
    #[serde(default = "default_sleep_min")]
    pub sleep_min: u8,
    #[serde(default = "default_sleep_max")]
    pub sleep_max: u8,
}

impl StatusRules {
    fn sleep_range(&self) -> (u8, u8) {
        let lo = self.sleep_min.max(1);
        (lo, self.sleep_max.max(lo))
    }
}

impl Default for StatusRules {
    fn default() -> Self {
        Self {
            burn_denominator: default_burn_denominator(),
            poison_denominator: default_poison_denominator(),
            paralysis_chance: default_paralysis_chance(),
            sleep_min: default_sleep_min(),
            sleep_max: default_sleep_max(),
        }
    }
}
