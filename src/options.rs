use crate::status::StatusRules;
use crate::types::ChartVariant;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPolicy {
    /// Escape only until the player has fought or switched, or either side
    /// has dealt damage.
    #[default]
    BeforeFirstExchange,
    Always,
}

fn default_catch_rate() -> f64 {
    0.25
}

fn default_max_turns() -> u32 {
    500
}

fn default_max_rejections() -> u32 {
    16
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleOptions {
    #[serde(default)]
    pub status: StatusRules,
    #[serde(default)]
    pub chart: ChartVariant,
    #[serde(default)]
    pub run_policy: RunPolicy,
    #[serde(default = "default_catch_rate")]
    pub catch_rate: f64,
    /// Turn cap for run-to-completion; hitting it ends the battle as quit.
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
    /// Consecutive rejected controller actions before giving up.
    #[serde(default = "default_max_rejections")]
    pub max_rejections: u32,
    /// When the player's active combatant faints, wait for a switch to a
    /// conscious roster member instead of ending the battle as a defeat.
    #[serde(default)]
    pub replace_fainted: bool,
}

impl Default for BattleOptions {
    fn default() -> Self {
        Self {
            status: StatusRules::default(),
            chart: ChartVariant::default(),
            run_policy: RunPolicy::default(),
            catch_rate: default_catch_rate(),
            max_turns: default_max_turns(),
            max_rejections: default_max_rejections(),
            replace_fainted: false,
        }
    }
}
