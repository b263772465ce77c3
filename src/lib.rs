pub mod accuracy;
pub mod ai;
pub mod battle;
pub mod damage;
pub mod error;
pub mod items;
pub mod log;
pub mod matchup;
pub mod model;
pub mod options;
pub mod progression;
pub mod random;
pub mod stats;
pub mod status;
pub mod types;

use crate::battle::Outcome;
use crate::matchup::{estimate_win_rate, simulate_battle};
use crate::model::Roster;
use crate::options::BattleOptions;
use anyhow::Context;
use std::path::{Path, PathBuf};

pub mod prelude {
    pub use crate::ai::{Controller, RandomController};
    pub use crate::battle::{Action, Battle, BattleSummary, Outcome, Phase, TurnReport};
    pub use crate::error::{BattleError, ModelError};
    pub use crate::items::{Inventory, ItemKind};
    pub use crate::log::{BattleEvent, BattleLog, Side};
    pub use crate::model::{Combatant, Move, MoveCategory, Roster, Target};
    pub use crate::options::{BattleOptions, RunPolicy};
    pub use crate::random::{RandomSource, ScriptedRandom};
    pub use crate::stats::{BaseStats, Stat};
    pub use crate::status::{Ailment, StatusCondition};
    pub use crate::types::ElementType;
}

#[derive(Debug, Clone)]
pub enum Command {
    /// Play one battle on autopilot and print its log.
    Battle {
        roster_path: PathBuf,
        config_path: Option<PathBuf>,
        seed: u64,
        json: bool,
    },
    /// Play many battles and print the win rate.
    Simulate {
        roster_path: PathBuf,
        config_path: Option<PathBuf>,
        battles: usize,
        seed: u64,
    },
}

pub fn load_roster(path: &Path) -> anyhow::Result<Roster> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster file at {}", path.display()))?;
    let parsed: Roster = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;
    parsed
        .validate()
        .with_context(|| format!("Invalid roster in {}", path.display()))?;
    Ok(parsed)
}

/// Missing file means defaults; missing fields fall back individually.
pub fn load_options(path: Option<&Path>) -> anyhow::Result<BattleOptions> {
    let Some(path) = path else {
        return Ok(BattleOptions::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Battle {
            roster_path,
            config_path,
            seed,
            json,
        } => {
            let roster = load_roster(&roster_path)?;
            let options = load_options(config_path.as_deref())?;
            let mut summary = simulate_battle(&roster, &options, seed)?;
            tracing::info!(outcome = %summary.outcome, turns = summary.turns, "battle finished");
            let mut recruited = None;
            let mut award = None;
            if summary.outcome == Outcome::Victory {
                award = summary
                    .player
                    .get_mut(summary.active)
                    .map(|winner| progression::award_experience(winner, &summary.opponent));
                let newcomer = summary.opponent.clone();
                recruited = Some(progression::recruit(&mut summary.player, newcomer));
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(());
            }
            for event in &summary.events {
                let line = event.to_string();
                if !line.is_empty() {
                    println!("{line}");
                }
            }
            if let (Some(award), Some(winner)) = (award, summary.player.get(summary.active)) {
                println!("{} gained {} experience!", winner.name, award.gained);
                if award.leveled_up {
                    println!("{} grew to level {}!", winner.name, award.level);
                }
            }
            if let Some(slot) = recruited {
                println!("{} has been added to your roster!", summary.player[slot].name);
                for idx in progression::evolution_candidates(&summary.player) {
                    println!("{} is ready to evolve!", summary.player[idx].name);
                }
            }
            println!("Outcome: {}", summary.outcome);
            Ok(())
        }
        Command::Simulate {
            roster_path,
            config_path,
            battles,
            seed,
        } => {
            if battles == 0 {
                anyhow::bail!("--battles must be > 0");
            }
            let roster = load_roster(&roster_path)?;
            let options = load_options(config_path.as_deref())?;
            let report = estimate_win_rate(&roster, battles, seed, &options)?;
            println!(
                "{} battles: {} victories, {} defeats, {} escaped, {} quit (win rate {:.4})",
                report.battles,
                report.victories,
                report.defeats,
                report.escaped,
                report.quits,
                report.win_rate()
            );
            Ok(())
        }
    }
}
