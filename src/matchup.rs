use crate::ai::RandomController;
use crate::battle::{Battle, BattleSummary, Outcome};
use crate::error::ModelError;
use crate::model::Roster;
use crate::options::BattleOptions;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Plays one battle with the player side on autopilot.
pub fn simulate_battle(
    roster: &Roster,
    options: &BattleOptions,
    seed: u64,
) -> Result<BattleSummary, ModelError> {
    let mut seeds = SmallRng::seed_from_u64(seed);
    let battle_seed: u64 = seeds.gen();
    let controller_seed: u64 = seeds.gen();
    let mut bag = roster.bag.clone();
    let mut battle = Battle::seeded(
        roster.player.clone(),
        roster.opponent.clone(),
        options.clone(),
        battle_seed,
    )?;
    let mut controller = RandomController::attacking(controller_seed);
    battle.run_to_completion(&mut controller, &mut bag);
    Ok(battle.into_summary())
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MatchupReport {
    pub battles: usize,
    pub victories: usize,
    pub defeats: usize,
    pub escaped: usize,
    pub quits: usize,
}

impl MatchupReport {
    fn record(mut self, outcome: Outcome) -> Self {
        self.battles += 1;
        match outcome {
            Outcome::Victory => self.victories += 1,
            Outcome::Defeat => self.defeats += 1,
            Outcome::Escaped => self.escaped += 1,
            Outcome::Quit => self.quits += 1,
        }
        self
    }

    pub fn win_rate(&self) -> f64 {
        if self.battles == 0 {
            return 0.0;
        }
        self.victories as f64 / self.battles as f64
    }
}

/// Runs `battles` independent seeded battles in parallel. The same seed
/// always gives the same report.
pub fn estimate_win_rate(
    roster: &Roster,
    battles: usize,
    seed: u64,
    options: &BattleOptions,
) -> Result<MatchupReport, ModelError> {
    roster.validate()?;
    let outcomes: Vec<Outcome> = (0..battles)
        .into_par_iter()
        .map(|idx| {
            let battle_seed = seed ^ ((idx as u64) << 32) ^ idx as u64;
            simulate_battle(roster, options, battle_seed).map(|summary| summary.outcome)
        })
        .collect::<Result<_, _>>()?;
    Ok(outcomes
        .into_iter()
        .fold(MatchupReport::default(), MatchupReport::record))
}
