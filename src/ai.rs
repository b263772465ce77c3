use crate::battle::{Action, BattleView};
use crate::model::Combatant;
use crate::random::RandomSource;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Drives the player side when nobody is at the keyboard.
pub trait Controller {
    fn choose_action(&mut self, view: &BattleView<'_>, valid_actions: &[Action]) -> Action;
}

/// Uniform choice. With `moves_first` set it only leaves the move list when
/// no move is available, which keeps simulated battles from ending in an
/// early escape.
pub struct RandomController {
    rng: SmallRng,
    moves_first: bool,
}

impl RandomController {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            moves_first: false,
        }
    }

    pub fn attacking(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            moves_first: true,
        }
    }
}

impl Controller for RandomController {
    fn choose_action(&mut self, _view: &BattleView<'_>, valid_actions: &[Action]) -> Action {
        if self.moves_first {
            let moves: Vec<Action> = valid_actions
                .iter()
                .copied()
                .filter(|action| matches!(action, Action::Move(_)))
                .collect();
            if let Some(action) = moves.choose(&mut self.rng) {
                return *action;
            }
        }
        *valid_actions
            .choose(&mut self.rng)
            .unwrap_or(&Action::Move(0))
    }
}

/// The opponent picks uniformly among moves that still have PP.
pub fn choose_enemy_move(combatant: &Combatant, rng: &mut dyn RandomSource) -> Option<usize> {
    let usable = combatant.usable_moves();
    if usable.is_empty() {
        return None;
    }
    Some(usable[rng.pick_index(usable.len())])
}
