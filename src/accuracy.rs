use crate::model::Move;
use crate::random::RandomSource;
use crate::stats::{accuracy_multiplier, StatStages};

/// Percent threshold a roll in [0, 100) must not exceed, after the user's
/// accuracy stage and the target's evasion stage.
pub fn hit_threshold(accuracy: u32, accuracy_stage: i8, evasion_stage: i8) -> f64 {
    let scaled = accuracy as f64 * accuracy_multiplier(accuracy_stage) as f64
        / accuracy_multiplier(evasion_stage) as f64;
    scaled.clamp(0.0, 100.0)
}

/// Whether `mv` lands. Never-miss moves (accuracy 0) do not draw.
pub fn resolve_hit(
    mv: &Move,
    user: &StatStages,
    target: &StatStages,
    rng: &mut dyn RandomSource,
) -> bool {
    if mv.accuracy == 0 {
        return true;
    }
    let threshold = hit_threshold(mv.accuracy, user.accuracy, target.evasion);
    let roll = rng.accuracy_roll();
    tracing::trace!(move_name = %mv.name, roll, threshold, "accuracy roll");
    roll <= threshold
}
