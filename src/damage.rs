use crate::model::{Combatant, Move, MoveCategory};
use crate::stats::Stat;
use crate::types::{Effectiveness, TypeChart};

/// Lowest and highest damage variance, in percent.
pub const MIN_DAMAGE_PERCENT: u32 = 85;
pub const MAX_DAMAGE_PERCENT: u32 = 100;

/// Result of one damage calculation. Applying it is the caller's job.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageRoll {
    pub damage: u32,
    pub effectiveness: Effectiveness,
    pub type_multiplier: f32,
    pub stab: bool,
}

/// Integer part of the formula: `((2 * level / 5 + 2) * power * atk / def) / 50 + 2`.
pub fn base_damage(level: u32, power: u32, attack: u32, defense: u32) -> u32 {
    let level_factor = 2 * level as u64 / 5 + 2;
    let scaled = level_factor * power as u64 * attack as u64 / defense.max(1) as u64;
    (scaled / 50 + 2) as u32
}

fn offense_and_defense(category: MoveCategory) -> Option<(Stat, Stat)> {
    match category {
        MoveCategory::Physical => Some((Stat::Attack, Stat::Defense)),
        MoveCategory::Special => Some((Stat::SpecialAttack, Stat::SpecialDefense)),
        MoveCategory::Status => None,
    }
}

/// `floor(base * stab * type_multiplier * percent / 100)` without float rounding.
///
/// STAB is 3/2 and the type multiplier is counted in quarter steps, which
/// covers every product the shipped charts can produce (0 to 4x).
pub fn apply_modifiers(base: u32, stab: bool, type_multiplier: f32, percent: u32) -> u32 {
    let stab_num: u64 = if stab { 3 } else { 2 };
    let type_quarters = (type_multiplier.max(0.0) * 4.0).round() as u64;
    let percent = percent.clamp(MIN_DAMAGE_PERCENT, MAX_DAMAGE_PERCENT) as u64;
    let scaled = base as u64 * stab_num * type_quarters * percent / (2 * 4 * 100);
    scaled.min(u32::MAX as u64) as u32
}

/// Damage of `mv` from `attacker` to `defender`.
///
/// `percent` is the variance draw in [85, 100]. Status moves and
/// zero-power moves deal nothing. A hit that lands on a non-immune target
/// always deals at least 1.
pub fn compute_damage(
    attacker: &Combatant,
    defender: &Combatant,
    mv: &Move,
    chart: &TypeChart,
    percent: u32,
) -> DamageRoll {
    let type_multiplier = chart.effectiveness(mv.element_type, &defender.types);
    let effectiveness = Effectiveness::from_multiplier(type_multiplier);
    let stab = attacker.has_type(mv.element_type);
    let no_damage = DamageRoll {
        damage: 0,
        effectiveness,
        type_multiplier,
        stab,
    };

    let Some((offense, defense)) = offense_and_defense(mv.category) else {
        return no_damage;
    };
    if mv.power == 0 || type_multiplier == 0.0 {
        return no_damage;
    }

    let attack = attacker.effective_stat(offense).unwrap_or(1);
    let defense = defender.effective_stat(defense).unwrap_or(1);
    let base = base_damage(attacker.level, mv.power, attack, defense);
    DamageRoll {
        damage: apply_modifiers(base, stab, type_multiplier, percent).max(1),
        ..no_damage
    }
}
