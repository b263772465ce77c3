//! Between-battle growth. Nothing here runs while a battle is in progress.

use crate::model::Combatant;
use crate::status::StatusCondition;

pub const EXPERIENCE_PER_ENEMY_LEVEL: u32 = 50;
pub const EXPERIENCE_PER_LEVEL: u32 = 100;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ExperienceAward {
    pub gained: u32,
    pub leveled_up: bool,
    pub level: u32,
    pub ready_to_evolve: bool,
}

pub fn experience_for(defeated: &Combatant) -> u32 {
    defeated.level.saturating_mul(EXPERIENCE_PER_ENEMY_LEVEL)
}

pub fn experience_to_next_level(combatant: &Combatant) -> u32 {
    combatant.level.saturating_mul(EXPERIENCE_PER_LEVEL)
}

/// Credit `winner` for beating `defeated`. Reaching the threshold grants
/// one level and discards the rest of the experience.
pub fn award_experience(winner: &mut Combatant, defeated: &Combatant) -> ExperienceAward {
    let gained = experience_for(defeated);
    winner.experience = winner.experience.saturating_add(gained);
    let leveled_up = winner.experience >= experience_to_next_level(winner);
    if leveled_up {
        level_up(winner);
    }
    tracing::debug!(
        name = %winner.name,
        gained,
        level = winner.level,
        leveled_up,
        "experience awarded"
    );
    ExperienceAward {
        gained,
        leveled_up,
        level: winner.level,
        ready_to_evolve: ready_to_evolve(winner),
    }
}

/// +1 level, experience back to 0, every stat up 10% (floored) and HP
/// refilled to the new maximum.
pub fn level_up(combatant: &mut Combatant) {
    combatant.level += 1;
    combatant.experience = 0;
    combatant.stats = combatant.stats.scaled(11, 10);
    combatant.current_hp = combatant.stats.hp;
}

pub fn ready_to_evolve(combatant: &Combatant) -> bool {
    combatant.evolution_level > 0 && combatant.level >= combatant.evolution_level
}

/// Add a beaten or caught opponent to `roster`, fully restored: full HP,
/// full PP, no status and no stat stages. Returns its roster slot.
pub fn recruit(roster: &mut Vec<Combatant>, mut newcomer: Combatant) -> usize {
    newcomer.restore_full();
    newcomer.restore_all_pp();
    newcomer.status = StatusCondition::Healthy;
    newcomer.reset_stages();
    tracing::debug!(name = %newcomer.name, size = roster.len() + 1, "joined the roster");
    roster.push(newcomer);
    roster.len() - 1
}

/// Roster slots whose combatant has reached its evolution level.
pub fn evolution_candidates(roster: &[Combatant]) -> Vec<usize> {
    roster
        .iter()
        .enumerate()
        .filter(|(_, c)| ready_to_evolve(c))
        .map(|(idx, _)| idx)
        .collect()
}
