//! One encounter between the player's roster and a single opponent.
//!
//! Each player decision is one call ([`Battle::use_move`], [`Battle::switch`],
//! [`Battle::use_item`], [`Battle::pass_turn`], [`Battle::run`]). A call either resolves a whole
//! turn (player action, then the opponent's reply) and returns the events it
//! produced, or is rejected with a [`BattleError`] before anything changes.

use crate::accuracy::resolve_hit;
use crate::ai::{choose_enemy_move, Controller};
use crate::damage::compute_damage;
use crate::error::{BattleError, ModelError};
use crate::items::{Inventory, ItemEffect, ItemKind};
use crate::log::{BattleEvent, BattleLog, Side};
use crate::model::{Combatant, Target};
use crate::options::{BattleOptions, RunPolicy};
use crate::random::RandomSource;
use crate::status::{self, ActionGate, Ailment, StatusRules};
use crate::types::{Effectiveness, TypeChart};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Victory,
    Defeat,
    Escaped,
    Quit,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::Victory => "victory",
            Outcome::Defeat => "defeat",
            Outcome::Escaped => "escaped",
            Outcome::Quit => "quit",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    AwaitingAction,
    /// The active combatant fainted and `replace_fainted` is on; only a
    /// switch is accepted.
    AwaitingReplacement,
    Over(Outcome),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Action {
    Move(usize),
    Switch(usize),
    Item(ItemKind),
    /// Only offered once the active combatant has no PP left anywhere.
    Pass,
    Run,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TurnReport {
    pub events: Vec<BattleEvent>,
    pub outcome: Option<Outcome>,
}

/// Read-only snapshot handed to a [`Controller`].
pub struct BattleView<'a> {
    pub active: &'a Combatant,
    pub roster: &'a [Combatant],
    pub opponent: &'a Combatant,
    pub bag: &'a Inventory,
    pub turn: u32,
    pub awaiting_replacement: bool,
}

/// Final state handed back to the caller for persistence.
#[derive(Clone, Debug, Serialize)]
pub struct BattleSummary {
    pub outcome: Outcome,
    pub turns: u32,
    /// Roster slot that was in front when the battle ended.
    pub active: usize,
    pub player: Vec<Combatant>,
    pub opponent: Combatant,
    pub events: Vec<BattleEvent>,
}

#[derive(Debug)]
pub struct Battle<R = SmallRng> {
    player: Vec<Combatant>,
    active: usize,
    opponent: Combatant,
    options: BattleOptions,
    rng: R,
    log: BattleLog,
    turn: u32,
    phase: Phase,
    engaged: bool,
}

impl Battle<SmallRng> {
    pub fn seeded(
        player: Vec<Combatant>,
        opponent: Combatant,
        options: BattleOptions,
        seed: u64,
    ) -> Result<Self, ModelError> {
        Battle::new(player, opponent, options, SmallRng::seed_from_u64(seed))
    }
}

impl<R: RandomSource> Battle<R> {
    /// Starts with the first conscious roster member in front.
    pub fn new(
        player: Vec<Combatant>,
        opponent: Combatant,
        options: BattleOptions,
        rng: R,
    ) -> Result<Self, ModelError> {
        if player.is_empty() {
            return Err(ModelError::EmptyRoster);
        }
        for combatant in player.iter().chain(std::iter::once(&opponent)) {
            combatant.validate()?;
        }
        let active = player
            .iter()
            .position(|c| !c.is_fainted())
            .ok_or(ModelError::AllFainted)?;
        if opponent.is_fainted() {
            return Err(ModelError::OpponentFainted {
                name: opponent.name.clone(),
            });
        }
        let mut log = BattleLog::new();
        log.push(BattleEvent::SentOut {
            side: Side::Opponent,
            name: opponent.name.clone(),
        });
        log.push(BattleEvent::SentOut {
            side: Side::Player,
            name: player[active].name.clone(),
        });
        Ok(Self {
            player,
            active,
            opponent,
            options,
            rng,
            log,
            turn: 0,
            phase: Phase::AwaitingAction,
            engaged: false,
        })
    }

    pub fn active(&self) -> &Combatant {
        &self.player[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn roster(&self) -> &[Combatant] {
        &self.player
    }

    pub fn opponent(&self) -> &Combatant {
        &self.opponent
    }

    pub fn options(&self) -> &BattleOptions {
        &self.options
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Over(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn can_run(&self) -> bool {
        match self.options.run_policy {
            RunPolicy::Always => true,
            RunPolicy::BeforeFirstExchange => !self.engaged,
        }
    }

    pub fn view<'a>(&'a self, bag: &'a Inventory) -> BattleView<'a> {
        BattleView {
            active: self.active(),
            roster: &self.player,
            opponent: &self.opponent,
            bag,
            turn: self.turn,
            awaiting_replacement: self.phase == Phase::AwaitingReplacement,
        }
    }

    /// Every action the battle would accept right now.
    pub fn valid_actions(&self, bag: &Inventory) -> Vec<Action> {
        let switches = self
            .player
            .iter()
            .enumerate()
            .filter(|(idx, c)| *idx != self.active && !c.is_fainted())
            .map(|(idx, _)| Action::Switch(idx));
        match self.phase {
            Phase::Over(_) => Vec::new(),
            Phase::AwaitingReplacement => switches.collect(),
            Phase::AwaitingAction => {
                let mut actions: Vec<Action> = self
                    .active()
                    .usable_moves()
                    .into_iter()
                    .map(Action::Move)
                    .collect();
                if actions.is_empty() {
                    actions.push(Action::Pass);
                }
                actions.extend(switches);
                actions.extend(bag.available().into_iter().map(Action::Item));
                if self.can_run() {
                    actions.push(Action::Run);
                }
                actions
            }
        }
    }

    pub fn apply(&mut self, action: Action, bag: &mut Inventory) -> Result<TurnReport, BattleError> {
        match action {
            Action::Move(index) => self.use_move(index),
            Action::Switch(index) => self.switch(index),
            Action::Item(kind) => self.use_item(bag, kind),
            Action::Pass => self.pass_turn(),
            Action::Run => self.run(),
        }
    }

    /// Use the active combatant's move in slot `index`, then let the
    /// opponent reply unless the battle ended first.
    pub fn use_move(&mut self, index: usize) -> Result<TurnReport, BattleError> {
        self.ensure_awaiting_action()?;
        let active = self.active();
        let mv = active.move_at(index)?;
        if !mv.has_pp() {
            return Err(BattleError::NoPp {
                combatant: active.name.clone(),
                move_name: mv.name.clone(),
            });
        }
        let start = self.begin_turn();
        self.engaged = true;
        self.take_turn(Side::Player, Some(index));
        self.close_turn(true);
        Ok(self.report(start))
    }

    /// Give up the player's action because no move has PP left. The
    /// opponent still takes its turn.
    pub fn pass_turn(&mut self) -> Result<TurnReport, BattleError> {
        self.ensure_awaiting_action()?;
        let active = self.active();
        if !active.usable_moves().is_empty() {
            return Err(BattleError::MovesRemaining {
                combatant: active.name.clone(),
            });
        }
        let start = self.begin_turn();
        self.engaged = true;
        self.take_turn(Side::Player, None);
        self.close_turn(true);
        Ok(self.report(start))
    }

    /// Bring in roster slot `index`. During a normal turn this costs the
    /// player's action and the opponent attacks the newcomer. As a
    /// replacement for a fainted combatant it is free and does not start a
    /// turn.
    pub fn switch(&mut self, index: usize) -> Result<TurnReport, BattleError> {
        if let Phase::Over(_) = self.phase {
            return Err(BattleError::BattleOver);
        }
        let target = self
            .player
            .get(index)
            .ok_or(BattleError::InvalidSwitchTarget {
                index,
                reason: "no such roster slot",
            })?;
        if target.is_fainted() {
            return Err(BattleError::InvalidSwitchTarget {
                index,
                reason: "fainted",
            });
        }
        if index == self.active {
            return Err(BattleError::InvalidSwitchTarget {
                index,
                reason: "already in battle",
            });
        }

        if self.phase == Phase::AwaitingReplacement {
            let start = self.log.len();
            self.player[self.active].reset_stages();
            self.bring_in(index);
            self.phase = Phase::AwaitingAction;
            return Ok(self.report(start));
        }

        let start = self.begin_turn();
        self.engaged = true;
        let outgoing = &mut self.player[self.active];
        outgoing.reset_stages();
        let name = outgoing.name.clone();
        self.log.push(BattleEvent::SwitchedOut { name });
        self.bring_in(index);
        self.close_turn(false);
        Ok(self.report(start))
    }

    /// Use one item from `bag`. Every item costs the player's action,
    /// including a cure that finds nothing to cure.
    pub fn use_item(
        &mut self,
        bag: &mut Inventory,
        kind: ItemKind,
    ) -> Result<TurnReport, BattleError> {
        self.ensure_awaiting_action()?;
        bag.take(kind)?;
        let start = self.begin_turn();
        self.log.push(BattleEvent::ItemUsed { item: kind });

        let active = &mut self.player[self.active];
        match kind.effect() {
            ItemEffect::Cure(ailment) => {
                if active.cure(ailment) {
                    self.log.push(BattleEvent::StatusCured {
                        name: active.name.clone(),
                        ailment,
                    });
                } else {
                    self.log.push(BattleEvent::ItemHadNoEffect { item: kind });
                }
            }
            ItemEffect::FullHeal => {
                let amount = active.restore_full();
                if amount > 0 {
                    self.log.push(BattleEvent::Healed {
                        name: active.name.clone(),
                        amount,
                        current_hp: active.current_hp,
                    });
                } else {
                    self.log.push(BattleEvent::ItemHadNoEffect { item: kind });
                }
            }
            ItemEffect::Catch => {
                let name = self.opponent.name.clone();
                if self.rng.chance(self.options.catch_rate) {
                    self.log.push(BattleEvent::Caught { name });
                    self.finish(Outcome::Victory);
                    return Ok(self.report(start));
                }
                self.log.push(BattleEvent::BrokeFree { name });
            }
        }
        self.close_turn(true);
        Ok(self.report(start))
    }

    pub fn run(&mut self) -> Result<TurnReport, BattleError> {
        self.ensure_awaiting_action()?;
        if !self.can_run() {
            return Err(BattleError::RunNotAllowed);
        }
        let start = self.log.len();
        self.log.push(BattleEvent::Escaped);
        self.finish(Outcome::Escaped);
        Ok(self.report(start))
    }

    /// Abandon the battle. Accepted at any point before it ends.
    pub fn quit(&mut self) -> Result<TurnReport, BattleError> {
        if let Phase::Over(_) = self.phase {
            return Err(BattleError::BattleOver);
        }
        let start = self.log.len();
        self.finish(Outcome::Quit);
        Ok(self.report(start))
    }

    /// Let `controller` make every player decision until the battle ends.
    pub fn run_to_completion(
        &mut self,
        controller: &mut dyn Controller,
        bag: &mut Inventory,
    ) -> Outcome {
        let mut rejections = 0u32;
        while !self.is_over() {
            if self.turn >= self.options.max_turns {
                tracing::warn!(turn = self.turn, "turn cap reached");
                self.finish(Outcome::Quit);
                break;
            }
            let valid = self.valid_actions(bag);
            if valid.is_empty() {
                tracing::warn!("no valid action left for the player");
                self.finish(Outcome::Quit);
                break;
            }
            let action = controller.choose_action(&self.view(bag), &valid);
            match self.apply(action, bag) {
                Ok(_) => rejections = 0,
                Err(err) => {
                    tracing::warn!(?action, %err, "controller action rejected");
                    rejections += 1;
                    if rejections >= self.options.max_rejections {
                        self.finish(Outcome::Quit);
                    }
                }
            }
        }
        self.outcome().unwrap_or(Outcome::Quit)
    }

    /// Hand the combatants and the log back. Stat stages do not outlive the
    /// battle. An unfinished battle counts as quit.
    pub fn into_summary(self) -> BattleSummary {
        let outcome = self.outcome().unwrap_or(Outcome::Quit);
        let mut player = self.player;
        player.iter_mut().for_each(Combatant::reset_stages);
        let mut opponent = self.opponent;
        opponent.reset_stages();
        BattleSummary {
            outcome,
            turns: self.turn,
            active: self.active,
            player,
            opponent,
            events: self.log.events().to_vec(),
        }
    }

    fn ensure_awaiting_action(&self) -> Result<(), BattleError> {
        match self.phase {
            Phase::AwaitingAction => Ok(()),
            Phase::AwaitingReplacement => Err(BattleError::ReplacementRequired),
            Phase::Over(_) => Err(BattleError::BattleOver),
        }
    }

    fn begin_turn(&mut self) -> usize {
        let start = self.log.len();
        self.turn += 1;
        tracing::debug!(turn = self.turn, "turn started");
        self.log.push(BattleEvent::TurnStarted { turn: self.turn });
        start
    }

    fn report(&self, start: usize) -> TurnReport {
        TurnReport {
            events: self.log.since(start).to_vec(),
            outcome: self.outcome(),
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        tracing::debug!(%outcome, turn = self.turn, "battle over");
        self.phase = Phase::Over(outcome);
        self.log.push(BattleEvent::BattleEnded { outcome });
    }

    fn bring_in(&mut self, index: usize) {
        self.active = index;
        self.log.push(BattleEvent::SentOut {
            side: Side::Player,
            name: self.player[index].name.clone(),
        });
    }

    /// Everything after the player's action: residual damage on the player's
    /// side (skipped on the turn a combatant is switched in), the opponent's
    /// reply and its residual damage, with faint checks in between.
    fn close_turn(&mut self, player_residual: bool) {
        if self.check_faints() {
            return;
        }
        if player_residual {
            self.residual(Side::Player);
            if self.check_faints() {
                return;
            }
        }
        let choice = choose_enemy_move(&self.opponent, &mut self.rng);
        self.take_turn(Side::Opponent, choice);
        if self.check_faints() {
            return;
        }
        self.residual(Side::Opponent);
        self.check_faints();
    }

    /// Ends the battle when someone is down, or waits for a replacement if
    /// `replace_fainted` allows one. Returns true when the turn cannot
    /// continue.
    fn check_faints(&mut self) -> bool {
        if self.opponent.is_fainted() {
            self.finish(Outcome::Victory);
            return true;
        }
        if self.player[self.active].is_fainted() {
            let bench_left = self.player.iter().any(|c| !c.is_fainted());
            if self.options.replace_fainted && bench_left {
                self.phase = Phase::AwaitingReplacement;
            } else {
                self.finish(Outcome::Defeat);
            }
            return true;
        }
        false
    }

    /// One side's action: the status gate, then the move in `slot`.
    fn take_turn(&mut self, side: Side, slot: Option<usize>) {
        let Battle {
            player,
            active,
            opponent,
            options,
            rng,
            log,
            engaged,
            ..
        } = self;
        let rules = &options.status;
        let chart = options.chart.chart();
        let own = &mut player[*active];
        let (actor, target) = match side {
            Side::Player => (own, opponent),
            Side::Opponent => (opponent, own),
        };

        match status::before_action(&mut actor.status, rules, &mut *rng) {
            ActionGate::Act => {}
            ActionGate::FullyParalyzed => {
                log.push(cannot_act(side, actor, Ailment::Paralysis));
                return;
            }
            ActionGate::Frozen => {
                log.push(cannot_act(side, actor, Ailment::Freeze));
                return;
            }
            ActionGate::Asleep { woke_up } => {
                log.push(cannot_act(side, actor, Ailment::Sleep));
                if woke_up {
                    log.push(BattleEvent::WokeUp {
                        side,
                        name: actor.name.clone(),
                    });
                }
                return;
            }
        }

        let Some(slot) = slot else {
            log.push(BattleEvent::NoMovesLeft {
                side,
                name: actor.name.clone(),
            });
            return;
        };
        let exchange = MoveExchange {
            side,
            actor,
            target,
            chart,
            rules,
            rng,
            log,
        };
        if exchange.resolve(slot) > 0 {
            *engaged = true;
        }
    }

    fn residual(&mut self, side: Side) {
        let rules = &self.options.status;
        let combatant = match side {
            Side::Player => &mut self.player[self.active],
            Side::Opponent => &mut self.opponent,
        };
        if combatant.is_fainted() {
            return;
        }
        let Some((ailment, amount)) =
            status::residual_damage(&combatant.status, combatant.max_hp(), rules)
        else {
            return;
        };
        if amount == 0 {
            return;
        }
        let lost = combatant.take_damage(amount);
        self.log.push(BattleEvent::ResidualDamage {
            side,
            name: combatant.name.clone(),
            ailment,
            amount: lost,
            remaining_hp: combatant.current_hp,
        });
        if combatant.is_fainted() {
            self.log.push(BattleEvent::Fainted {
                side,
                name: combatant.name.clone(),
            });
        }
    }
}

fn cannot_act(side: Side, actor: &Combatant, reason: Ailment) -> BattleEvent {
    BattleEvent::CannotAct {
        side,
        name: actor.name.clone(),
        reason,
    }
}

/// A single move from `actor` at `target`.
struct MoveExchange<'a> {
    side: Side,
    actor: &'a mut Combatant,
    target: &'a mut Combatant,
    chart: &'a TypeChart,
    rules: &'a StatusRules,
    rng: &'a mut dyn RandomSource,
    log: &'a mut BattleLog,
}

impl MoveExchange<'_> {
    /// Spends PP, rolls to hit, applies damage then secondary effects.
    /// Returns the HP the target lost.
    fn resolve(self, slot: usize) -> u32 {
        let MoveExchange {
            side,
            actor,
            target,
            chart,
            rules,
            rng,
            log,
        } = self;
        let target_side = side.opponent();
        let Some(mv) = actor.moves.get(slot).cloned() else {
            return 0;
        };
        if let Some(stored) = actor.moves.get_mut(slot) {
            stored.current_pp = stored.current_pp.saturating_sub(1);
        }
        log.push(BattleEvent::MoveUsed {
            side,
            user: actor.name.clone(),
            move_name: mv.name.clone(),
        });

        if !resolve_hit(&mv, &actor.stat_stages, &target.stat_stages, rng) {
            log.push(BattleEvent::Missed {
                side,
                user: actor.name.clone(),
            });
            return 0;
        }

        let mut lost = 0;
        if mv.is_damaging() {
            let percent = rng.damage_roll();
            let roll = compute_damage(actor, target, &mv, chart, percent);
            if roll.effectiveness == Effectiveness::NoEffect {
                log.push(BattleEvent::Effectiveness {
                    side: target_side,
                    target: target.name.clone(),
                    effectiveness: Effectiveness::NoEffect,
                });
                return 0;
            }
            lost = target.take_damage(roll.damage);
            tracing::trace!(damage = roll.damage, percent, "damage rolled");
            log.push(BattleEvent::Damage {
                side: target_side,
                target: target.name.clone(),
                amount: lost,
                remaining_hp: target.current_hp,
                max_hp: target.max_hp(),
            });
            if roll.effectiveness != Effectiveness::Neutral {
                log.push(BattleEvent::Effectiveness {
                    side: target_side,
                    target: target.name.clone(),
                    effectiveness: roll.effectiveness,
                });
            }
            if target.is_fainted() {
                log.push(BattleEvent::Fainted {
                    side: target_side,
                    name: target.name.clone(),
                });
                return lost;
            }
        }

        if let Some(effect) = mv.status_effect {
            if rng.chance(effect.chance) {
                match target.inflict_status(effect.status, rules, rng) {
                    Ok(_) => log.push(BattleEvent::StatusInflicted {
                        side: target_side,
                        target: target.name.clone(),
                        ailment: effect.status,
                    }),
                    Err(BattleError::AlreadyStatusAffected { current, .. }) => {
                        log.push(BattleEvent::StatusFailed {
                            side: target_side,
                            target: target.name.clone(),
                            current,
                        })
                    }
                    Err(err) => tracing::warn!(%err, "status not applied"),
                }
            }
        }

        for change in &mv.stat_changes {
            let (affected, affected_side) = match change.target {
                Target::User => (&mut *actor, side),
                Target::Opponent => (&mut *target, target_side),
            };
            let actual = affected.modify_stage(change.stat, change.stages);
            log.push(BattleEvent::StatChanged {
                side: affected_side,
                target: affected.name.clone(),
                stat: change.stat,
                change: actual,
                requested: change.stages,
            });
        }
        lost
    }
}
