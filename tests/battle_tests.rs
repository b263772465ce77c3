use assert_matches::assert_matches;
use pokemon_battle_engine::prelude::*;
use pokemon_battle_engine::random::seeded;
use pokemon_battle_engine::types::Effectiveness;

fn stats(hp: u32, attack: u32, defense: u32, speed: u32) -> BaseStats {
    BaseStats {
        hp,
        attack,
        defense,
        special_attack: 50,
        special_defense: 50,
        speed,
    }
}

fn tackle() -> Move {
    Move::new("Tackle", ElementType::Normal, MoveCategory::Physical, 40, 100, 35)
}

fn splash() -> Move {
    Move::new("Splash", ElementType::Normal, MoveCategory::Status, 0, 0, 40)
}

fn make_mon(name: &str, hp: u32, moves: Vec<Move>) -> Combatant {
    Combatant::new(
        name,
        0,
        5,
        stats(hp, 50, 50, 50),
        vec![ElementType::Normal],
        moves,
    )
}

fn charmander() -> Combatant {
    Combatant::new(
        "Charmander",
        4,
        5,
        BaseStats {
            hp: 39,
            attack: 52,
            defense: 43,
            special_attack: 60,
            special_defense: 50,
            speed: 65,
        },
        vec![ElementType::Fire],
        vec![Move::new(
            "Fire Fang",
            ElementType::Fire,
            MoveCategory::Physical,
            40,
            100,
            15,
        )],
    )
}

fn bulbasaur() -> Combatant {
    Combatant::new(
        "Bulbasaur",
        1,
        5,
        BaseStats {
            hp: 45,
            attack: 49,
            defense: 49,
            special_attack: 65,
            special_defense: 65,
            speed: 45,
        },
        vec![ElementType::Grass, ElementType::Poison],
        vec![tackle()],
    )
}

fn start(
    player: Vec<Combatant>,
    opponent: Combatant,
    rng: ScriptedRandom,
) -> Battle<ScriptedRandom> {
    Battle::new(player, opponent, BattleOptions::default(), rng).unwrap()
}

fn moved(events: &[BattleEvent], side: Side) -> bool {
    events
        .iter()
        .any(|e| matches!(e, BattleEvent::MoveUsed { side: s, .. } if *s == side))
}

#[test]
fn charmander_fire_fang_matches_formula() {
    let mut battle = start(vec![charmander()], bulbasaur(), ScriptedRandom::new());
    let report = battle.use_move(0).unwrap();

    let hits: Vec<u32> = report
        .events
        .iter()
        .filter_map(|e| match e {
            BattleEvent::Damage { amount, .. } => Some(*amount),
            _ => None,
        })
        .collect();
    // (2*5/5+2)*40*52/49 = 169 -> 169/50+2 = 5; 5 * 1.5 (STAB) * 2.0 = 15.
    // Bulbasaur's Tackle back: 160*49/43 = 182 -> 182/50+2 = 5.
    assert_eq!(hits, vec![15, 5]);
    assert!(report.events.contains(&BattleEvent::Effectiveness {
        side: Side::Opponent,
        target: "Bulbasaur".into(),
        effectiveness: Effectiveness::SuperEffective,
    }));
    assert_eq!(battle.opponent().current_hp, 30);
    assert_eq!(battle.active().current_hp, 34);
    assert_eq!(battle.active().moves[0].current_pp, 14);
    assert_eq!(report.outcome, None);
    assert_eq!(battle.turn(), 1);
}

#[test]
fn knockout_ends_battle_before_enemy_turn() {
    let mut opponent = bulbasaur();
    opponent.current_hp = 1;
    let mut battle = start(vec![charmander()], opponent, ScriptedRandom::new());
    let report = battle.use_move(0).unwrap();

    assert_eq!(report.outcome, Some(Outcome::Victory));
    assert!(!moved(&report.events, Side::Opponent));
    assert_eq!(battle.opponent().moves[0].current_pp, 35);
    assert_eq!(battle.active().current_hp, 39);
    assert_matches!(
        report.events.last(),
        Some(BattleEvent::BattleEnded {
            outcome: Outcome::Victory
        })
    );
    assert_matches!(battle.use_move(0), Err(BattleError::BattleOver));
    assert_matches!(battle.quit(), Err(BattleError::BattleOver));
}

#[test]
fn never_miss_move_hits_on_a_bad_roll() {
    let swift = Move::new("Swift", ElementType::Normal, MoveCategory::Special, 60, 0, 20);
    let sand = Move::new("Mud Shot", ElementType::Ground, MoveCategory::Special, 55, 50, 15);
    let player = make_mon("Eevee", 55, vec![swift, sand]);
    let opponent = make_mon("Pidgey", 200, vec![splash()]);
    let mut battle = start(
        vec![player],
        opponent,
        ScriptedRandom::new().with_fallback_unit(0.99),
    );

    let report = battle.use_move(0).unwrap();
    assert!(report
        .events
        .iter()
        .any(|e| matches!(e, BattleEvent::Damage { side: Side::Opponent, .. })));

    let report = battle.use_move(1).unwrap();
    assert!(report
        .events
        .iter()
        .any(|e| matches!(e, BattleEvent::Missed { side: Side::Player, .. })));
    // PP is spent even on a miss.
    assert_eq!(battle.active().moves[1].current_pp, 14);
}

#[test]
fn burn_ticks_three_times() {
    let mut player = make_mon("Vulpix", 100, vec![splash()]);
    player.status = StatusCondition::Burned;
    let opponent = make_mon("Rattata", 100, vec![splash()]);
    let mut battle = start(vec![player], opponent, ScriptedRandom::new());

    for _ in 0..3 {
        battle.use_move(0).unwrap();
    }
    assert_eq!(battle.active().current_hp, 100 - 3 * (100 / 16));
    let ticks = battle
        .log()
        .events()
        .iter()
        .filter(|e| matches!(e, BattleEvent::ResidualDamage { amount: 6, .. }))
        .count();
    assert_eq!(ticks, 3);
}

#[test]
fn burn_never_drops_hp_below_zero() {
    let mut player = make_mon("Vulpix", 100, vec![splash()]);
    player.status = StatusCondition::Burned;
    player.current_hp = 5;
    let opponent = make_mon("Rattata", 100, vec![splash()]);
    let mut battle = start(vec![player], opponent, ScriptedRandom::new());

    let report = battle.use_move(0).unwrap();
    assert_eq!(battle.active().current_hp, 0);
    assert!(report.events.contains(&BattleEvent::ResidualDamage {
        side: Side::Player,
        name: "Vulpix".into(),
        ailment: Ailment::Burn,
        amount: 5,
        remaining_hp: 0,
    }));
    assert_eq!(report.outcome, Some(Outcome::Defeat));
    // The fainted side's opponent never got to move.
    assert!(!moved(&report.events, Side::Opponent));
}

#[test]
fn move_without_pp_changes_nothing() {
    let mut player = charmander();
    player.moves[0].current_pp = 0;
    player.status = StatusCondition::Poisoned;
    let mut battle = start(vec![player], bulbasaur(), ScriptedRandom::new());
    let roster_before = battle.roster().to_vec();
    let opponent_before = battle.opponent().clone();
    let log_before = battle.log().len();

    assert_matches!(battle.use_move(0), Err(BattleError::NoPp { .. }));
    assert_matches!(
        battle.use_move(3),
        Err(BattleError::InvalidMoveIndex {
            index: 3,
            available: 1
        })
    );
    assert_eq!(battle.roster(), roster_before.as_slice());
    assert_eq!(battle.opponent(), &opponent_before);
    assert_eq!(battle.log().len(), log_before);
    assert_eq!(battle.turn(), 0);
    assert_eq!(battle.phase(), Phase::AwaitingAction);
}

#[test]
fn sleep_skips_exactly_the_drawn_turns() {
    let hypnosis = Move::new("Hypnosis", ElementType::Psychic, MoveCategory::Status, 0, 0, 20)
        .with_status(Ailment::Sleep, 1.0);
    let player = make_mon("Drowzee", 60, vec![hypnosis, splash()]);
    let opponent = make_mon("Meowth", 60, vec![splash()]);
    let mut battle = start(
        vec![player],
        opponent,
        ScriptedRandom::new().with_ranges([3]),
    );

    let first = battle.use_move(0).unwrap();
    assert!(first.events.contains(&BattleEvent::StatusInflicted {
        side: Side::Opponent,
        target: "Meowth".into(),
        ailment: Ailment::Sleep,
    }));
    assert!(!moved(&first.events, Side::Opponent));

    let second = battle.use_move(1).unwrap();
    assert!(!moved(&second.events, Side::Opponent));

    let third = battle.use_move(1).unwrap();
    assert!(!moved(&third.events, Side::Opponent));
    assert!(third.events.iter().any(|e| matches!(e, BattleEvent::WokeUp { .. })));
    assert!(battle.opponent().status.is_healthy());

    let fourth = battle.use_move(1).unwrap();
    assert!(moved(&fourth.events, Side::Opponent));

    let asleep_turns = battle
        .log()
        .events()
        .iter()
        .filter(|e| {
            matches!(
                e,
                BattleEvent::CannotAct {
                    side: Side::Opponent,
                    reason: Ailment::Sleep,
                    ..
                }
            )
        })
        .count();
    assert_eq!(asleep_turns, 3);
}

#[test]
fn second_status_is_logged_not_applied() {
    let wave = Move::new("Thunder Wave", ElementType::Electric, MoveCategory::Status, 0, 0, 20)
        .with_status(Ailment::Paralysis, 1.0);
    let mut opponent = make_mon("Oddish", 60, vec![splash()]);
    opponent.status = StatusCondition::Burned;
    let mut battle = start(
        vec![make_mon("Pikachu", 60, vec![wave])],
        opponent,
        ScriptedRandom::new(),
    );

    let report = battle.use_move(0).unwrap();
    assert!(report.events.contains(&BattleEvent::StatusFailed {
        side: Side::Opponent,
        target: "Oddish".into(),
        current: Ailment::Burn,
    }));
    assert_eq!(battle.opponent().status, StatusCondition::Burned);
}

#[test]
fn full_paralysis_spends_no_pp() {
    let mut player = make_mon("Pikachu", 60, vec![tackle()]);
    player.status = StatusCondition::Paralyzed;
    let mut battle = start(
        vec![player],
        make_mon("Geodude", 60, vec![splash()]),
        ScriptedRandom::new().with_units([0.1]),
    );

    let report = battle.use_move(0).unwrap();
    assert!(report.events.contains(&BattleEvent::CannotAct {
        side: Side::Player,
        name: "Pikachu".into(),
        reason: Ailment::Paralysis,
    }));
    assert_eq!(battle.active().moves[0].current_pp, 35);
    assert!(moved(&report.events, Side::Opponent));
    assert_eq!(battle.active().status, StatusCondition::Paralyzed);
}

#[test]
fn frozen_until_heater() {
    let mut player = make_mon("Staryu", 60, vec![tackle()]);
    player.status = StatusCondition::Frozen;
    let mut bag = Inventory::starter();
    let mut battle = start(
        vec![player],
        make_mon("Slowpoke", 200, vec![splash()]),
        ScriptedRandom::new(),
    );

    for _ in 0..4 {
        let report = battle.use_move(0).unwrap();
        assert!(!moved(&report.events, Side::Player));
    }
    let report = battle.use_item(&mut bag, ItemKind::Heater).unwrap();
    assert!(report.events.contains(&BattleEvent::StatusCured {
        name: "Staryu".into(),
        ailment: Ailment::Freeze,
    }));
    assert_eq!(bag.quantity(ItemKind::Heater), 0);

    let report = battle.use_move(0).unwrap();
    assert!(moved(&report.events, Side::Player));
}

#[test]
fn run_only_before_first_exchange() {
    let mut battle = start(
        vec![charmander()],
        bulbasaur(),
        ScriptedRandom::new(),
    );
    let report = battle.run().unwrap();
    assert_eq!(report.outcome, Some(Outcome::Escaped));
    assert_eq!(battle.opponent().current_hp, 45);

    let mut battle = start(vec![charmander()], bulbasaur(), ScriptedRandom::new());
    battle.use_move(0).unwrap();
    assert!(!battle.can_run());
    assert_matches!(battle.run(), Err(BattleError::RunNotAllowed));
    assert_eq!(battle.phase(), Phase::AwaitingAction);

    let options = BattleOptions {
        run_policy: RunPolicy::Always,
        ..BattleOptions::default()
    };
    let mut battle = Battle::new(
        vec![charmander()],
        bulbasaur(),
        options,
        ScriptedRandom::new(),
    )
    .unwrap();
    battle.use_move(0).unwrap();
    assert_eq!(battle.run().unwrap().outcome, Some(Outcome::Escaped));
}

#[test]
fn switching_costs_the_turn_and_resets_stages() {
    let mut lead = make_mon("Machop", 60, vec![tackle()]);
    lead.modify_stage(Stat::Attack, 2);
    let bench = make_mon("Geodude", 60, vec![tackle()]);
    let mut battle = start(
        vec![lead, bench],
        make_mon("Mankey", 60, vec![tackle()]),
        ScriptedRandom::new(),
    );

    assert_matches!(
        battle.switch(0),
        Err(BattleError::InvalidSwitchTarget { index: 0, .. })
    );
    assert_matches!(
        battle.switch(5),
        Err(BattleError::InvalidSwitchTarget { index: 5, .. })
    );

    let report = battle.switch(1).unwrap();
    assert_eq!(battle.active_index(), 1);
    assert_eq!(battle.roster()[0].stat_stages.get(Stat::Attack), 0);
    assert!(moved(&report.events, Side::Opponent));
    assert!(report.events.iter().any(|e| matches!(
        e,
        BattleEvent::Damage { target, .. } if target == "Geodude"
    )));
    assert_eq!(battle.roster()[0].current_hp, 60);
}

#[test]
fn fainted_lead_ends_the_battle_even_with_a_bench() {
    let mut lead = make_mon("Caterpie", 60, vec![splash()]);
    lead.current_hp = 1;
    let bench = make_mon("Metapod", 60, vec![tackle()]);
    let mut battle = start(
        vec![lead, bench],
        make_mon("Spearow", 60, vec![tackle()]),
        ScriptedRandom::new(),
    );

    let report = battle.use_move(0).unwrap();
    assert_eq!(report.outcome, Some(Outcome::Defeat));
    assert!(report.events.contains(&BattleEvent::Fainted {
        side: Side::Player,
        name: "Caterpie".into(),
    }));
    assert!(battle.valid_actions(&Inventory::starter()).is_empty());
    assert_matches!(battle.switch(1), Err(BattleError::BattleOver));
    assert_eq!(battle.roster()[1].current_hp, 60);
}

#[test]
fn replacement_option_waits_for_a_free_switch() {
    let mut lead = make_mon("Caterpie", 60, vec![splash()]);
    lead.current_hp = 1;
    lead.modify_stage(Stat::Defense, 2);
    let bench = make_mon("Metapod", 60, vec![tackle()]);
    let options = BattleOptions {
        replace_fainted: true,
        ..BattleOptions::default()
    };
    let mut battle = Battle::new(
        vec![lead, bench],
        make_mon("Spearow", 60, vec![tackle()]),
        options,
        ScriptedRandom::new(),
    )
    .unwrap();

    let report = battle.use_move(0).unwrap();
    assert_eq!(report.outcome, None);
    assert_eq!(battle.phase(), Phase::AwaitingReplacement);
    assert_eq!(
        battle.valid_actions(&Inventory::starter()),
        vec![Action::Switch(1)]
    );
    assert_matches!(battle.use_move(0), Err(BattleError::ReplacementRequired));
    assert_matches!(battle.run(), Err(BattleError::ReplacementRequired));
    assert_matches!(
        battle.switch(0),
        Err(BattleError::InvalidSwitchTarget { index: 0, .. })
    );

    let turn = battle.turn();
    let report = battle.switch(1).unwrap();
    assert_eq!(
        report.events,
        vec![BattleEvent::SentOut {
            side: Side::Player,
            name: "Metapod".into(),
        }]
    );
    assert_eq!(battle.turn(), turn);
    assert_eq!(battle.phase(), Phase::AwaitingAction);
    assert_eq!(battle.active().current_hp, 60);
    assert_eq!(battle.roster()[0].stat_stages.get(Stat::Defense), 0);
}

#[test]
fn last_faint_is_defeat() {
    let mut lead = make_mon("Caterpie", 60, vec![splash()]);
    lead.current_hp = 1;
    let mut battle = start(
        vec![lead],
        make_mon("Spearow", 60, vec![tackle()]),
        ScriptedRandom::new(),
    );
    let report = battle.use_move(0).unwrap();
    assert_eq!(report.outcome, Some(Outcome::Defeat));
}

#[test]
fn potion_and_mismatched_cure() {
    let mut player = make_mon("Oddish", 50, vec![splash()]);
    player.current_hp = 10;
    let mut bag = Inventory::starter();
    let mut battle = start(
        vec![player],
        make_mon("Psyduck", 50, vec![splash()]),
        ScriptedRandom::new(),
    );

    let report = battle.use_item(&mut bag, ItemKind::Potion).unwrap();
    assert!(report.events.contains(&BattleEvent::Healed {
        name: "Oddish".into(),
        amount: 40,
        current_hp: 50,
    }));
    assert!(moved(&report.events, Side::Opponent));
    assert_eq!(bag.quantity(ItemKind::Potion), 1);

    let report = battle.use_item(&mut bag, ItemKind::Antidote).unwrap();
    assert!(report.events.contains(&BattleEvent::ItemHadNoEffect {
        item: ItemKind::Antidote
    }));
    assert_eq!(bag.quantity(ItemKind::Antidote), 1);
}

#[test]
fn empty_bag_slot_is_rejected() {
    let mut bag = Inventory::new();
    let mut battle = start(vec![charmander()], bulbasaur(), ScriptedRandom::new());
    assert_matches!(
        battle.use_item(&mut bag, ItemKind::Potion),
        Err(BattleError::ItemUnavailable(ItemKind::Potion))
    );
    assert_eq!(battle.turn(), 0);
}

#[test]
fn pokeball_catch_and_escape() {
    let mut bag = Inventory::starter();
    let mut battle = start(vec![charmander()], bulbasaur(), ScriptedRandom::new());
    let report = battle.use_item(&mut bag, ItemKind::Pokeball).unwrap();
    assert_eq!(report.outcome, Some(Outcome::Victory));
    assert!(report.events.contains(&BattleEvent::Caught {
        name: "Bulbasaur".into()
    }));
    assert!(!moved(&report.events, Side::Opponent));

    let mut battle = start(
        vec![charmander()],
        bulbasaur(),
        ScriptedRandom::new().with_units([0.9]),
    );
    let report = battle.use_item(&mut bag, ItemKind::Pokeball).unwrap();
    assert_eq!(report.outcome, None);
    assert!(report.events.contains(&BattleEvent::BrokeFree {
        name: "Bulbasaur".into()
    }));
    assert!(moved(&report.events, Side::Opponent));
    assert_eq!(bag.quantity(ItemKind::Pokeball), 1);
}

#[test]
fn stat_moves_target_the_right_side() {
    let growl = Move::new("Growl", ElementType::Normal, MoveCategory::Status, 0, 100, 40)
        .with_stat_change(Stat::Attack, -1, Target::Opponent);
    let dance = Move::new("Swords Dance", ElementType::Normal, MoveCategory::Status, 0, 0, 20)
        .with_stat_change(Stat::Attack, 2, Target::User);
    let mut battle = start(
        vec![make_mon("Meowth", 60, vec![growl, dance])],
        make_mon("Ekans", 60, vec![splash()]),
        ScriptedRandom::new(),
    );

    battle.use_move(0).unwrap();
    assert_eq!(battle.opponent().stat_stages.get(Stat::Attack), -1);
    for _ in 0..4 {
        battle.use_move(1).unwrap();
    }
    assert_eq!(battle.active().stat_stages.get(Stat::Attack), 6);
    assert!(battle.log().events().contains(&BattleEvent::StatChanged {
        side: Side::Player,
        target: "Meowth".into(),
        stat: Stat::Attack,
        change: 0,
        requested: 2,
    }));
}

#[test]
fn enemy_without_pp_passes() {
    let mut opponent = make_mon("Magikarp", 60, vec![tackle()]);
    opponent.moves[0].current_pp = 0;
    let mut battle = start(
        vec![make_mon("Goldeen", 60, vec![splash()])],
        opponent,
        ScriptedRandom::new(),
    );
    let report = battle.use_move(0).unwrap();
    assert!(report.events.contains(&BattleEvent::NoMovesLeft {
        side: Side::Opponent,
        name: "Magikarp".into(),
    }));
}

#[test]
fn out_of_pp_player_can_still_pass() {
    let mut player = make_mon("Goldeen", 60, vec![tackle()]);
    player.moves[0].current_pp = 0;
    let mut battle = start(
        vec![player],
        make_mon("Magikarp", 60, vec![tackle()]),
        ScriptedRandom::new(),
    );
    let mut empty_bag = Inventory::new();

    battle.use_move(0).unwrap_err();
    assert!(battle.can_run());
    assert_eq!(
        battle.valid_actions(&empty_bag),
        vec![Action::Pass, Action::Run]
    );

    let report = battle.apply(Action::Pass, &mut empty_bag).unwrap();
    assert!(report.events.contains(&BattleEvent::NoMovesLeft {
        side: Side::Player,
        name: "Goldeen".into(),
    }));
    assert!(moved(&report.events, Side::Opponent));
    assert_eq!(battle.turn(), 1);
    assert!(!battle.can_run());
    assert_eq!(battle.valid_actions(&empty_bag), vec![Action::Pass]);

    let mut battle = start(vec![charmander()], bulbasaur(), ScriptedRandom::new());
    assert_matches!(
        battle.pass_turn(),
        Err(BattleError::MovesRemaining { .. })
    );
    assert_eq!(battle.turn(), 0);
}

#[test]
fn immune_target_shrugs_off_the_whole_move() {
    let shock = Move::new(
        "Thunder Shock",
        ElementType::Electric,
        MoveCategory::Special,
        40,
        100,
        30,
    )
    .with_status(Ailment::Paralysis, 1.0)
    .with_stat_change(Stat::Defense, -1, Target::Opponent);
    let pikachu = Combatant::new(
        "Pikachu",
        25,
        5,
        stats(35, 55, 40, 90),
        vec![ElementType::Electric],
        vec![shock],
    );
    let diglett = Combatant::new(
        "Diglett",
        50,
        5,
        stats(40, 55, 25, 95),
        vec![ElementType::Ground],
        vec![splash()],
    );
    let mut battle = start(vec![pikachu], diglett, ScriptedRandom::new());

    let report = battle.use_move(0).unwrap();
    assert!(report.events.contains(&BattleEvent::Effectiveness {
        side: Side::Opponent,
        target: "Diglett".into(),
        effectiveness: Effectiveness::NoEffect,
    }));
    assert!(!report
        .events
        .iter()
        .any(|e| matches!(e, BattleEvent::Damage { side: Side::Opponent, .. })));
    assert!(!report.events.iter().any(|e| matches!(
        e,
        BattleEvent::StatusInflicted { .. } | BattleEvent::StatChanged { .. }
    )));
    assert_eq!(battle.opponent().current_hp, 40);
    assert!(battle.opponent().status.is_healthy());
    assert_eq!(battle.opponent().stat_stages.get(Stat::Defense), 0);
    assert_eq!(battle.active().moves[0].current_pp, 29);
    // Choosing to fight closes the escape window even without damage.
    assert!(!battle.can_run());
}

#[test]
fn switching_closes_the_escape_window_but_items_do_not() {
    let mut bag = Inventory::starter();
    let mut battle = start(
        vec![make_mon("Oddish", 50, vec![tackle()])],
        make_mon("Psyduck", 50, vec![splash()]),
        ScriptedRandom::new(),
    );
    battle.use_item(&mut bag, ItemKind::Potion).unwrap();
    assert!(battle.can_run());

    let mut battle = start(
        vec![
            make_mon("Oddish", 50, vec![tackle()]),
            make_mon("Bellsprout", 50, vec![tackle()]),
        ],
        make_mon("Psyduck", 50, vec![splash()]),
        ScriptedRandom::new(),
    );
    battle.switch(1).unwrap();
    assert!(!battle.can_run());
    assert_matches!(battle.run(), Err(BattleError::RunNotAllowed));
}

#[test]
fn autopilot_battles_finish_and_keep_invariants() {
    for seed in 0..20u64 {
        let mut bag = Inventory::starter();
        let mut battle = Battle::seeded(
            vec![charmander(), make_mon("Rattata", 30, vec![tackle()])],
            bulbasaur(),
            BattleOptions::default(),
            seed,
        )
        .unwrap();
        let mut controller = RandomController::new(seed);
        let outcome = battle.run_to_completion(&mut controller, &mut bag);
        assert_eq!(battle.outcome(), Some(outcome));

        let summary = battle.into_summary();
        assert_eq!(summary.outcome, outcome);
        for mon in summary.player.iter().chain(std::iter::once(&summary.opponent)) {
            assert!(mon.current_hp <= mon.max_hp());
            assert!(mon.moves.iter().all(|m| m.current_pp <= m.max_pp));
            assert_eq!(mon.stat_stages, Default::default());
        }
        match outcome {
            Outcome::Victory => assert!(
                summary.opponent.is_fainted()
                    || summary
                        .events
                        .iter()
                        .any(|e| matches!(e, BattleEvent::Caught { .. }))
            ),
            Outcome::Defeat => assert!(summary.player[summary.active].is_fainted()),
            Outcome::Escaped | Outcome::Quit => {}
        }
    }
}

#[test]
fn seeded_battles_replay_identically() {
    let play = |seed| {
        let mut bag = Inventory::starter();
        let mut battle = Battle::seeded(
            vec![charmander()],
            bulbasaur(),
            BattleOptions::default(),
            seed,
        )
        .unwrap();
        battle.run_to_completion(&mut RandomController::attacking(seed), &mut bag);
        battle.into_summary().events
    };
    assert_eq!(play(99), play(99));
}

#[test]
fn fainted_roster_cannot_start() {
    let mut down = charmander();
    down.current_hp = 0;
    assert_matches!(
        Battle::new(vec![down], bulbasaur(), BattleOptions::default(), seeded(1)),
        Err(ModelError::AllFainted)
    );
    assert_matches!(
        Battle::new(Vec::new(), bulbasaur(), BattleOptions::default(), seeded(1)),
        Err(ModelError::EmptyRoster)
    );
}
