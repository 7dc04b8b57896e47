//! Attack and spy operations end to end.

mod common;

use std::sync::Arc;

use common::{ATTACKER, DEFENDER, START, attacker, defender, world, world_with};
use dominion_core::{
    ActorId, ActorSnapshot, AllianceId, BattleKind, CombatResult, EffectKind, Resources,
    SpyMission, WarId,
};
use dominion_runtime::{
    CombatEvent, EspionageEvent, Event, InMemoryStore, OperationData, Topic, War,
};

#[test]
fn overwhelming_attack_resolves_and_persists() {
    let world = world();
    let mut combat = world.game.subscribe(Topic::Combat);

    let result = world.game.attack(ATTACKER, DEFENDER, BattleKind::Plunder, 10);
    assert!(result.success, "{}", result.message);

    let OperationData::Battle { report, outcome } = result.data else {
        panic!("expected a battle payload, got {:?}", result.data);
    };
    assert_eq!(outcome.result, CombatResult::AttackerVictory);
    assert_eq!(outcome.attacker_power, 500);
    assert_eq!(outcome.defender_power, 100);
    // Ratio 5: the winner loses 1% of 500, the loser half of 100.
    assert_eq!(outcome.attacker_losses, 5);
    assert_eq!(outcome.defender_losses, 50);
    assert_eq!(outcome.credits_plundered, 1_000);
    // Defender net worth: 110 units × 5 + 10_000 / 100 = 650.
    assert_eq!(outcome.prestige_gained, 6);
    assert_eq!(outcome.defender_total_guards, 100);

    let a = world.actor(ATTACKER);
    assert_eq!(a.resources.soldiers, 495);
    assert_eq!(a.resources.attack_turns, 10);
    assert_eq!(a.resources.credits, 101_000);
    assert_eq!(a.resources.war_prestige, 6);

    let d = world.actor(DEFENDER);
    assert_eq!(d.resources.guards, 50);
    assert_eq!(d.resources.credits, 9_000);

    let reports = world.store.battle_reports().expect("reports");
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].id, report);
    assert_eq!(reports[0].defender_name, "Borin");
    assert_eq!(reports[0].created_at, START);

    let notifications = world.store.notifications_for(DEFENDER).expect("notifications");
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "You were attacked by Ariadne");
    assert_eq!(notifications[0].report, Some(report));

    match combat.try_recv().expect("battle event") {
        Event::Combat(CombatEvent::BattleResolved { report: id, .. }) => assert_eq!(id, report),
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn wipeout_destroys_every_defending_guard() {
    let weak = ActorSnapshot::new(DEFENDER, "Borin").with_resources(Resources {
        guards: 40,
        ..Resources::default()
    });
    let world = world_with(Arc::new(InMemoryStore::new()), vec![attacker(), weak]);

    let result = world.game.attack(ATTACKER, DEFENDER, BattleKind::Conquer, 5);
    let OperationData::Battle { outcome, .. } = result.data else {
        panic!("expected a battle payload");
    };
    assert!(outcome.ratio >= 10.0);
    assert_eq!(outcome.defender_losses, 40);
    assert_eq!(world.actor(DEFENDER).resources.guards, 0);
}

#[test]
fn losing_attackers_still_kill_at_least_one_guard() {
    let fortress = ActorSnapshot::new(DEFENDER, "Borin").with_resources(Resources {
        guards: 2_000,
        ..Resources::default()
    });
    let world = world_with(Arc::new(InMemoryStore::new()), vec![attacker(), fortress]);

    let result = world.game.attack(ATTACKER, DEFENDER, BattleKind::Plunder, 1);
    assert!(result.success);
    let OperationData::Battle { outcome, .. } = result.data else {
        panic!("expected a battle payload");
    };
    assert_eq!(outcome.result, CombatResult::DefenderVictory);
    assert!(outcome.defender_losses >= 1);
    assert!(outcome.attacker_losses >= 1);
    assert_eq!(outcome.credits_plundered, 0);
    assert_eq!(outcome.prestige_gained, 0);
}

#[test]
fn targets_resolve_by_name_ignoring_case() {
    let world = world();
    let result = world.game.attack(ATTACKER, "bORIN", BattleKind::Plunder, 1);
    assert!(result.success, "{}", result.message);
    assert_eq!(world.store.battle_reports().expect("reports").len(), 1);
}

#[test]
fn invalid_requests_change_nothing() {
    let world = world();
    let before = world.store.snapshot().expect("snapshot");

    let cases = [
        (world.game.attack(ATTACKER, ATTACKER, BattleKind::Plunder, 1), "VALIDATION_SELF_TARGET"),
        (world.game.attack(ATTACKER, ActorId(99), BattleKind::Plunder, 1), "VALIDATION_TARGET_NOT_FOUND"),
        (world.game.attack(ATTACKER, "Nobody", BattleKind::Plunder, 1), "VALIDATION_TARGET_NOT_FOUND"),
        (world.game.attack(ATTACKER, DEFENDER, BattleKind::Plunder, 0), "VALIDATION_INVALID_TURNS"),
        (world.game.attack(ATTACKER, DEFENDER, BattleKind::Plunder, 11), "VALIDATION_INVALID_TURNS"),
        (world.game.attack(DEFENDER, ATTACKER, BattleKind::Plunder, 1), "VALIDATION_INSUFFICIENT_UNITS"),
        (world.game.attack(ActorId(42), DEFENDER, BattleKind::Plunder, 1), "VALIDATION_ACTOR_NOT_FOUND"),
        (world.game.spy(DEFENDER, ATTACKER, SpyMission::Intel), "VALIDATION_INSUFFICIENT_UNITS"),
    ];
    for (result, code) in cases {
        assert!(!result.success);
        assert_eq!(result.error_code.as_deref(), Some(code), "{}", result.message);
        assert_eq!(result.data, OperationData::None);
    }

    assert_eq!(world.store.snapshot().expect("snapshot"), before);
}

#[test]
fn insufficient_turns_are_reported_after_unit_checks() {
    let tired = ActorSnapshot::new(ATTACKER, "Ariadne").with_resources(Resources {
        soldiers: 10,
        attack_turns: 2,
        ..Resources::default()
    });
    let world = world_with(Arc::new(InMemoryStore::new()), vec![tired, defender()]);

    let result = world.game.attack(ATTACKER, DEFENDER, BattleKind::Plunder, 3);
    assert_eq!(result.error_code.as_deref(), Some("VALIDATION_INSUFFICIENT_TURNS"));
    assert_eq!(world.actor(ATTACKER).resources.attack_turns, 2);
}

#[test]
fn peace_shield_blocks_without_any_cost() {
    let world = world();
    world
        .game
        .effects()
        .add_effect(DEFENDER, EffectKind::PeaceShield, 3_600, None)
        .expect("shield");
    let before = world.store.snapshot().expect("snapshot");
    let mut combat = world.game.subscribe(Topic::Combat);

    let attack = world.game.attack(ATTACKER, DEFENDER, BattleKind::Plunder, 5);
    assert!(!attack.success);
    assert_eq!(attack.error_code.as_deref(), Some("BLOCKED_PEACE_SHIELD"));

    let spy = world.game.spy(ATTACKER, DEFENDER, SpyMission::Sabotage);
    assert!(!spy.success);
    assert_eq!(spy.error_code.as_deref(), Some("BLOCKED_PEACE_SHIELD"));

    assert_eq!(world.store.snapshot().expect("snapshot"), before);
    assert!(matches!(
        combat.try_recv().expect("blocked event"),
        Event::Combat(CombatEvent::AttackBlocked { .. })
    ));
}

#[test]
fn lapsed_peace_shield_no_longer_blocks() {
    let world = world();
    world
        .game
        .effects()
        .add_effect(DEFENDER, EffectKind::PeaceShield, 60, None)
        .expect("shield");
    world.clock.advance(60);

    let result = world.game.attack(ATTACKER, DEFENDER, BattleKind::Plunder, 1);
    assert!(result.success, "{}", result.message);
}

#[test]
fn jammed_missions_cost_turns_but_leave_no_report() {
    let world = world();
    world
        .game
        .effects()
        .add_effect(DEFENDER, EffectKind::Jamming, 3_600, None)
        .expect("jamming");
    let mut espionage = world.game.subscribe(Topic::Espionage);

    let result = world.game.spy(ATTACKER, DEFENDER, SpyMission::Sabotage);
    assert!(!result.success);
    assert!(result.message.contains("critical failure"), "{}", result.message);
    assert_eq!(result.error_code.as_deref(), Some("BLOCKED_JAMMED"));
    let OperationData::Jammed { cost } = result.data else {
        panic!("expected the charged cost");
    };
    assert_eq!(cost.turns, 1);
    assert_eq!(cost.credits, 10_000);

    let a = world.actor(ATTACKER);
    assert_eq!(a.resources.attack_turns, 19);
    assert_eq!(a.resources.credits, 90_000);
    assert_eq!(a.resources.spies, 50);

    assert!(world.store.spy_reports().expect("reports").is_empty());
    assert!(world.store.notifications_for(DEFENDER).expect("notes").is_empty());
    assert!(matches!(
        espionage.try_recv().expect("jammed event"),
        Event::Espionage(EspionageEvent::MissionJammed { .. })
    ));
}

#[test]
fn successful_intel_returns_a_snapshot_of_the_target() {
    let world = world();
    let result = world.game.spy(ATTACKER, DEFENDER, SpyMission::Intel);
    assert!(result.success, "{}", result.message);

    let OperationData::Spy { report, outcome, intel } = result.data else {
        panic!("expected a spy payload");
    };
    assert!(outcome.success());
    assert_eq!(outcome.spies_lost, 1);
    assert_eq!(outcome.sentries_lost, 5);
    assert_eq!(outcome.defender_total_sentries, 10);

    let intel = intel.expect("intel on success");
    assert_eq!(intel.guards, 100);
    assert_eq!(intel.sentries, 10);
    assert_eq!(intel.credits, 10_000);
    assert_eq!(intel.defense_power, 100);

    let reports = world.store.spy_reports().expect("reports");
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].id, report);
    assert_eq!(reports[0].intel, Some(intel));

    let a = world.actor(ATTACKER);
    assert_eq!(a.resources.spies, 49);
    assert_eq!(a.resources.attack_turns, 19);
    assert_eq!(world.actor(DEFENDER).resources.sentries, 5);
    assert_eq!(world.store.notifications_for(DEFENDER).expect("notes").len(), 1);
}

#[test]
fn caught_spies_bring_back_nothing() {
    let watchful = ActorSnapshot::new(DEFENDER, "Borin").with_resources(Resources {
        sentries: 500,
        credits: 10_000,
        ..Resources::default()
    });
    let world = world_with(Arc::new(InMemoryStore::new()), vec![attacker(), watchful]);

    let result = world.game.spy(ATTACKER, DEFENDER, SpyMission::Sabotage);
    assert!(result.success);
    let OperationData::Spy { outcome, intel, .. } = result.data else {
        panic!("expected a spy payload");
    };
    assert!(!outcome.success());
    assert!(intel.is_none());
    assert_eq!(outcome.credits_destroyed, 0);
    // Ratio 10 wipes out every spy sent.
    assert_eq!(outcome.spies_lost, 50);
    assert_eq!(world.actor(DEFENDER).resources.credits, 10_000);

    let notes = world.store.notifications_for(DEFENDER).expect("notes");
    assert_eq!(notes[0].title, "Your sentries caught spies from Ariadne");
}

#[test]
fn sabotage_destroys_credits_and_blocks_protection() {
    let world = world();
    let result = world.game.spy(ATTACKER, DEFENDER, SpyMission::Sabotage);
    assert!(result.success, "{}", result.message);
    let OperationData::Spy { outcome, .. } = result.data else {
        panic!("expected a spy payload");
    };
    assert_eq!(outcome.credits_destroyed, 500);
    assert_eq!(world.actor(DEFENDER).resources.credits, 9_500);
    assert_eq!(world.actor(ATTACKER).resources.credits, 90_000);

    let block = world
        .game
        .effects()
        .active_effect(DEFENDER, EffectKind::SafehouseBlock)
        .expect("readable")
        .expect("block applied");
    assert_eq!(block.expires_at, START.plus_secs(3_600));
    assert!(block.metadata.as_deref().unwrap_or_default().contains("sabotage"));

    let purchase = world.game.purchase_effect(DEFENDER, EffectKind::PeaceShield);
    assert_eq!(purchase.error_code.as_deref(), Some("VALIDATION_SAFEHOUSE_LOCKED"));
}

#[test]
fn battles_between_warring_alliances_are_logged() {
    let store = Arc::new(InMemoryStore::new());
    store
        .declare_war(War {
            id: WarId(3),
            aggressor: AllianceId(20),
            defender: AllianceId(10),
            active: true,
        })
        .expect("war");
    let world = world_with(
        store,
        vec![
            attacker().with_alliance(AllianceId(10)),
            defender().with_alliance(AllianceId(20)),
        ],
    );

    let result = world.game.attack(ATTACKER, DEFENDER, BattleKind::Conquer, 10);
    let report = result.report_id().expect("report");

    let logs = world.store.war_logs().expect("logs");
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].war, WarId(3));
    assert_eq!(logs[0].report, report);
    assert_eq!(logs[0].attacking_alliance, AllianceId(10));
    assert_eq!(logs[0].units_killed, 50);
}

#[test]
fn battles_outside_a_war_are_not_logged() {
    let world = world_with(
        Arc::new(InMemoryStore::new()),
        vec![
            attacker().with_alliance(AllianceId(10)),
            defender().with_alliance(AllianceId(20)),
        ],
    );
    let result = world.game.attack(ATTACKER, DEFENDER, BattleKind::Conquer, 10);
    assert!(result.success);
    assert!(world.store.war_logs().expect("logs").is_empty());
}

#[test]
fn concurrent_attacks_cannot_spend_the_same_turns() {
    let world = world();
    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..2)
            .map(|_| scope.spawn(|| world.game.attack(ATTACKER, DEFENDER, BattleKind::Plunder, 10)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("attack thread"))
            .collect()
    });
    assert!(results.iter().all(|result| result.success));

    // 20 turns cover exactly two attacks; a third must fail.
    let third = world.game.attack(ATTACKER, DEFENDER, BattleKind::Plunder, 10);
    assert_eq!(third.error_code.as_deref(), Some("VALIDATION_INSUFFICIENT_TURNS"));
    assert_eq!(world.actor(ATTACKER).resources.attack_turns, 0);
    assert_eq!(world.store.battle_reports().expect("reports").len(), 2);
}
