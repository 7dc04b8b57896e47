//! Shared world setup for the runtime integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use dominion_core::{ActorId, ActorSnapshot, GameConfig, Resources, Timestamp};
use dominion_runtime::{Dominion, FixedClock, InMemoryStore};

pub const ATTACKER: ActorId = ActorId(1);
pub const DEFENDER: ActorId = ActorId(2);
pub const START: Timestamp = Timestamp(1_700_000_000);

pub struct World {
    pub game: Dominion,
    pub store: Arc<InMemoryStore>,
    pub clock: Arc<FixedClock>,
}

impl World {
    pub fn actor(&self, id: ActorId) -> ActorSnapshot {
        self.store
            .actor(id)
            .expect("store readable")
            .expect("actor seeded")
    }
}

/// Standard balance without casualty jitter, so losses are exact.
pub fn steady_config() -> GameConfig {
    GameConfig::standard()
        .with("combat.casualty_variance", 0.0)
        .with("espionage.casualty_variance", 0.0)
}

pub fn attacker() -> ActorSnapshot {
    ActorSnapshot::new(ATTACKER, "Ariadne").with_resources(Resources {
        credits: 100_000,
        soldiers: 500,
        spies: 50,
        attack_turns: 20,
        ..Resources::default()
    })
}

pub fn defender() -> ActorSnapshot {
    ActorSnapshot::new(DEFENDER, "Borin").with_resources(Resources {
        credits: 10_000,
        guards: 100,
        sentries: 10,
        ..Resources::default()
    })
}

pub fn world_with(store: Arc<InMemoryStore>, actors: Vec<ActorSnapshot>) -> World {
    for actor in actors {
        store.insert_actor(actor).expect("seed actor");
    }
    let clock = Arc::new(FixedClock::new(START));
    let game = Dominion::builder()
        .game_config(steady_config())
        .store(store.clone())
        .clock(clock.clone())
        .rng_seed(7)
        .build();
    World { game, store, clock }
}

pub fn world() -> World {
    world_with(Arc::new(InMemoryStore::new()), vec![attacker(), defender()])
}
