//! Runtime facade and builder.
//!
//! [`Dominion`] owns the shared [`ServiceContext`] and exposes every
//! operation the game offers. Construct it with [`Dominion::builder`].

use std::sync::Arc;

use dominion_core::{
    ActorId, BattleKind, EffectKind, GameConfig, PowerCalculator, PowerProfile, SpyMission,
    ValidationFailure,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::broadcast;

use crate::api::{OperationResult, Result};
use crate::clock::{Clock, SystemClock};
use crate::events::{Event, EventBus, Topic};
use crate::repository::{GameStore, InMemoryStore, TxSources};
use crate::services::{AttackService, EffectService, ServiceContext, SpyService, TargetRef};

/// Runtime configuration
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Capacity of each event topic channel.
    pub event_buffer_size: usize,
    /// Seed for the casualty roll generator; entropy when `None`.
    pub rng_seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            rng_seed: None,
        }
    }
}

/// Entry point to the game operations.
pub struct Dominion {
    ctx: Arc<ServiceContext>,
    attacks: AttackService,
    spies: SpyService,
    effects: EffectService,
}

impl Dominion {
    pub fn builder() -> DominionBuilder {
        DominionBuilder::new()
    }

    pub fn config(&self) -> &GameConfig {
        &self.ctx.config
    }

    pub fn store(&self) -> &Arc<dyn GameStore> {
        &self.ctx.store
    }

    pub fn events(&self) -> &EventBus {
        &self.ctx.events
    }

    /// Subscribe to one event topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.ctx.events.subscribe(topic)
    }

    // ===== operations =====

    pub fn attack(
        &self,
        attacker: ActorId,
        target: impl Into<TargetRef>,
        kind: BattleKind,
        turns: u64,
    ) -> OperationResult {
        self.attacks.attack(attacker, target, kind, turns)
    }

    pub fn spy(
        &self,
        attacker: ActorId,
        target: impl Into<TargetRef>,
        mission: SpyMission,
    ) -> OperationResult {
        self.spies.spy(attacker, target, mission)
    }

    pub fn purchase_effect(&self, buyer: ActorId, kind: EffectKind) -> OperationResult {
        self.effects.purchase(buyer, kind)
    }

    pub fn terminate_high_risk_protocol(&self, owner: ActorId) -> OperationResult {
        self.effects.terminate_high_risk_protocol(owner)
    }

    /// Direct effect access for administrative flows and tests.
    pub fn effects(&self) -> &EffectService {
        &self.effects
    }

    /// Every power and income figure of `actor` right now.
    pub fn profile(&self, actor: ActorId) -> Result<PowerProfile> {
        let now = self.ctx.clock.now();
        let view = self.ctx.store.view()?;
        let snapshot = view.actor(actor)?.ok_or(ValidationFailure::ActorNotFound)?;
        let sources = TxSources::new(&*view);
        let profile = PowerCalculator::new(&self.ctx.config, &sources, now).profile(&snapshot)?;
        Ok(profile)
    }
}

/// Builder for [`Dominion`]
pub struct DominionBuilder {
    config: RuntimeConfig,
    game_config: Option<GameConfig>,
    store: Option<Arc<dyn GameStore>>,
    clock: Option<Arc<dyn Clock>>,
}

impl DominionBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            game_config: None,
            store: None,
            clock: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Balance configuration; [`GameConfig::standard`] when unset.
    pub fn game_config(mut self, config: GameConfig) -> Self {
        self.game_config = Some(config);
        self
    }

    /// Backing store; an empty [`InMemoryStore`] when unset.
    pub fn store(mut self, store: Arc<dyn GameStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Time source; [`SystemClock`] when unset.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Makes casualty rolls reproducible.
    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.config.rng_seed = Some(seed);
        self
    }

    pub fn build(self) -> Dominion {
        let rng = match self.config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let ctx = Arc::new(ServiceContext::new(
            self.store
                .unwrap_or_else(|| Arc::new(InMemoryStore::new())),
            Arc::new(self.game_config.unwrap_or_else(GameConfig::standard)),
            self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            EventBus::with_capacity(self.config.event_buffer_size),
            rng,
        ));

        tracing::debug!(
            seeded = self.config.rng_seed.is_some(),
            keys = ctx.config.len(),
            "dominion runtime built"
        );

        Dominion {
            attacks: AttackService::new(Arc::clone(&ctx)),
            spies: SpyService::new(Arc::clone(&ctx)),
            effects: EffectService::new(Arc::clone(&ctx)),
            ctx,
        }
    }
}
