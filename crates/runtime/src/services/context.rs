//! Shared dependencies of the services.

use std::sync::{Arc, Mutex, PoisonError};

use dominion_core::{
    ActorId, ActorSnapshot, CasualtyRoll, ErrorContext, GameConfig, GameError,
};
use rand::rngs::StdRng;

use crate::api::{OperationError, OperationResult};
use crate::clock::Clock;
use crate::events::EventBus;
use crate::repository::{GameStore, StoreReader};

/// Everything a service needs, shared by all of them.
pub struct ServiceContext {
    pub store: Arc<dyn GameStore>,
    pub config: Arc<GameConfig>,
    pub clock: Arc<dyn Clock>,
    pub events: EventBus,
    rng: Mutex<StdRng>,
}

impl ServiceContext {
    pub fn new(
        store: Arc<dyn GameStore>,
        config: Arc<GameConfig>,
        clock: Arc<dyn Clock>,
        events: EventBus,
        rng: StdRng,
    ) -> Self {
        Self {
            store,
            config,
            clock,
            events,
            rng: Mutex::new(rng),
        }
    }

    /// Draws a casualty jitter factor.
    pub(crate) fn roll(&self, variance: f64) -> CasualtyRoll {
        // A poisoned generator is still a valid generator.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        CasualtyRoll::draw(&mut *rng, variance)
    }

    /// Logs a failed operation and turns it into the uniform result.
    pub(crate) fn fail(&self, context: &ErrorContext, err: OperationError) -> OperationResult {
        let severity = err.severity();
        if severity.is_internal() {
            tracing::warn!(
                operation = context.operation,
                actor = ?context.actor,
                target = ?context.target,
                code = err.error_code(),
                "operation rolled back: {}",
                err
            );
        } else {
            tracing::debug!(
                operation = context.operation,
                actor = ?context.actor,
                target = ?context.target,
                code = err.error_code(),
                severity = severity.as_str(),
                "operation rejected: {}",
                err
            );
        }
        OperationResult::from_error(&err)
    }
}

/// Target of an operation, by id or by character name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetRef {
    Id(ActorId),
    Name(String),
}

impl TargetRef {
    pub(crate) fn resolve<R: StoreReader + ?Sized>(
        &self,
        tx: &R,
    ) -> Result<Option<ActorSnapshot>, OperationError> {
        Ok(match self {
            Self::Id(id) => tx.actor(*id)?,
            Self::Name(name) => tx.actor_by_name(name)?,
        })
    }
}

impl From<ActorId> for TargetRef {
    fn from(id: ActorId) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for TargetRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for TargetRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}
