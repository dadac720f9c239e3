//! External collaborator contracts
//!
//! The journal core does not own authentication, strategy storage, trade
//! persistence, or navigation. It consumes them through these traits; the
//! application supplies real implementations, tests and the demo binary use
//! [`memory`].

pub mod memory;

use crate::error::Result;
use crate::models::{Strategy, TradePayload};
use async_trait::async_trait;

/// Provider of the authenticated user's identity
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Current user's identifier, or `None` when unauthenticated
    async fn current_user_id(&self) -> Option<String>;
}

/// Read-only store of the user's strategies
#[async_trait]
pub trait StrategyStore: Send + Sync {
    /// Active strategies belonging to the user, at most 100
    async fn active_strategies(&self, user_id: &str) -> Result<Vec<Strategy>>;
}

/// Trade persistence collaborator
///
/// The submission pipeline is the only code path that calls this; a trade
/// either exists after the call or it does not, there is no partial state.
#[async_trait]
pub trait TradeStore: Send + Sync {
    /// Persist a trade, returning the created trade's identifier
    async fn create_trade(&self, payload: &TradePayload) -> Result<String>;
}

/// Navigation target invoked after a successful submission when the caller
/// supplied no explicit success callback
pub trait Navigator: Send + Sync {
    fn to_dashboard(&self);
}
