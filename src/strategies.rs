//! Strategy association
//!
//! Strategies are loaded once per form session and resolved locally when
//! the user picks one. A selected strategy only exposes read-only display
//! data; the form never mutates the strategy itself.

use crate::error::Result;
use crate::form::sanitize::{sanitize_uuid, SanitizedId};
use crate::form::SessionGuard;
use crate::models::Strategy;
use crate::providers::StrategyStore;
use tracing::{debug, info, warn};

/// Read-only view of the strategy the user associated with the draft
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedStrategy {
    pub id: String,
    pub name: String,
    pub rules: Vec<String>,
}

/// The session's one-shot snapshot of the user's active strategies
pub struct StrategyCatalog {
    strategies: Vec<Strategy>,
}

impl StrategyCatalog {
    /// Load the user's strategies, discarding the result if the session was
    /// torn down while the call was in flight
    ///
    /// Returns `Ok(None)` when the guard closed during the await; a slow
    /// response must not write into a session that no longer exists.
    pub async fn load(
        store: &dyn StrategyStore,
        user_id: &str,
        guard: &SessionGuard,
    ) -> Result<Option<Self>> {
        let strategies = store.active_strategies(user_id).await?;

        if !guard.is_open() {
            debug!("Session torn down during strategy load, discarding {} strategies", strategies.len());
            return Ok(None);
        }

        info!("Loaded {} strategies for session", strategies.len());
        Ok(Some(Self { strategies }))
    }

    /// Build a catalog from an already-loaded list
    pub fn from_strategies(strategies: Vec<Strategy>) -> Self {
        Self { strategies }
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Resolve a selected strategy id against the loaded list
    ///
    /// Empty id means "no strategy". A malformed id is logged and treated
    /// as no strategy rather than passed downstream. A well-formed id that
    /// no longer matches anything (deleted concurrently) also resolves to
    /// `None`; that is a graceful degradation, not an error.
    pub fn select(&self, raw_id: &str) -> Option<SelectedStrategy> {
        let id = match sanitize_uuid(raw_id) {
            SanitizedId::Empty => return None,
            SanitizedId::Invalid => {
                warn!("Ignoring malformed strategy id {:?}", raw_id);
                return None;
            }
            SanitizedId::Valid(id) => id,
        };

        let found = self.strategies.iter().find(|s| s.id == id);
        if found.is_none() {
            debug!("Strategy {} not in the loaded catalog", id);
        }

        found.map(|s| SelectedStrategy {
            id: s.id.clone(),
            name: s.name.clone(),
            rules: s.rules.clone(),
        })
    }
}
