//! Trade submission pipeline
//!
//! Orchestrates validation, sanitization, the persistence call, and the
//! post-success broadcast as one atomic user action. Exactly one submission
//! may be in flight at a time; a second trigger while one is running is the
//! double-click case and performs no work at all.

use crate::error::{AppError, Result};
use crate::form::numeric::{validate_numeric_fields, RequiredFields};
use crate::form::sanitize::{sanitize_uuid, SanitizedId};
use crate::models::{TradeDraft, TradePayload, TradeUpdateEvent};
use crate::notify::Notifier;
use crate::providers::{AuthProvider, Navigator, TradeStore};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Where the pipeline currently is in a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Sanitizing,
    Persisting,
    Notifying,
}

/// Result of one submission attempt
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Trade persisted and broadcast
    Created { trade_id: String },
    /// Input errors; user corrects the fields and resubmits
    Rejected { errors: Vec<String> },
    /// Another submission was already in flight; nothing was done
    Busy,
}

/// Callback invoked with the created trade id on success
pub type SuccessCallback = Box<dyn FnOnce(&str) + Send>;

pub struct SubmissionPipeline {
    auth: Arc<dyn AuthProvider>,
    trades: Arc<dyn TradeStore>,
    notifier: Arc<Notifier>,
    navigator: Option<Arc<dyn Navigator>>,
    state: RwLock<SubmissionState>,
    in_flight: AtomicBool,
    /// Tag stamped into every broadcast event's `source` field
    source: String,
}

impl SubmissionPipeline {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        trades: Arc<dyn TradeStore>,
        notifier: Arc<Notifier>,
    ) -> Self {
        Self {
            auth,
            trades,
            notifier,
            navigator: None,
            state: RwLock::new(SubmissionState::Idle),
            in_flight: AtomicBool::new(false),
            source: "trade-entry-form".to_string(),
        }
    }

    /// Navigation target for successful submissions without a callback
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn state(&self) -> SubmissionState {
        *self.state.read()
    }

    /// Submit a draft: validate, sanitize, persist, notify
    ///
    /// Validation failures come back as `Rejected` with every error listed;
    /// identity and persistence failures are `Err`. Either way the pipeline
    /// returns to `Idle` and the user may try again; nothing is retried
    /// automatically.
    pub async fn submit(
        &self,
        draft: &TradeDraft,
        on_success: Option<SuccessCallback>,
    ) -> Result<SubmissionOutcome> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("Submission already in flight, ignoring trigger");
            return Ok(SubmissionOutcome::Busy);
        }
        let _flight = FlightGuard { pipeline: self };

        // An unauthenticated user aborts before any other work
        let raw_user_id = self
            .auth
            .current_user_id()
            .await
            .ok_or_else(|| AppError::Auth("Not authenticated".to_string()))?;

        *self.state.write() = SubmissionState::Validating;

        let mut errors = Vec::new();
        if draft.symbol.trim().is_empty() {
            errors.push("Symbol is required".to_string());
        }

        let validation = validate_numeric_fields(
            &draft.quantity,
            &draft.entry_price,
            &draft.exit_price,
            &draft.pnl,
            RequiredFields::default(),
        );
        errors.extend(validation.errors);

        if !errors.is_empty() {
            info!("Submission rejected with {} input errors", errors.len());
            return Ok(SubmissionOutcome::Rejected { errors });
        }

        *self.state.write() = SubmissionState::Sanitizing;

        let user_id = match sanitize_uuid(&raw_user_id) {
            SanitizedId::Valid(id) => id,
            SanitizedId::Empty | SanitizedId::Invalid => {
                return Err(AppError::Auth("Invalid user identity".to_string()));
            }
        };

        // A malformed strategy reference is optional: downgrade, don't block
        let strategy_id = match sanitize_uuid(&draft.strategy_id) {
            SanitizedId::Valid(id) => Some(id),
            SanitizedId::Empty => None,
            SanitizedId::Invalid => {
                warn!("Malformed strategy id on draft, submitting without a strategy");
                None
            }
        };

        let payload = TradePayload {
            user_id,
            market: draft.market,
            symbol: draft.symbol.trim().to_string(),
            strategy_id,
            trade_date: draft.date.clone(),
            side: draft.side,
            quantity: validation.data.quantity,
            entry_price: validation.data.entry_price,
            exit_price: validation.data.exit_price,
            pnl: validation.data.pnl,
            entry_time: draft.entry_time.clone(),
            exit_time: draft.exit_time.clone(),
            emotional_state: if draft.emotional_state.is_empty() {
                None
            } else {
                Some(draft.emotional_state.clone())
            },
            notes: if draft.notes.trim().is_empty() {
                None
            } else {
                Some(draft.notes.clone())
            },
        };

        *self.state.write() = SubmissionState::Persisting;

        let trade_id = match self.trades.create_trade(&payload).await {
            Ok(id) => id,
            Err(e) => {
                error!("Failed to persist trade: {}", e);
                return Err(e);
            }
        };

        *self.state.write() = SubmissionState::Notifying;

        let event = TradeUpdateEvent::trade_created(&trade_id, &self.source);
        self.notifier.broadcast(&event).await;

        match on_success {
            Some(callback) => callback(&trade_id),
            None => {
                if let Some(navigator) = &self.navigator {
                    navigator.to_dashboard();
                }
            }
        }

        info!("Trade {} created and broadcast as update {}", trade_id, event.update_id);
        Ok(SubmissionOutcome::Created { trade_id })
    }
}

/// Releases the single-flight flag on every exit path
struct FlightGuard<'a> {
    pipeline: &'a SubmissionPipeline,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        *self.pipeline.state.write() = SubmissionState::Idle;
        self.pipeline.in_flight.store(false, Ordering::SeqCst);
    }
}
