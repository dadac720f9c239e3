//! Trade-entry form session
//!
//! The [`FormSession`] owns the draft for exactly one open trade-entry
//! form: the draft, the session's strategy catalog, and the reactive
//! derived values (duration, estimated P&L). It exists from form open until
//! submit-success or navigation away.

pub mod duration;
pub mod numeric;
pub mod pnl;
pub mod sanitize;

use crate::error::Result;
use crate::models::{EmotionInput, TradeDraft};
use crate::pipeline::{SubmissionOutcome, SubmissionPipeline};
use crate::providers::StrategyStore;
use crate::strategies::{SelectedStrategy, StrategyCatalog};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Session-scoped cancellation token
///
/// Cloned into async work started by the session; checked after every await
/// so a response arriving after teardown cannot write into a session that
/// no longer exists.
#[derive(Clone)]
pub struct SessionGuard {
    open: Arc<AtomicBool>,
}

impl SessionGuard {
    pub fn new() -> Self {
        Self {
            open: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    /// Mark the session torn down; in-flight work discards its result
    pub fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
    }
}

impl Default for SessionGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// One open trade-entry form
pub struct FormSession {
    draft: TradeDraft,
    catalog: Option<StrategyCatalog>,
    selected: Option<SelectedStrategy>,
    show_rules: bool,
    guard: SessionGuard,
}

impl FormSession {
    /// Open a fresh session with an empty draft dated today
    pub fn new() -> Self {
        Self {
            draft: TradeDraft::new(),
            catalog: None,
            selected: None,
            show_rules: false,
            guard: SessionGuard::new(),
        }
    }

    pub fn draft(&self) -> &TradeDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut TradeDraft {
        &mut self.draft
    }

    pub fn guard(&self) -> SessionGuard {
        self.guard.clone()
    }

    /// Tear the session down; any still-running load discards its result
    pub fn teardown(&mut self) {
        self.guard.close();
    }

    /// One-shot strategy load at session start
    pub async fn load_strategies(
        &mut self,
        store: &dyn StrategyStore,
        user_id: &str,
    ) -> Result<()> {
        if let Some(catalog) = StrategyCatalog::load(store, user_id, &self.guard).await? {
            self.catalog = Some(catalog);
        }

        Ok(())
    }

    pub fn catalog(&self) -> Option<&StrategyCatalog> {
        self.catalog.as_ref()
    }

    /// Associate the draft with a strategy (or clear the association)
    ///
    /// Always collapses the rules display: a newly selected strategy starts
    /// with its rules hidden.
    pub fn select_strategy(&mut self, raw_id: &str) -> Option<&SelectedStrategy> {
        self.show_rules = false;
        self.draft.strategy_id = raw_id.to_string();
        self.selected = self.catalog.as_ref().and_then(|c| c.select(raw_id));
        self.selected.as_ref()
    }

    pub fn selected_strategy(&self) -> Option<&SelectedStrategy> {
        self.selected.as_ref()
    }

    pub fn show_rules(&self) -> bool {
        self.show_rules
    }

    pub fn toggle_rules(&mut self) -> bool {
        self.show_rules = !self.show_rules;
        self.show_rules
    }

    /// Replace the emotion tags from the input widget, whichever shape it
    /// reported them in
    pub fn set_emotions(&mut self, input: EmotionInput) {
        self.draft.emotional_state = input.into_tags();
    }

    /// Derived trade duration for display; re-derived on every edit
    pub fn duration_display(&self) -> Option<String> {
        duration::trade_duration(
            self.draft.entry_time.as_deref(),
            self.draft.exit_time.as_deref(),
        )
    }

    /// Derived P&L estimate for display; never overwrites the manual field
    pub fn estimated_pnl(&self) -> f64 {
        pnl::estimate_pnl(
            parse_lenient(&self.draft.entry_price),
            parse_lenient(&self.draft.exit_price),
            parse_lenient(&self.draft.quantity),
            self.draft.side,
            &self.draft.pnl,
        )
    }

    /// Submit the draft through the pipeline
    ///
    /// On success the draft is destroyed and replaced with a fresh one;
    /// this is the only path from draft to persisted trade.
    pub async fn submit(&mut self, pipeline: &SubmissionPipeline) -> Result<SubmissionOutcome> {
        let outcome = pipeline.submit(&self.draft, None).await?;

        if matches!(outcome, SubmissionOutcome::Created { .. }) {
            self.draft = TradeDraft::new();
            self.selected = None;
            self.show_rules = false;
        }

        Ok(outcome)
    }
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Reactive display parse: a field mid-edit is simply "not a number yet"
fn parse_lenient(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
