//! In-memory collaborator implementations
//!
//! Deterministic stand-ins for the real backend, used by tests and the demo
//! binary. The trade store counts calls, supports failure injection, and
//! can simulate backend latency.

use crate::error::{AppError, Result};
use crate::models::{Strategy, TradePayload};
use crate::providers::{AuthProvider, Navigator, StrategyStore, TradeStore};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use uuid::Uuid;

/// Auth provider that always reports the same user (or none)
pub struct FixedAuth {
    user_id: Option<String>,
}

impl FixedAuth {
    pub fn authenticated(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    pub fn unauthenticated() -> Self {
        Self { user_id: None }
    }
}

#[async_trait]
impl AuthProvider for FixedAuth {
    async fn current_user_id(&self) -> Option<String> {
        self.user_id.clone()
    }
}

/// Strategy store backed by a fixed list
pub struct MemoryStrategyStore {
    strategies: Vec<Strategy>,
    latency: Duration,
}

impl MemoryStrategyStore {
    pub fn new(strategies: Vec<Strategy>) -> Self {
        Self {
            strategies,
            latency: Duration::ZERO,
        }
    }

    /// Simulate a slow backend, for teardown/cancellation tests
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl StrategyStore for MemoryStrategyStore {
    async fn active_strategies(&self, _user_id: &str) -> Result<Vec<Strategy>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut active: Vec<Strategy> = self
            .strategies
            .iter()
            .filter(|s| s.active)
            .cloned()
            .collect();
        active.truncate(100);

        Ok(active)
    }
}

/// Trade store that records payloads instead of persisting them
pub struct MemoryTradeStore {
    trades: Mutex<Vec<TradePayload>>,
    calls: AtomicUsize,
    fail_with: Mutex<Option<String>>,
    latency: Duration,
}

impl MemoryTradeStore {
    pub fn new() -> Self {
        Self {
            trades: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            fail_with: Mutex::new(None),
            latency: Duration::ZERO,
        }
    }

    /// Simulate a slow persistence call
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make the next create calls fail with the given message
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.fail_with.lock() = Some(message.into());
    }

    /// Number of create calls observed
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Snapshot of every payload persisted so far
    pub fn trades(&self) -> Vec<TradePayload> {
        self.trades.lock().clone()
    }
}

impl Default for MemoryTradeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TradeStore for MemoryTradeStore {
    async fn create_trade(&self, payload: &TradePayload) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if let Some(message) = self.fail_with.lock().clone() {
            return Err(AppError::Persistence(message));
        }

        let trade_id = Uuid::new_v4().to_string();
        self.trades.lock().push(payload.clone());

        Ok(trade_id)
    }
}

/// Navigator that counts dashboard visits
pub struct RecordingNavigator {
    visits: AtomicUsize,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self {
            visits: AtomicUsize::new(0),
        }
    }

    pub fn visits(&self) -> usize {
        self.visits.load(Ordering::SeqCst)
    }
}

impl Default for RecordingNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for RecordingNavigator {
    fn to_dashboard(&self) {
        self.visits.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy(id: &str, name: &str, active: bool) -> Strategy {
        Strategy {
            id: id.to_string(),
            name: name.to_string(),
            active,
            rules: vec![],
        }
    }

    #[tokio::test]
    async fn test_strategy_store_filters_inactive() {
        let store = MemoryStrategyStore::new(vec![
            strategy("a", "Breakout", true),
            strategy("b", "Retired", false),
        ]);
        let active = store.active_strategies("user").await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Breakout");
    }

    #[tokio::test]
    async fn test_strategy_store_caps_at_100() {
        let many = (0..150)
            .map(|i| strategy(&format!("id-{}", i), "S", true))
            .collect();
        let store = MemoryStrategyStore::new(many);
        let active = store.active_strategies("user").await.unwrap();
        assert_eq!(active.len(), 100);
    }

    #[tokio::test]
    async fn test_trade_store_failure_injection() {
        let store = MemoryTradeStore::new();
        store.fail_with("database is down");

        let payload = TradePayload {
            user_id: "u".to_string(),
            market: Default::default(),
            symbol: "AAPL".to_string(),
            strategy_id: None,
            trade_date: "2026-01-01".to_string(),
            side: Default::default(),
            quantity: None,
            entry_price: None,
            exit_price: None,
            pnl: None,
            entry_time: None,
            exit_time: None,
            emotional_state: None,
            notes: None,
        };

        let err = store.create_trade(&payload).await.unwrap_err();
        assert!(err.to_string().contains("database is down"));
        assert_eq!(store.calls(), 1);
        assert!(store.trades().is_empty());
    }
}
