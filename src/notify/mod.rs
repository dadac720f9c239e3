//! Cross-view notification
//!
//! After a trade is persisted, every other open view of the application
//! must learn that its cached data is stale. The [`Notifier`] fans one
//! [`TradeUpdateEvent`] out to independent channels: an in-process channel
//! for views in the same process and a shared-storage channel that other
//! processes observe. No ordering is guaranteed between the two; consumers
//! treat either signal as "invalidate and refetch", never as a diff.

pub mod in_process;
pub mod storage;

use crate::error::Result;
use crate::models::TradeUpdateEvent;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// One delivery channel for trade update events
#[async_trait]
pub trait NotifyChannel: Send + Sync {
    /// Channel name, for diagnostics
    fn name(&self) -> &'static str;

    /// Deliver one event; zero subscribers is not a failure
    async fn publish(&self, event: &TradeUpdateEvent) -> Result<()>;
}

/// Broadcaster fanning events out to every registered channel
///
/// Channel failures are non-fatal: by the time a broadcast happens the
/// trade is already persisted, so a failed channel only means some views
/// stay stale until their next manual refresh.
pub struct Notifier {
    channels: Vec<Arc<dyn NotifyChannel>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            channels: Vec::new(),
        }
    }

    pub fn with_channel(mut self, channel: Arc<dyn NotifyChannel>) -> Self {
        self.channels.push(channel);
        self
    }

    /// Deliver the event to every channel, logging failures
    pub async fn broadcast(&self, event: &TradeUpdateEvent) {
        for channel in &self.channels {
            if let Err(e) = channel.publish(event).await {
                warn!(
                    "Notify channel '{}' failed for update {}: {}",
                    channel.name(),
                    event.update_id,
                    e
                );
            }
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Deduplicates double-delivered updates by `update_id`
///
/// A view subscribed to both channels may observe the same broadcast twice;
/// only the first sighting of an id should trigger a refetch.
pub struct UpdateDeduper {
    seen: DashMap<Uuid, ()>,
}

impl UpdateDeduper {
    pub fn new() -> Self {
        Self {
            seen: DashMap::new(),
        }
    }

    /// True exactly once per update id
    pub fn first_sighting(&self, update_id: Uuid) -> bool {
        self.seen.insert(update_id, ()).is_none()
    }
}

impl Default for UpdateDeduper {
    fn default() -> Self {
        Self::new()
    }
}
