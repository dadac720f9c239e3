//! In-process delivery channel
//!
//! Fans events out to views living in the same process over a tokio
//! broadcast channel. Subscribers that existed before the broadcast receive
//! the full event payload; a channel with no subscribers drops the event,
//! which is fine — there was nobody to invalidate.

use crate::error::Result;
use crate::models::TradeUpdateEvent;
use crate::notify::NotifyChannel;
use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::debug;

pub struct InProcessChannel {
    sender: broadcast::Sender<TradeUpdateEvent>,
}

impl InProcessChannel {
    /// Create a channel buffering up to `capacity` undelivered events
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Register a same-process listener
    pub fn subscribe(&self) -> broadcast::Receiver<TradeUpdateEvent> {
        self.sender.subscribe()
    }
}

#[async_trait]
impl NotifyChannel for InProcessChannel {
    fn name(&self) -> &'static str {
        "in-process"
    }

    async fn publish(&self, event: &TradeUpdateEvent) -> Result<()> {
        if self.sender.send(event.clone()).is_err() {
            debug!("No in-process listeners for update {}", event.update_id);
        }

        Ok(())
    }
}
