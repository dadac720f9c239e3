//! Shared-storage delivery channel
//!
//! The cross-process half of the notifier. Each broadcast writes two keys
//! into [`SharedStorage`]: the full event as JSON, and a simpler key
//! holding only the ISO timestamp for consumers that just want "something
//! changed, refetch" without parsing the payload.

use crate::error::Result;
use crate::models::TradeUpdateEvent;
use crate::notify::NotifyChannel;
use crate::storage::SharedStorage;
use async_trait::async_trait;
use std::sync::Arc;

/// Key holding the last update event as JSON
pub const TRADE_UPDATE_KEY: &str = "tradeDataLastUpdated";

/// Key holding only the last update's ISO-8601 timestamp
pub const TRADE_UPDATE_SIMPLE_KEY: &str = "tradeDataLastUpdatedSimple";

pub struct StorageChannel {
    storage: Arc<SharedStorage>,
}

impl StorageChannel {
    pub fn new(storage: Arc<SharedStorage>) -> Self {
        Self { storage }
    }

    /// Last broadcast event, as another process would read it
    pub fn last_update(&self) -> Result<Option<TradeUpdateEvent>> {
        match self.storage.get(TRADE_UPDATE_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Timestamp of the last broadcast, without parsing the payload
    pub fn last_update_timestamp(&self) -> Result<Option<String>> {
        self.storage.get(TRADE_UPDATE_SIMPLE_KEY)
    }
}

#[async_trait]
impl NotifyChannel for StorageChannel {
    fn name(&self) -> &'static str {
        "shared-storage"
    }

    async fn publish(&self, event: &TradeUpdateEvent) -> Result<()> {
        let json = serde_json::to_string(event)?;
        self.storage.set(TRADE_UPDATE_KEY, &json)?;
        self.storage.set(TRADE_UPDATE_SIMPLE_KEY, &event.timestamp)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_writes_both_keys() {
        let storage = Arc::new(SharedStorage::open_in_memory().unwrap());
        let channel = StorageChannel::new(storage.clone());

        let event = TradeUpdateEvent::trade_created("t-9", "entry-form");
        channel.publish(&event).await.unwrap();

        let stored = storage.get(TRADE_UPDATE_KEY).unwrap().unwrap();
        assert!(stored.contains("\"tradeId\":\"t-9\""));
        assert!(stored.contains("\"action\":\"trade_created\""));

        let simple = storage.get(TRADE_UPDATE_SIMPLE_KEY).unwrap().unwrap();
        assert_eq!(simple, event.timestamp);
    }

    #[tokio::test]
    async fn test_last_update_round_trips_the_event() {
        let channel = StorageChannel::new(Arc::new(SharedStorage::open_in_memory().unwrap()));
        assert!(channel.last_update().unwrap().is_none());

        let event = TradeUpdateEvent::trade_created("t-3", "entry-form");
        channel.publish(&event).await.unwrap();

        let read_back = channel.last_update().unwrap().unwrap();
        assert_eq!(read_back.trade_id, "t-3");
        assert_eq!(read_back.update_id, event.update_id);
        assert_eq!(
            channel.last_update_timestamp().unwrap().as_deref(),
            Some(event.timestamp.as_str())
        );
    }

    #[tokio::test]
    async fn test_newer_broadcast_overwrites_older() {
        let channel = StorageChannel::new(Arc::new(SharedStorage::open_in_memory().unwrap()));

        let first = TradeUpdateEvent::trade_created("t-1", "entry-form");
        let second = TradeUpdateEvent::trade_created("t-2", "entry-form");
        channel.publish(&first).await.unwrap();
        channel.publish(&second).await.unwrap();

        assert_eq!(channel.last_update().unwrap().unwrap().trade_id, "t-2");
    }
}
