//! Core data types for trade entry and cross-view notification

use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Market segment a trade belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    #[default]
    Stock,
    Crypto,
    Forex,
    Futures,
}

/// Trade direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    #[default]
    Buy,
    Sell,
}

/// In-progress, unsaved state of the trade-entry form
///
/// Owned exclusively by the active form session. Numeric fields stay as the
/// raw user-entered strings until validation; they become numbers only in
/// the submission payload.
#[derive(Debug, Clone)]
pub struct TradeDraft {
    pub market: Market,
    pub symbol: String,
    /// Empty string means "no strategy"
    pub strategy_id: String,
    pub side: Side,
    pub quantity: String,
    pub entry_price: String,
    pub exit_price: String,
    pub pnl: String,
    /// `HH:MM` 24-hour time of day, independent of `date`
    pub entry_time: Option<String>,
    pub exit_time: Option<String>,
    pub emotional_state: Vec<String>,
    pub notes: String,
    /// Calendar date `YYYY-MM-DD`
    pub date: String,
}

impl TradeDraft {
    /// Create an empty draft dated today
    pub fn new() -> Self {
        Self {
            market: Market::default(),
            symbol: String::new(),
            strategy_id: String::new(),
            side: Side::default(),
            quantity: String::new(),
            entry_price: String::new(),
            exit_price: String::new(),
            pnl: String::new(),
            entry_time: None,
            exit_time: None,
            emotional_state: Vec::new(),
            notes: String::new(),
            date: Local::now().date_naive().to_string(),
        }
    }
}

impl Default for TradeDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// User-defined strategy, read-only from the form's perspective
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Strategy {
    pub id: String,
    pub name: String,
    pub active: bool,
    pub rules: Vec<String>,
}

/// Numeric form fields after validation, `None` where the field was empty
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ValidatedNumbers {
    pub quantity: Option<f64>,
    pub entry_price: Option<f64>,
    pub exit_price: Option<f64>,
    pub pnl: Option<f64>,
}

/// Outcome of validating the numeric form fields
///
/// Produced fresh on every submission attempt, never persisted. `errors`
/// lists every failing field in field order.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub data: ValidatedNumbers,
}

/// Trade payload sent to the persistence collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradePayload {
    pub user_id: String,
    pub market: Market,
    pub symbol: String,
    pub strategy_id: Option<String>,
    pub trade_date: String,
    pub side: Side,
    pub quantity: Option<f64>,
    pub entry_price: Option<f64>,
    pub exit_price: Option<f64>,
    pub pnl: Option<f64>,
    pub entry_time: Option<String>,
    pub exit_time: Option<String>,
    pub emotional_state: Option<Vec<String>>,
    pub notes: Option<String>,
}

/// Broadcast-only event announcing a successful trade creation
///
/// Serialized with camelCase keys because other views parse the stored
/// JSON. Constructed once per successful persistence write, delivered to
/// zero or more listeners, then discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeUpdateEvent {
    pub trade_id: String,
    /// ISO-8601 creation time of the event itself
    pub timestamp: String,
    pub action: String,
    /// Unique per broadcast; lets listeners deduplicate double delivery
    pub update_id: Uuid,
    pub source: String,
}

impl TradeUpdateEvent {
    pub const ACTION_TRADE_CREATED: &'static str = "trade_created";

    /// Build a `trade_created` event for a freshly persisted trade
    pub fn trade_created(trade_id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            trade_id: trade_id.into(),
            timestamp: Utc::now().to_rfc3339(),
            action: Self::ACTION_TRADE_CREATED.to_string(),
            update_id: Uuid::new_v4(),
            source: source.into(),
        }
    }
}

/// Emotion tags as supplied by the input widget
///
/// The widget reports either an ordered list of selected tags or a map of
/// tag to selected-flag. Both shapes normalize to an ordered list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EmotionInput {
    Tags(Vec<String>),
    Flags(BTreeMap<String, bool>),
}

impl EmotionInput {
    /// Normalize to the canonical ordered-list representation
    pub fn into_tags(self) -> Vec<String> {
        match self {
            EmotionInput::Tags(tags) => tags,
            EmotionInput::Flags(flags) => flags
                .into_iter()
                .filter(|(_, selected)| *selected)
                .map(|(tag, _)| tag)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_defaults_to_stock_and_today() {
        let draft = TradeDraft::new();
        assert_eq!(draft.market, Market::Stock);
        assert_eq!(draft.date, Local::now().date_naive().to_string());
        assert!(draft.strategy_id.is_empty());
    }

    #[test]
    fn test_emotion_input_list_passes_through() {
        let input = EmotionInput::Tags(vec!["calm".to_string(), "focused".to_string()]);
        assert_eq!(input.into_tags(), vec!["calm", "focused"]);
    }

    #[test]
    fn test_emotion_input_flags_keep_only_selected() {
        let input: EmotionInput =
            serde_json::from_str(r#"{"anxious": true, "calm": false, "greedy": true}"#).unwrap();
        assert_eq!(input.into_tags(), vec!["anxious", "greedy"]);
    }

    #[test]
    fn test_event_serializes_camel_case() {
        let event = TradeUpdateEvent::trade_created("t-1", "entry-form");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["tradeId"], "t-1");
        assert_eq!(json["action"], "trade_created");
        assert!(json["updateId"].is_string());
        assert!(json.get("trade_id").is_none());
    }

    #[test]
    fn test_market_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Market::Futures).unwrap(), "\"futures\"");
        assert_eq!(serde_json::to_string(&Side::Sell).unwrap(), "\"Sell\"");
    }
}
