//! Demo binary: wires the in-memory collaborators together, submits one
//! trade, and shows the broadcast arriving on both channels.

use journal_core::error::Result;
use journal_core::form::FormSession;
use journal_core::models::Strategy;
use journal_core::notify::in_process::InProcessChannel;
use journal_core::notify::storage::StorageChannel;
use journal_core::notify::Notifier;
use journal_core::pipeline::{SubmissionOutcome, SubmissionPipeline};
use journal_core::providers::memory::{FixedAuth, MemoryStrategyStore, MemoryTradeStore};
use journal_core::storage::SharedStorage;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USER_ID: &str = "550e8400-e29b-41d4-a716-446655440000";
const STRATEGY_ID: &str = "6fa459ea-ee8a-3ca4-894e-db77e160355e";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "journal_core=debug,journal_demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting journal demo...");

    let auth = Arc::new(FixedAuth::authenticated(USER_ID));
    let strategies = MemoryStrategyStore::new(vec![Strategy {
        id: STRATEGY_ID.to_string(),
        name: "Opening Range Breakout".to_string(),
        active: true,
        rules: vec![
            "Wait for the first 15 minutes".to_string(),
            "Enter on a break of the range high".to_string(),
        ],
    }]);
    let trades = Arc::new(MemoryTradeStore::new());

    let shared = Arc::new(SharedStorage::open(
        &std::env::temp_dir().join("journal-demo.db"),
    )?);
    let in_process = Arc::new(InProcessChannel::new(16));
    let storage_channel = Arc::new(StorageChannel::new(shared));
    let mut dashboard_view = in_process.subscribe();

    let notifier = Notifier::new()
        .with_channel(in_process.clone())
        .with_channel(storage_channel.clone());
    let pipeline = SubmissionPipeline::new(auth, trades, Arc::new(notifier));

    let mut session = FormSession::new();
    session.load_strategies(&strategies, USER_ID).await?;

    if let Some(selected) = session.select_strategy(STRATEGY_ID) {
        tracing::info!("Selected strategy '{}' with {} rules", selected.name, selected.rules.len());
    }

    let draft = session.draft_mut();
    draft.symbol = "AAPL".to_string();
    draft.quantity = "10".to_string();
    draft.entry_price = "100".to_string();
    draft.exit_price = "110".to_string();
    draft.pnl = "100".to_string();
    draft.entry_time = Some("09:30".to_string());
    draft.exit_time = Some("11:45".to_string());

    tracing::info!(
        "Derived duration: {:?}, estimated P&L: {}",
        session.duration_display(),
        session.estimated_pnl()
    );

    match session.submit(&pipeline).await? {
        SubmissionOutcome::Created { trade_id } => {
            tracing::info!("Trade {} created", trade_id);
        }
        SubmissionOutcome::Rejected { errors } => {
            for error in errors {
                tracing::warn!("Input error: {}", error);
            }
            return Ok(());
        }
        SubmissionOutcome::Busy => unreachable!("no concurrent submission in the demo"),
    }

    let event = dashboard_view
        .recv()
        .await
        .map_err(|e| journal_core::error::AppError::Internal(e.to_string()))?;
    tracing::info!("Dashboard view observed update {}", event.update_id);

    if let Some(timestamp) = storage_channel.last_update_timestamp()? {
        tracing::info!("Other processes see tradeDataLastUpdatedSimple = {}", timestamp);
    }

    Ok(())
}
