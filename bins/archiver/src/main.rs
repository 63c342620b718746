//! Archives completed travel plans whose trip ended before a cutoff.
//!
//! Usage:
//!   archiver               - Cutoff is today minus `ledger.archive_retention_days`
//!   archiver 2026-01-01    - Explicit cutoff date
//!
//! Plans changed while the run is in progress are skipped and picked up next time.

use std::sync::Arc;

use anyhow::Context;
use chrono::{NaiveDate, TimeDelta, Utc};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use journey_core::travel_log::NoFriendships;
use journey_db::{TripLedgerRepository, connect};
use journey_shared::AppConfig;

/// Cutoff date for a retention window ending today.
fn retention_cutoff(today: NaiveDate, retention_days: i64) -> anyhow::Result<NaiveDate> {
    TimeDelta::try_days(retention_days.max(0))
        .and_then(|window| today.checked_sub_signed(window))
        .with_context(|| format!("archive_retention_days {retention_days} is out of range"))
}

fn parse_cutoff(
    arg: Option<String>,
    today: NaiveDate,
    retention_days: i64,
) -> anyhow::Result<NaiveDate> {
    match arg {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .with_context(|| format!("invalid cutoff date {raw:?}, expected YYYY-MM-DD")),
        None => retention_cutoff(today, retention_days),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "journey=info,archiver=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    let cutoff = parse_cutoff(
        std::env::args().nth(1),
        Utc::now().date_naive(),
        config.ledger.archive_retention_days,
    )?;

    let db = connect(&config.database.url)
        .await
        .context("failed to connect to database")?;
    let ledger = TripLedgerRepository::new(
        db,
        config.ledger.default_currency,
        Arc::new(NoFriendships),
    );

    info!(%cutoff, "Archiving completed plans");
    let report = ledger.archive_completed_before(cutoff).await?;
    info!(
        archived = report.archived.len(),
        skipped = report.skipped.len(),
        "Archive run finished"
    );

    Ok(())
}
