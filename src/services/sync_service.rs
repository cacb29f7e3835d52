use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::{Acquire, PgPool};

use crate::config::football::SyncSettings;
use crate::db;
use crate::services::football_api::FootballApiClient;

#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub start_date: NaiveDate,
    pub fetched: usize,
    pub synced: usize,
    pub skipped: usize,
}

/// Pulls matches from the provider and upserts them into the store, keyed
/// by external id. Re-running over overlapping data updates rows in place.
pub struct MatchSyncService {
    pool: PgPool,
    client: Arc<FootballApiClient>,
    settings: SyncSettings,
}

impl MatchSyncService {
    pub fn new(pool: PgPool, client: Arc<FootballApiClient>, settings: SyncSettings) -> Self {
        Self {
            pool,
            client,
            settings,
        }
    }

    /// Start a lookback window before the newest stored kickoff so late
    /// score corrections are picked up; a fresh store starts from the
    /// configured default date.
    pub async fn resolve_start_date(&self) -> Result<NaiveDate, sqlx::Error> {
        let latest = db::matches::latest_kickoff(&self.pool).await?;
        Ok(start_date_for(
            latest,
            self.settings.lookback_days,
            self.settings.default_start_date,
        ))
    }

    pub async fn run(&self) -> Result<SyncReport, sqlx::Error> {
        let start_date = self.resolve_start_date().await?;
        tracing::info!("Syncing matches from {}", start_date);

        let matches = self.client.fetch_all_matches(Some(start_date), None).await;

        let mut tx = self.pool.begin().await?;
        let mut synced = 0usize;
        let mut skipped = 0usize;

        for m in &matches {
            // Savepoint per match: one bad record must not poison the batch
            let outcome: Result<(), sqlx::Error> = async {
                let mut savepoint = tx.begin().await?;
                db::matches::upsert_match_graph(&mut savepoint, m).await?;
                savepoint.commit().await?;
                Ok(())
            }
            .await;

            match outcome {
                Ok(()) => synced += 1,
                Err(e) => {
                    tracing::error!("Sync error for match {}: {}", m.match_id, e);
                    skipped += 1;
                }
            }
        }

        // One commit for the whole batch
        tx.commit().await?;

        let report = SyncReport {
            start_date,
            fetched: matches.len(),
            synced,
            skipped,
        };
        tracing::info!(
            "Database sync complete: fetched {}, synced {}, skipped {}",
            report.fetched,
            report.synced,
            report.skipped
        );
        Ok(report)
    }
}

fn start_date_for(
    latest: Option<DateTime<Utc>>,
    lookback_days: i64,
    default_start: NaiveDate,
) -> NaiveDate {
    match latest {
        Some(kickoff) => (kickoff - chrono::Duration::days(lookback_days)).date_naive(),
        None => default_start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 1).unwrap()
    }

    #[test]
    fn empty_store_starts_from_the_default_date() {
        assert_eq!(start_date_for(None, 2, default_start()), default_start());
    }

    #[test]
    fn lookback_is_subtracted_from_the_latest_kickoff() {
        let latest = DateTime::parse_from_rfc3339("2026-01-15T20:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!(
            start_date_for(Some(latest), 2, default_start()),
            NaiveDate::from_ymd_opt(2026, 1, 13).unwrap()
        );
    }
}
