use std::env;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::config::football::FootballApiSettings;
use crate::models::soccer::{normalize, FootballApiError, Match};
use crate::services::competitions;
use crate::services::rate_limit::RateLimiter;
use crate::utils::clock::Clock;

pub const TOKEN_ENV_VAR: &str = "FOOTBALL_DATA_API_TOKEN";

/// Client for the Football Data API v4.
///
/// Every request goes through the rate limiter first so the free-tier
/// quota holds. One instance serializes its own calls; do not fan a batch
/// out over the same instance from parallel tasks.
pub struct FootballApiClient {
    http: Client,
    base_url: String,
    token: SecretString,
    request_timeout: Duration,
    rate_limiter: RateLimiter,
    clock: Arc<dyn Clock>,
}

impl FootballApiClient {
    /// Fails with `MissingCredential` when neither the settings nor the
    /// `FOOTBALL_DATA_API_TOKEN` environment variable carry a token.
    pub fn new(
        settings: &FootballApiSettings,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, FootballApiError> {
        let token = settings
            .api_token
            .clone()
            .or_else(|| {
                env::var(TOKEN_ENV_VAR)
                    .ok()
                    .map(|raw| SecretString::new(raw.into_boxed_str()))
            })
            .ok_or(FootballApiError::MissingCredential)?;

        Ok(Self {
            http: Client::new(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token,
            request_timeout: Duration::from_secs(settings.request_timeout_seconds),
            rate_limiter: RateLimiter::new(
                Duration::from_secs(settings.rate_limit_seconds),
                clock.clone(),
            ),
            clock,
        })
    }

    /// Fetches matches for one competition within a date range. Any
    /// upstream or normalization problem fails the whole call.
    ///
    /// Defaults: `date_to` today, `date_from` a week back.
    pub async fn fetch_matches(
        &self,
        competition: &str,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<Vec<Match>, FootballApiError> {
        let competition_id = competitions::resolve(competition)?;

        let today = self.clock.now().date_naive();
        let date_to = date_to.unwrap_or(today);
        let date_from = date_from.unwrap_or(today - chrono::Duration::days(7));

        self.rate_limiter.acquire().await;

        let url = format!("{}/competitions/{}/matches", self.base_url, competition_id);
        let response = self
            .http
            .get(&url)
            .header("X-Auth-Token", self.token.expose_secret())
            .query(&[
                ("dateFrom", date_from.format("%Y-%m-%d").to_string()),
                ("dateTo", date_to.format("%Y-%m-%d").to_string()),
            ])
            .timeout(self.request_timeout)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Fetched matches for '{}': status {}", competition, status);

        // No retries: the provider rate limits aggressively, surfacing the
        // failure to the caller is the safe move.
        if status != reqwest::StatusCode::OK {
            return Err(FootballApiError::Upstream {
                status: status.as_u16(),
            });
        }

        let body: Value =
            response
                .json()
                .await
                .map_err(|e| FootballApiError::MalformedUpstreamData {
                    match_id: None,
                    reason: format!("response body is not JSON: {}", e),
                })?;

        // A missing `matches` field means an empty window, not an error
        let raw_matches = body
            .get("matches")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        tracing::info!("Found {} matches for '{}'", raw_matches.len(), competition);

        raw_matches.iter().map(normalize).collect()
    }

    /// Fetches every supported competition, skipping the ones that fail.
    ///
    /// Bulk sync favours partial progress; the targeted
    /// [`fetch_matches`](Self::fetch_matches) stays fail-fast.
    pub async fn fetch_all_matches(
        &self,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Vec<Match> {
        let mut all_matches = Vec::new();
        for name in competitions::supported() {
            match self.fetch_matches(name, date_from, date_to).await {
                Ok(mut matches) => all_matches.append(&mut matches),
                Err(e) => {
                    tracing::error!("Skipping competition '{}' during bulk fetch: {}", name, e)
                }
            }
        }
        all_matches
    }
}
