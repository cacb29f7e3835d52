use chrono::NaiveDate;
use secrecy::SecretString;

/// Settings for the Football Data API client.
///
/// The token is optional here because it usually arrives through the
/// `FOOTBALL_DATA_API_TOKEN` environment variable rather than a config file;
/// client construction fails if neither source provides one.
#[derive(serde::Deserialize, Debug, Clone)]
pub struct FootballApiSettings {
    pub base_url: String,
    #[serde(default)]
    pub api_token: Option<SecretString>,
    pub rate_limit_seconds: u64,
    pub request_timeout_seconds: u64,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct SyncSettings {
    /// Cron expression for the background sync job.
    pub schedule: String,
    /// Days subtracted from the newest stored kickoff so late score
    /// corrections are re-fetched.
    pub lookback_days: i64,
    /// Start date used when the store holds no matches yet.
    pub default_start_date: NaiveDate,
}
