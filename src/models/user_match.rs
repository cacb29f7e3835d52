use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Join row between a user and a match. At most one exists per
/// (user, match) pair; marking again updates the row in place.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserMatch {
    pub id: Uuid,
    pub user_id: Uuid,
    pub match_id: Uuid,
    pub is_done: bool,
    pub notes: Option<String>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct MarkDoneRequest {
    pub user_id: Uuid,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Response keyed by the match's external id, like the rest of the API.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserMatchResponse {
    pub user_id: Uuid,
    pub match_id: i64,
    pub is_done: bool,
    pub notes: Option<String>,
}
