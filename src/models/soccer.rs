use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error as ThisError;

// Error types for the Football Data client and normalization layer
#[derive(Debug, ThisError)]
pub enum FootballApiError {
    #[error("unknown competition '{name}', supported competitions: {supported:?}")]
    UnknownCompetition {
        name: String,
        supported: Vec<&'static str>,
    },

    #[error("no Football Data API token configured, set FOOTBALL_DATA_API_TOKEN")]
    MissingCredential,

    #[error("upstream responded with status {status}")]
    Upstream { status: u16 },

    #[error("upstream request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed upstream data for match {match_id:?}: {reason}")]
    MalformedUpstreamData {
        match_id: Option<i64>,
        reason: String,
    },
}

/// A team as assigned by the provider. `id` is the provider's external id,
/// stable across syncs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub short_name: Option<String>,
    pub tla: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competition {
    pub id: i64,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorePair {
    pub home: Option<i64>,
    pub away: Option<i64>,
}

/// Score block as the provider sends it. Fields the provider adds later
/// (e.g. an extra-time pair) land in `extra` and survive a
/// parse -> store -> serialize round trip untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub winner: Option<String>,
    pub duration: String,
    pub full_time: ScorePair,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub half_time: Option<ScorePair>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Provider match status. Unrecognized values are carried through as-is
/// instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchStatus {
    Scheduled,
    Timed,
    InPlay,
    Paused,
    Finished,
    Postponed,
    Suspended,
    Cancelled,
    Other(String),
}

impl MatchStatus {
    pub fn as_str(&self) -> &str {
        match self {
            MatchStatus::Scheduled => "SCHEDULED",
            MatchStatus::Timed => "TIMED",
            MatchStatus::InPlay => "IN_PLAY",
            MatchStatus::Paused => "PAUSED",
            MatchStatus::Finished => "FINISHED",
            MatchStatus::Postponed => "POSTPONED",
            MatchStatus::Suspended => "SUSPENDED",
            MatchStatus::Cancelled => "CANCELLED",
            MatchStatus::Other(value) => value,
        }
    }
}

impl From<&str> for MatchStatus {
    fn from(value: &str) -> Self {
        match value {
            "SCHEDULED" => MatchStatus::Scheduled,
            "TIMED" => MatchStatus::Timed,
            "IN_PLAY" => MatchStatus::InPlay,
            "PAUSED" => MatchStatus::Paused,
            "FINISHED" => MatchStatus::Finished,
            "POSTPONED" => MatchStatus::Postponed,
            "SUSPENDED" => MatchStatus::Suspended,
            "CANCELLED" => MatchStatus::Cancelled,
            other => MatchStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for MatchStatus {
    fn from(value: String) -> Self {
        MatchStatus::from(value.as_str())
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for MatchStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MatchStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(value.into())
    }
}

/// The master structure for a match. `match_id` is the provider's external
/// id, the idempotency key for sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub match_id: i64,
    pub utc_date: DateTime<Utc>,
    pub status: MatchStatus,
    pub home_team: Team,
    pub away_team: Team,
    pub competition: Competition,
    pub score: Score,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMatch {
    id: i64,
    utc_date: String,
    status: MatchStatus,
    home_team: RawTeam,
    away_team: RawTeam,
    competition: RawCompetition,
    score: Score,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTeam {
    id: i64,
    name: String,
    #[serde(default)]
    short_name: Option<String>,
    #[serde(default)]
    tla: Option<String>,
}

#[derive(Deserialize)]
struct RawCompetition {
    id: i64,
    name: String,
    code: String,
}

impl From<RawTeam> for Team {
    fn from(raw: RawTeam) -> Self {
        Team {
            id: raw.id,
            name: raw.name,
            short_name: raw.short_name,
            tla: raw.tla,
        }
    }
}

impl From<RawCompetition> for Competition {
    fn from(raw: RawCompetition) -> Self {
        Competition {
            id: raw.id,
            name: raw.name,
            code: raw.code,
        }
    }
}

/// Builds a validated [`Match`] out of one raw provider match object.
///
/// Home and away are taken from the payload keys, never from field order.
pub fn normalize(raw: &Value) -> Result<Match, FootballApiError> {
    let match_id = raw.get("id").and_then(Value::as_i64);
    let malformed = |reason: String| FootballApiError::MalformedUpstreamData { match_id, reason };

    let parsed: RawMatch =
        serde_json::from_value(raw.clone()).map_err(|e| malformed(e.to_string()))?;

    let utc_date = parse_utc_date(&parsed.utc_date).map_err(&malformed)?;

    if parsed.home_team.id == parsed.away_team.id {
        return Err(malformed(format!(
            "home and away team share id {}",
            parsed.home_team.id
        )));
    }

    Ok(Match {
        match_id: parsed.id,
        utc_date,
        status: parsed.status,
        home_team: parsed.home_team.into(),
        away_team: parsed.away_team.into(),
        competition: parsed.competition.into(),
        score: parsed.score,
    })
}

fn parse_utc_date(value: &str) -> Result<DateTime<Utc>, String> {
    let parsed = DateTime::parse_from_rfc3339(value)
        .map_err(|e| format!("utcDate '{}' is not a valid timestamp: {}", value, e))?;
    if parsed.offset().local_minus_utc() != 0 {
        return Err(format!("utcDate '{}' does not carry a UTC offset", value));
    }
    Ok(parsed.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn arsenal_chelsea() -> Value {
        json!({
            "id": 123456,
            "utcDate": "2024-01-15T15:30:00Z",
            "status": "FINISHED",
            "homeTeam": {"id": 674, "name": "Arsenal FC", "shortName": "Arsenal", "tla": "ARS"},
            "awayTeam": {"id": 3929, "name": "Chelsea FC", "shortName": "Chelsea", "tla": "CHE"},
            "score": {
                "winner": "HOME_TEAM",
                "duration": "REGULAR",
                "fullTime": {"home": 2, "away": 1},
                "halfTime": {"home": 1, "away": 0}
            },
            "competition": {"id": 2001, "name": "Premier League", "code": "PL"}
        })
    }

    #[test]
    fn normalizes_a_full_match_object() {
        let m = normalize(&arsenal_chelsea()).unwrap();

        assert_eq!(m.match_id, 123456);
        assert_eq!(m.utc_date.to_rfc3339(), "2024-01-15T15:30:00+00:00");
        assert_eq!(m.status, MatchStatus::Finished);
        assert_eq!(m.home_team.name, "Arsenal FC");
        assert_eq!(m.home_team.tla.as_deref(), Some("ARS"));
        assert_eq!(m.away_team.id, 3929);
        assert_eq!(m.competition.code, "PL");
        assert_eq!(m.score.full_time.home, Some(2));
        assert_eq!(m.score.full_time.away, Some(1));
        assert_eq!(
            m.score.half_time,
            Some(ScorePair {
                home: Some(1),
                away: Some(0)
            })
        );
    }

    #[test]
    fn score_round_trip_keeps_unmodeled_fields() {
        let raw = json!({
            "winner": "AWAY_TEAM",
            "duration": "PENALTIES",
            "fullTime": {"home": 1, "away": 1},
            "halfTime": {"home": 0, "away": 1},
            "extraTime": {"home": 1, "away": 1},
            "penalties": {"home": 3, "away": 4}
        });

        let score: Score = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(score.extra.get("extraTime"), Some(&json!({"home": 1, "away": 1})));

        let reserialized = serde_json::to_value(&score).unwrap();
        assert_eq!(reserialized, raw);
    }

    #[test]
    fn absent_half_time_is_none_and_stays_absent() {
        let raw = json!({
            "winner": null,
            "duration": "REGULAR",
            "fullTime": {"home": null, "away": null}
        });

        let score: Score = serde_json::from_value(raw).unwrap();
        assert_eq!(score.half_time, None);
        assert_eq!(score.full_time.home, None);

        let reserialized = serde_json::to_value(&score).unwrap();
        assert!(reserialized.get("halfTime").is_none());
    }

    #[test]
    fn malformed_timestamp_names_the_match() {
        let mut raw = arsenal_chelsea();
        raw["utcDate"] = json!("15/01/2024 15:30");

        let err = normalize(&raw).unwrap_err();
        match err {
            FootballApiError::MalformedUpstreamData { match_id, .. } => {
                assert_eq!(match_id, Some(123456));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn non_utc_offset_is_rejected() {
        let mut raw = arsenal_chelsea();
        raw["utcDate"] = json!("2024-01-15T15:30:00+02:00");

        assert!(matches!(
            normalize(&raw),
            Err(FootballApiError::MalformedUpstreamData { .. })
        ));
    }

    #[test]
    fn identical_home_and_away_teams_are_rejected() {
        let mut raw = arsenal_chelsea();
        raw["awayTeam"] = raw["homeTeam"].clone();

        assert!(matches!(
            normalize(&raw),
            Err(FootballApiError::MalformedUpstreamData { .. })
        ));
    }

    #[test]
    fn missing_required_field_fails_normalization() {
        let mut raw = arsenal_chelsea();
        raw.as_object_mut().unwrap().remove("homeTeam");

        assert!(matches!(
            normalize(&raw),
            Err(FootballApiError::MalformedUpstreamData { match_id: Some(123456), .. })
        ));
    }

    #[test]
    fn unknown_status_is_carried_as_opaque_string() {
        let mut raw = arsenal_chelsea();
        raw["status"] = json!("AWARDED");

        let m = normalize(&raw).unwrap();
        assert_eq!(m.status, MatchStatus::Other("AWARDED".to_string()));
        assert_eq!(m.status.as_str(), "AWARDED");
    }

    #[test]
    fn absent_optional_team_fields_stay_none() {
        let mut raw = arsenal_chelsea();
        raw["awayTeam"] = json!({"id": 3929, "name": "Chelsea FC"});

        let m = normalize(&raw).unwrap();
        assert_eq!(m.away_team.short_name, None);
        assert_eq!(m.away_team.tla, None);
    }
}
