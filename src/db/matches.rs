use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool, Row};
use uuid::Uuid;

use crate::models::soccer::{Competition, Match, MatchStatus, Score, Team};

/// Newest kickoff currently stored, if any. Drives the sync start date.
pub async fn latest_kickoff(pool: &PgPool) -> Result<Option<DateTime<Utc>>, sqlx::Error> {
    let latest: Option<DateTime<Utc>> = sqlx::query_scalar("SELECT MAX(utc_date) FROM matches")
        .fetch_one(pool)
        .await?;
    Ok(latest)
}

pub async fn find_match_id_by_external(
    pool: &PgPool,
    external_id: i64,
) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar("SELECT id FROM matches WHERE external_id = $1")
        .bind(external_id)
        .fetch_optional(pool)
        .await
}

/// Insert-or-update keyed by the provider id. The surrogate id survives
/// updates; name and code follow the provider.
pub async fn upsert_competition(
    conn: &mut PgConnection,
    competition: &Competition,
) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO competitions (id, external_id, name, code)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (external_id) DO UPDATE SET
            name = EXCLUDED.name,
            code = EXCLUDED.code
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(competition.id)
    .bind(&competition.name)
    .bind(&competition.code)
    .fetch_one(conn)
    .await
}

pub async fn upsert_team(conn: &mut PgConnection, team: &Team) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO teams (id, external_id, name, short_name, tla)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (external_id) DO UPDATE SET
            name = EXCLUDED.name,
            short_name = EXCLUDED.short_name,
            tla = EXCLUDED.tla
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(team.id)
    .bind(&team.name)
    .bind(&team.short_name)
    .bind(&team.tla)
    .fetch_one(conn)
    .await
}

/// The external id is immutable after insert; everything else is
/// overwritten blindly because the provider is authoritative.
pub async fn upsert_match(
    conn: &mut PgConnection,
    m: &Match,
    home_team_id: Uuid,
    away_team_id: Uuid,
    competition_id: Uuid,
) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO matches (id, external_id, utc_date, status, home_team_id, away_team_id, competition_id, score)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (external_id) DO UPDATE SET
            utc_date = EXCLUDED.utc_date,
            status = EXCLUDED.status,
            home_team_id = EXCLUDED.home_team_id,
            away_team_id = EXCLUDED.away_team_id,
            competition_id = EXCLUDED.competition_id,
            score = EXCLUDED.score
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(m.match_id)
    .bind(m.utc_date)
    .bind(m.status.as_str())
    .bind(home_team_id)
    .bind(away_team_id)
    .bind(competition_id)
    .bind(Json(&m.score))
    .fetch_one(conn)
    .await
}

/// Upserts the competition, both teams and then the match row itself.
pub async fn upsert_match_graph(conn: &mut PgConnection, m: &Match) -> Result<(), sqlx::Error> {
    let competition_id = upsert_competition(&mut *conn, &m.competition).await?;
    let home_team_id = upsert_team(&mut *conn, &m.home_team).await?;
    let away_team_id = upsert_team(&mut *conn, &m.away_team).await?;
    upsert_match(&mut *conn, m, home_team_id, away_team_id, competition_id).await?;
    Ok(())
}

/// All persisted matches with their team and competition records attached,
/// ordered by kickoff.
pub async fn list_matches(pool: &PgPool) -> Result<Vec<Match>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT m.external_id, m.utc_date, m.status, m.score,
               h.external_id AS home_id, h.name AS home_name,
               h.short_name AS home_short_name, h.tla AS home_tla,
               a.external_id AS away_id, a.name AS away_name,
               a.short_name AS away_short_name, a.tla AS away_tla,
               c.external_id AS competition_id, c.name AS competition_name,
               c.code AS competition_code
        FROM matches m
        JOIN teams h ON h.id = m.home_team_id
        JOIN teams a ON a.id = m.away_team_id
        JOIN competitions c ON c.id = m.competition_id
        ORDER BY m.utc_date
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| {
            Ok(Match {
                match_id: row.try_get("external_id")?,
                utc_date: row.try_get("utc_date")?,
                status: MatchStatus::from(row.try_get::<String, _>("status")?),
                home_team: Team {
                    id: row.try_get("home_id")?,
                    name: row.try_get("home_name")?,
                    short_name: row.try_get("home_short_name")?,
                    tla: row.try_get("home_tla")?,
                },
                away_team: Team {
                    id: row.try_get("away_id")?,
                    name: row.try_get("away_name")?,
                    short_name: row.try_get("away_short_name")?,
                    tla: row.try_get("away_tla")?,
                },
                competition: Competition {
                    id: row.try_get("competition_id")?,
                    name: row.try_get("competition_name")?,
                    code: row.try_get("competition_code")?,
                },
                score: row.try_get::<Json<Score>, _>("score")?.0,
            })
        })
        .collect()
}
