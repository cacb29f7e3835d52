use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user_match::UserMatch;

/// Marks a match done for a user. The unique (user_id, match_id) constraint
/// makes a second call update the existing row instead of duplicating it; a
/// null notes payload keeps whatever note is already stored.
pub async fn mark_done(
    pool: &PgPool,
    user_id: Uuid,
    match_id: Uuid,
    notes: Option<&str>,
) -> Result<UserMatch, sqlx::Error> {
    sqlx::query_as::<_, UserMatch>(
        r#"
        INSERT INTO user_matches (id, user_id, match_id, is_done, notes, last_updated)
        VALUES ($1, $2, $3, TRUE, $4, NOW())
        ON CONFLICT (user_id, match_id) DO UPDATE SET
            is_done = TRUE,
            notes = COALESCE(EXCLUDED.notes, user_matches.notes),
            last_updated = NOW()
        RETURNING id, user_id, match_id, is_done, notes, last_updated
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(match_id)
    .bind(notes)
    .fetch_one(pool)
    .await
}
