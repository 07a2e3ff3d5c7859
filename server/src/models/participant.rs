use color_eyre::eyre::Context as _;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Sentinel shown when a participant record has no usable display name.
pub const UNKNOWN_PARTICIPANT: &str = "مجهول";

#[derive(Debug, Clone, FromRow)]
pub struct ParticipantName {
    pub user_key: Uuid,
    pub full_name: Option<String>,
    pub name: Option<String>,
}

impl ParticipantName {
    /// Fallback chain: full name, then secondary name, then the sentinel.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(UNKNOWN_PARTICIPANT)
    }
}

/// Fetch display-name records for the given participant keys.
pub async fn names_for(pool: &PgPool, user_keys: &[Uuid]) -> color_eyre::Result<Vec<ParticipantName>> {
    let rows = sqlx::query_as::<_, ParticipantName>(
        "SELECT user_key, full_name, name
         FROM participants
         WHERE user_key = ANY($1)",
    )
    .bind(user_keys.to_vec())
    .fetch_all(pool)
    .await
    .wrap_err("Failed to fetch participant names")?;

    Ok(rows)
}
