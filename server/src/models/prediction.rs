use color_eyre::eyre::Context as _;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::window::ReportWindow;

/// Importance weights marking a match as part of the "big match" tier.
pub const BIG_MATCH_WEIGHTS: [i32; 2] = [2, 3];

/// One prediction in a window, with the participant's ranked display name
/// resolved. `display_name` is `None` when the participant record is missing
/// or has no full name; such rows are dropped from ranked output but still
/// participate in maximum computation.
#[derive(Debug, Clone, FromRow)]
pub struct ScoredRow {
    pub user_key: Uuid,
    pub display_name: Option<String>,
    pub points: i32,
}

/// A winning prediction on a big-tier match.
#[derive(Debug, Clone, FromRow)]
pub struct BigMatchRow {
    pub user_key: Uuid,
    pub display_name: Option<String>,
    pub match_id: Uuid,
    pub points: i32,
}

/// A winning prediction attributed to a featured league.
#[derive(Debug, Clone, FromRow)]
pub struct LeagueRow {
    pub user_key: Uuid,
    pub display_name: Option<String>,
    pub league_name: String,
    pub points: i32,
}

/// A raw prediction for the match report. Carries both the current and the
/// legacy predicted-score column per component; use [`predicted_score`] for
/// the canonical value.
///
/// [`predicted_score`]: PredictionRow::predicted_score
#[derive(Debug, Clone, FromRow)]
pub struct PredictionRow {
    pub match_id: Uuid,
    pub user_key: Uuid,
    pub predicted_score_a: Option<i32>,
    pub predicted_score_b: Option<i32>,
    pub legacy_score_a: Option<i32>,
    pub legacy_score_b: Option<i32>,
}

impl PredictionRow {
    /// Canonical predicted score. Prefers the current column and falls back
    /// to the legacy alias per component; a component with neither value is
    /// indefinite and disqualifies the prediction from exact-score matching.
    pub fn predicted_score(&self) -> Option<(i32, i32)> {
        let a = self.predicted_score_a.or(self.legacy_score_a)?;
        let b = self.predicted_score_b.or(self.legacy_score_b)?;
        Some((a, b))
    }
}

// --- Window-scoped fetches ---
// The grading timestamp is `updated_at`: a prediction counts for the period
// it was last (re-)graded in, not the period of its match.

/// Winning predictions (`points_awarded > 0`) in the window.
pub async fn winning_in_window(
    pool: &PgPool,
    window: &ReportWindow,
) -> color_eyre::Result<Vec<ScoredRow>> {
    let rows = sqlx::query_as::<_, ScoredRow>(
        "SELECT p.user_key, pa.full_name AS display_name, p.points_awarded AS points
         FROM predictions p
         LEFT JOIN participants pa ON pa.user_key = p.user_key
         WHERE p.points_awarded > 0
           AND p.updated_at >= $1 AND p.updated_at < $2",
    )
    .bind(window.start)
    .bind(window.end)
    .fetch_all(pool)
    .await
    .wrap_err("Failed to fetch winning predictions for window")?;

    Ok(rows)
}

/// Every prediction in the window, winning or not.
pub async fn all_in_window(
    pool: &PgPool,
    window: &ReportWindow,
) -> color_eyre::Result<Vec<ScoredRow>> {
    let rows = sqlx::query_as::<_, ScoredRow>(
        "SELECT p.user_key, pa.full_name AS display_name, p.points_awarded AS points
         FROM predictions p
         LEFT JOIN participants pa ON pa.user_key = p.user_key
         WHERE p.updated_at >= $1 AND p.updated_at < $2",
    )
    .bind(window.start)
    .bind(window.end)
    .fetch_all(pool)
    .await
    .wrap_err("Failed to fetch predictions for window")?;

    Ok(rows)
}

/// Winning predictions in the window on matches in the big-match tier.
pub async fn big_match_winning_in_window(
    pool: &PgPool,
    window: &ReportWindow,
) -> color_eyre::Result<Vec<BigMatchRow>> {
    let rows = sqlx::query_as::<_, BigMatchRow>(
        "SELECT p.user_key, pa.full_name AS display_name, p.match_id, p.points_awarded AS points
         FROM predictions p
         JOIN matches m ON m.match_id = p.match_id
         LEFT JOIN participants pa ON pa.user_key = p.user_key
         WHERE p.points_awarded > 0
           AND p.updated_at >= $1 AND p.updated_at < $2
           AND m.weight = ANY($3)",
    )
    .bind(window.start)
    .bind(window.end)
    .bind(BIG_MATCH_WEIGHTS.to_vec())
    .fetch_all(pool)
    .await
    .wrap_err("Failed to fetch big-match predictions for window")?;

    Ok(rows)
}

/// Winning predictions in the window whose match belongs to one of the named
/// leagues. League names match exactly (case- and diacritic-sensitive).
pub async fn league_winning_in_window(
    pool: &PgPool,
    window: &ReportWindow,
    league_names: &[String],
) -> color_eyre::Result<Vec<LeagueRow>> {
    let rows = sqlx::query_as::<_, LeagueRow>(
        "SELECT p.user_key, pa.full_name AS display_name, l.name AS league_name,
                p.points_awarded AS points
         FROM predictions p
         JOIN matches m ON m.match_id = p.match_id
         JOIN leagues l ON l.league_id = m.league_id
         LEFT JOIN participants pa ON pa.user_key = p.user_key
         WHERE p.points_awarded > 0
           AND p.updated_at >= $1 AND p.updated_at < $2
           AND l.name = ANY($3)",
    )
    .bind(window.start)
    .bind(window.end)
    .bind(league_names.to_vec())
    .fetch_all(pool)
    .await
    .wrap_err("Failed to fetch league predictions for window")?;

    Ok(rows)
}

/// All predictions referencing any of the given matches (for the report).
pub async fn for_matches(
    pool: &PgPool,
    match_ids: &[Uuid],
) -> color_eyre::Result<Vec<PredictionRow>> {
    let rows = sqlx::query_as::<_, PredictionRow>(
        "SELECT match_id, user_key,
                predicted_score_a, predicted_score_b,
                score_a AS legacy_score_a, score_b AS legacy_score_b
         FROM predictions
         WHERE match_id = ANY($1)",
    )
    .bind(match_ids.to_vec())
    .fetch_all(pool)
    .await
    .wrap_err("Failed to fetch predictions for matches")?;

    Ok(rows)
}
