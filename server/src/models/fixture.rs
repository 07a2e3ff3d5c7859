use chrono::{DateTime, Utc};
use color_eyre::eyre::Context as _;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Recognized status filter values for the match report. Anything else in
/// the query string means no status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Finished,
    Scheduled,
}

impl StatusFilter {
    pub fn from_query(raw: Option<&str>) -> Option<Self> {
        match raw {
            Some("finished") => Some(Self::Finished),
            Some("scheduled") => Some(Self::Scheduled),
            _ => None,
        }
    }

    /// The store's status vocabulary for this filter.
    pub fn as_store_status(self) -> &'static str {
        match self {
            Self::Finished => "finished",
            Self::Scheduled => "scheduled",
        }
    }
}

/// Filters applied to the match report listing. The date range is inclusive
/// on both ends (day bounds computed by the caller).
#[derive(Debug, Clone, Default)]
pub struct MatchFilters {
    pub range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub status: Option<StatusFilter>,
}

impl MatchFilters {
    fn range_start(&self) -> Option<DateTime<Utc>> {
        self.range.map(|(start, _)| start)
    }

    fn range_end(&self) -> Option<DateTime<Utc>> {
        self.range.map(|(_, end)| end)
    }

    fn store_status(&self) -> Option<&'static str> {
        self.status.map(StatusFilter::as_store_status)
    }
}

/// One match page row with league/team display data attached.
#[derive(Debug, Clone, FromRow)]
pub struct MatchRow {
    pub match_id: Uuid,
    pub league_name: Option<String>,
    pub team_a_name: Option<String>,
    pub team_b_name: Option<String>,
    pub kickoff_at: DateTime<Utc>,
    pub status: String,
    pub score_a: Option<i32>,
    pub score_b: Option<i32>,
}

/// Count matches satisfying the filters (for pagination metadata).
pub async fn count_matches(pool: &PgPool, filters: &MatchFilters) -> color_eyre::Result<i64> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*)
         FROM matches m
         WHERE ($1::timestamptz IS NULL OR m.kickoff_at >= $1)
           AND ($2::timestamptz IS NULL OR m.kickoff_at <= $2)
           AND ($3::text IS NULL OR m.status = $3)",
    )
    .bind(filters.range_start())
    .bind(filters.range_end())
    .bind(filters.store_status())
    .fetch_one(pool)
    .await
    .wrap_err("Failed to count matches")?;

    Ok(row.0)
}

/// Fetch one page of matches, newest kickoff first, with team and league
/// names left-joined so missing references still produce a row.
pub async fn fetch_page(
    pool: &PgPool,
    filters: &MatchFilters,
    page: i64,
    limit: i64,
) -> color_eyre::Result<Vec<MatchRow>> {
    let offset = (page - 1) * limit;

    let rows = sqlx::query_as::<_, MatchRow>(
        "SELECT m.match_id,
                l.name AS league_name,
                ta.name AS team_a_name,
                tb.name AS team_b_name,
                m.kickoff_at, m.status, m.score_a, m.score_b
         FROM matches m
         LEFT JOIN leagues l ON l.league_id = m.league_id
         LEFT JOIN teams ta ON ta.team_id = m.team_a_id
         LEFT JOIN teams tb ON tb.team_id = m.team_b_id
         WHERE ($1::timestamptz IS NULL OR m.kickoff_at >= $1)
           AND ($2::timestamptz IS NULL OR m.kickoff_at <= $2)
           AND ($3::text IS NULL OR m.status = $3)
         ORDER BY m.kickoff_at DESC
         LIMIT $4 OFFSET $5",
    )
    .bind(filters.range_start())
    .bind(filters.range_end())
    .bind(filters.store_status())
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
    .wrap_err("Failed to fetch match page")?;

    Ok(rows)
}
