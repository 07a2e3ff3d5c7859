use std::collections::HashMap;

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, Utc};
use color_eyre::eyre::Context as _;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::ServerResult,
    models::{
        fixture::{self, MatchFilters, StatusFilter},
        participant, prediction,
    },
    state::AppState,
    stats::{
        activity,
        leagues,
        rankings::{self, CorrectEntry, CountEntry, PointsEntry, TotalEntry},
        report::{self, MatchReportRow},
    },
    window::{self, WindowParams},
};

#[derive(Debug, Serialize)]
struct Envelope<T: Serialize> {
    status: &'static str,
    data: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryData {
    period: String,
    stars_of_period: Vec<PointsEntry>,
    big_match_hunters_by_points: Vec<PointsEntry>,
    big_match_hunters_by_count: Vec<CountEntry>,
    high_scorers: Vec<PointsEntry>,
    longest_streak: Vec<CorrectEntry>,
    most_consistent: Vec<TotalEntry>,
    league_stars: std::collections::BTreeMap<String, Vec<PointsEntry>>,
    active_users_today: i64,
    active_users_week: i64,
    average_points_today: f64,
}

/// GET /api/v1/stats — merged leaderboard summary for the selected window.
///
/// The five window-scoped aggregations fan out concurrently; any failure
/// fails the whole response. The activity cards use their own fixed windows
/// (today, current week) independent of the selected one.
pub async fn summary(
    State(state): State<AppState>,
    Query(params): Query<WindowParams>,
) -> ServerResult<impl IntoResponse> {
    let now = Utc::now();
    let window = window::resolve(&params, now);

    tracing::debug!(
        start = %window.start,
        end = %window.end,
        label = %window.label,
        "Computing summary stats"
    );

    let (star_rows, big_rows, peak_rows, consistency_rows, league_rows) = futures::try_join!(
        prediction::winning_in_window(&state.db, &window),
        prediction::big_match_winning_in_window(&state.db, &window),
        prediction::all_in_window(&state.db, &window),
        prediction::all_in_window(&state.db, &window),
        prediction::league_winning_in_window(&state.db, &window, &state.config.featured_leagues),
    )?;

    let today_window = window::day_of(now);
    let week_window = window::week_of(now);
    let (today_rows, week_rows) = futures::try_join!(
        prediction::winning_in_window(&state.db, &today_window),
        prediction::winning_in_window(&state.db, &week_window),
    )?;

    let hunters = rankings::big_match_hunters(&big_rows);
    let consistency = rankings::consistency(&consistency_rows);
    let today = activity::summarize(&today_rows);
    let week = activity::summarize(&week_rows);

    let data = SummaryData {
        period: window.label,
        stars_of_period: rankings::top_scorers(&star_rows),
        big_match_hunters_by_points: hunters.by_points,
        big_match_hunters_by_count: hunters.by_count,
        high_scorers: rankings::high_scorers(&peak_rows),
        longest_streak: consistency.longest_streak,
        most_consistent: consistency.most_consistent,
        league_stars: leagues::league_stars(&league_rows, &state.config.featured_leagues),
        active_users_today: today.active_count,
        active_users_week: week.active_count,
        average_points_today: today.average_points,
    };

    Ok(Json(Envelope {
        status: "success",
        data,
    }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub filter: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportEnvelope {
    status: &'static str,
    results: usize,
    total: i64,
    current_page: i64,
    total_pages: i64,
    data: Vec<MatchReportRow>,
}

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 50;

/// Coerce a raw pagination value: unparseable or non-positive input falls
/// back to the default rather than being rejected.
fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|v| v.parse::<i64>().ok())
        .filter(|v| *v >= 1)
        .unwrap_or(default)
}

/// Inclusive day bounds in server-local time, converted to UTC for the
/// store. The report deliberately uses local time here, unlike the UTC
/// convention of the summary windows.
fn local_day_bounds(start: NaiveDate, end: NaiveDate) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = start
        .and_time(NaiveTime::MIN)
        .and_local_timezone(Local)
        .earliest()?;
    let end = (end.and_time(NaiveTime::MIN) + Duration::days(1) - Duration::milliseconds(1))
        .and_local_timezone(Local)
        .earliest()?;
    Some((start.with_timezone(&Utc), end.with_timezone(&Utc)))
}

fn resolve_filters(params: &ReportParams) -> MatchFilters {
    let range = match (params.start_date.as_deref(), params.end_date.as_deref()) {
        (Some(start_raw), Some(end_raw)) => {
            match (start_raw.parse::<NaiveDate>(), end_raw.parse::<NaiveDate>()) {
                (Ok(start), Ok(end)) => local_day_bounds(start, end),
                _ => None,
            }
        }
        _ => None,
    };

    MatchFilters {
        range,
        status: StatusFilter::from_query(params.filter.as_deref()),
    }
}

/// GET /api/v1/stats/matches — paginated match report with exact-score
/// winners per match.
pub async fn match_report(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> ServerResult<impl IntoResponse> {
    let page = parse_or(params.page.as_deref(), DEFAULT_PAGE);
    let limit = parse_or(params.limit.as_deref(), DEFAULT_LIMIT);
    let filters = resolve_filters(&params);

    // The count and the page fetch are independent; predictions and
    // participants depend on the fetched match-id set.
    let (total, matches) = futures::try_join!(
        fixture::count_matches(&state.db, &filters),
        fixture::fetch_page(&state.db, &filters, page, limit),
    )?;

    let match_ids: Vec<Uuid> = matches.iter().map(|m| m.match_id).collect();
    let predictions = if match_ids.is_empty() {
        Vec::new()
    } else {
        prediction::for_matches(&state.db, &match_ids)
            .await
            .wrap_err("Failed to fetch report predictions")?
    };

    let mut user_keys: Vec<Uuid> = predictions.iter().map(|p| p.user_key).collect();
    user_keys.sort_unstable();
    user_keys.dedup();

    let names: HashMap<Uuid, String> = if user_keys.is_empty() {
        HashMap::new()
    } else {
        participant::names_for(&state.db, &user_keys)
            .await
            .wrap_err("Failed to fetch report participants")?
            .iter()
            .map(|p| (p.user_key, p.display_name().to_string()))
            .collect()
    };

    let data = report::build_report(&matches, &predictions, &names);

    Ok(Json(ReportEnvelope {
        status: "success",
        results: data.len(),
        total,
        current_page: page,
        total_pages: report::total_pages(total, limit),
        data,
    }))
}
