use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::fixture::MatchRow;
use crate::models::participant::UNKNOWN_PARTICIPANT;
use crate::models::prediction::PredictionRow;

/// Sentinel shown when a match has no league reference.
pub const UNSPECIFIED_LEAGUE: &str = "غير محدد";
/// Fallbacks for missing team references.
pub const TEAM_A_FALLBACK: &str = "فريق A";
pub const TEAM_B_FALLBACK: &str = "فريق B";
/// Placeholder score string for unplayed matches.
pub const UNPLAYED_SCORE: &str = " - ";

/// One match in the report, with the participants who predicted its exact
/// final score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReportRow {
    pub id: Uuid,
    pub league: String,
    pub time: DateTime<Utc>,
    pub status: String,
    pub team_a: String,
    pub team_b: String,
    pub result_formatted: String,
    pub winners_count: usize,
    pub winners_list: Vec<String>,
}

/// Join one page of matches with its predictions and the participant name
/// lookup, computing per-match exact-score winners in memory.
///
/// Unlike the ranked leaderboards, an unresolvable participant is never
/// dropped here; it shows up under the unknown-participant sentinel.
pub fn build_report(
    matches: &[MatchRow],
    predictions: &[PredictionRow],
    names: &HashMap<Uuid, String>,
) -> Vec<MatchReportRow> {
    matches
        .iter()
        .map(|m| {
            let final_score = match (m.score_a, m.score_b) {
                (Some(a), Some(b)) => Some((a, b)),
                _ => None,
            };

            let winners: Vec<String> = match final_score {
                Some(score) => predictions
                    .iter()
                    .filter(|p| p.match_id == m.match_id)
                    .filter(|p| p.predicted_score() == Some(score))
                    .map(|p| {
                        names
                            .get(&p.user_key)
                            .cloned()
                            .unwrap_or_else(|| UNKNOWN_PARTICIPANT.to_string())
                    })
                    .collect(),
                None => Vec::new(),
            };

            let result_formatted = match final_score {
                Some((a, b)) => format!("{a} - {b}"),
                None => UNPLAYED_SCORE.to_string(),
            };

            MatchReportRow {
                id: m.match_id,
                league: m
                    .league_name
                    .clone()
                    .unwrap_or_else(|| UNSPECIFIED_LEAGUE.to_string()),
                time: m.kickoff_at,
                status: m.status.clone(),
                team_a: m
                    .team_a_name
                    .clone()
                    .unwrap_or_else(|| TEAM_A_FALLBACK.to_string()),
                team_b: m
                    .team_b_name
                    .clone()
                    .unwrap_or_else(|| TEAM_B_FALLBACK.to_string()),
                result_formatted,
                winners_count: winners.len(),
                winners_list: winners,
            }
        })
        .collect()
}

/// Total page count for the report's pagination metadata.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}
