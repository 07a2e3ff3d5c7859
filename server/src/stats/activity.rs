use std::collections::HashSet;

use serde::Serialize;
use uuid::Uuid;

use crate::models::prediction::ScoredRow;

/// Activity summary for a window: distinct active participants, their total
/// points, and the average per participant. Zero values are legitimate here;
/// no placeholder substitution applies.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    pub active_count: i64,
    pub total_points: i64,
    pub average_points: f64,
}

/// Summarize winning prediction rows. Participants are counted whether or
/// not their display name resolves.
pub fn summarize(rows: &[ScoredRow]) -> ActivitySummary {
    let mut participants: HashSet<Uuid> = HashSet::new();
    let mut total_points = 0i64;
    for row in rows {
        participants.insert(row.user_key);
        total_points += i64::from(row.points);
    }

    let active_count = participants.len() as i64;
    let average_points = if active_count == 0 {
        0.0
    } else {
        round2(total_points as f64 / active_count as f64)
    };

    ActivitySummary {
        active_count,
        total_points,
        average_points,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(user: u128, points: i32) -> ScoredRow {
        ScoredRow {
            user_key: Uuid::from_u128(user),
            display_name: Some(format!("user-{user}")),
            points,
        }
    }

    #[test]
    fn average_over_three_participants() {
        let rows = vec![row(1, 10), row(2, 20), row(3, 30)];
        let summary = summarize(&rows);
        assert_eq!(summary.active_count, 3);
        assert_eq!(summary.total_points, 60);
        assert_eq!(summary.average_points, 20.0);
    }

    #[test]
    fn participants_are_counted_once() {
        let rows = vec![row(1, 3), row(1, 6), row(2, 3)];
        let summary = summarize(&rows);
        assert_eq!(summary.active_count, 2);
        assert_eq!(summary.total_points, 12);
        assert_eq!(summary.average_points, 6.0);
    }

    #[test]
    fn empty_window_yields_zeros_not_an_error() {
        let summary = summarize(&[]);
        assert_eq!(summary.active_count, 0);
        assert_eq!(summary.total_points, 0);
        assert_eq!(summary.average_points, 0.0);
    }

    #[test]
    fn average_is_rounded_to_two_decimals() {
        let rows = vec![row(1, 1), row(2, 2), row(3, 2)];
        // 5 / 3 = 1.666…
        assert_eq!(summarize(&rows).average_points, 1.67);
    }

    #[test]
    fn unnamed_participants_still_count_as_active() {
        let rows = vec![ScoredRow {
            user_key: Uuid::from_u128(9),
            display_name: None,
            points: 5,
        }];
        assert_eq!(summarize(&rows).active_count, 1);
    }
}
