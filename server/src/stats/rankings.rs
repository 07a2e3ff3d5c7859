//! Ranked leaderboards over window-scoped prediction rows.
//!
//! Every "top" computation returns the full tie-set at the maximum, never a
//! single arbitrary winner. Maxima are taken over all grouped rows, named or
//! not; rows without a resolvable display name are dropped only when shaping
//! the displayed result. An empty displayed result becomes the one-element
//! placeholder.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use uuid::Uuid;

use crate::models::prediction::{BigMatchRow, ScoredRow};

/// Placeholder name substituted for an otherwise-empty leaderboard.
pub const NONE_SENTINEL: &str = "لا يوجد";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointsEntry {
    pub name: String,
    pub points: i64,
}

impl PointsEntry {
    pub fn placeholder() -> Self {
        Self {
            name: NONE_SENTINEL.to_string(),
            points: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub name: String,
    pub count: i64,
}

impl CountEntry {
    pub fn placeholder() -> Self {
        Self {
            name: NONE_SENTINEL.to_string(),
            count: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorrectEntry {
    pub name: String,
    pub correct: i64,
}

impl CorrectEntry {
    pub fn placeholder() -> Self {
        Self {
            name: NONE_SENTINEL.to_string(),
            correct: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalEntry {
    pub name: String,
    pub total: i64,
}

impl TotalEntry {
    pub fn placeholder() -> Self {
        Self {
            name: NONE_SENTINEL.to_string(),
            total: 0,
        }
    }
}

/// Substitute the placeholder for an empty result.
fn or_placeholder<T>(entries: Vec<T>, placeholder: T) -> Vec<T> {
    if entries.is_empty() {
        vec![placeholder]
    } else {
        entries
    }
}

/// Top scorers of the period: every participant tied at the maximum summed
/// points over winning predictions, sorted by name.
pub fn top_scorers(rows: &[ScoredRow]) -> Vec<PointsEntry> {
    let mut totals: HashMap<Uuid, (Option<&str>, i64)> = HashMap::new();
    for row in rows {
        let group = totals.entry(row.user_key).or_insert((None, 0));
        if group.0.is_none() {
            group.0 = row.display_name.as_deref();
        }
        group.1 += i64::from(row.points);
    }

    let max = totals.values().map(|(_, total)| *total).max().unwrap_or(0);

    let mut top: Vec<PointsEntry> = totals
        .values()
        .filter(|(_, total)| *total == max)
        .filter_map(|(name, total)| {
            name.map(|n| PointsEntry {
                name: n.to_string(),
                points: *total,
            })
        })
        .collect();
    top.sort_by(|a, b| a.name.cmp(&b.name));

    or_placeholder(top, PointsEntry::placeholder())
}

/// The two independent big-match tie-sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BigMatchHunters {
    pub by_points: Vec<PointsEntry>,
    pub by_count: Vec<CountEntry>,
}

/// Big-match hunters: per participant, total points and distinct big matches
/// with a winning prediction. Two tie-sets, one per metric, each excluding a
/// zero maximum.
pub fn big_match_hunters(rows: &[BigMatchRow]) -> BigMatchHunters {
    struct Group<'a> {
        name: Option<&'a str>,
        points: i64,
        matches: HashSet<Uuid>,
    }

    let mut groups: HashMap<Uuid, Group<'_>> = HashMap::new();
    for row in rows {
        let group = groups.entry(row.user_key).or_insert_with(|| Group {
            name: None,
            points: 0,
            matches: HashSet::new(),
        });
        if group.name.is_none() {
            group.name = row.display_name.as_deref();
        }
        group.points += i64::from(row.points);
        group.matches.insert(row.match_id);
    }

    let max_points = groups.values().map(|g| g.points).max().unwrap_or(0);
    let max_count = groups
        .values()
        .map(|g| g.matches.len() as i64)
        .max()
        .unwrap_or(0);

    let mut by_points: Vec<PointsEntry> = groups
        .values()
        .filter(|g| g.points == max_points && g.points > 0)
        .filter_map(|g| {
            g.name.map(|n| PointsEntry {
                name: n.to_string(),
                points: g.points,
            })
        })
        .collect();
    by_points.sort_by(|a, b| a.name.cmp(&b.name));

    let mut by_count: Vec<CountEntry> = groups
        .values()
        .filter(|g| g.matches.len() as i64 == max_count && !g.matches.is_empty())
        .filter_map(|g| {
            g.name.map(|n| CountEntry {
                name: n.to_string(),
                count: g.matches.len() as i64,
            })
        })
        .collect();
    by_count.sort_by(|a, b| a.name.cmp(&b.name));

    BigMatchHunters {
        by_points: or_placeholder(by_points, PointsEntry::placeholder()),
        by_count: or_placeholder(by_count, CountEntry::placeholder()),
    }
}

/// High scorers: everyone who achieved the single highest `points_awarded`
/// value in the window. The maximum is taken over every row (win filter does
/// not apply); a non-positive maximum short-circuits to the placeholder.
/// There is no placeholder fallback after that point: if the maximum is held
/// only by unresolvable participants the result is legitimately empty.
pub fn high_scorers(rows: &[ScoredRow]) -> Vec<PointsEntry> {
    let max = rows.iter().map(|r| r.points).max().unwrap_or(0);
    if max <= 0 {
        return vec![PointsEntry::placeholder()];
    }

    let mut top: Vec<PointsEntry> = rows
        .iter()
        .filter(|r| r.points == max)
        .filter_map(|r| {
            r.display_name.as_deref().map(|n| PointsEntry {
                name: n.to_string(),
                points: i64::from(r.points),
            })
        })
        .collect();
    top.sort_by(|a, b| a.name.cmp(&b.name));
    top
}

/// The two consistency tie-sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsistencyStats {
    pub longest_streak: Vec<CorrectEntry>,
    pub most_consistent: Vec<TotalEntry>,
}

/// Consistency stats over every in-window prediction: participants tied at
/// the maximum correct-prediction count, and participants tied at the
/// maximum total-prediction count.
///
/// "Longest streak" is literally most-corrects-in-window, not a contiguous
/// run; the wire name is kept for compatibility.
pub fn consistency(rows: &[ScoredRow]) -> ConsistencyStats {
    struct Group<'a> {
        name: Option<&'a str>,
        total: i64,
        correct: i64,
    }

    let mut groups: HashMap<Uuid, Group<'_>> = HashMap::new();
    for row in rows {
        let group = groups.entry(row.user_key).or_insert(Group {
            name: None,
            total: 0,
            correct: 0,
        });
        if group.name.is_none() {
            group.name = row.display_name.as_deref();
        }
        group.total += 1;
        if row.points > 0 {
            group.correct += 1;
        }
    }

    let max_correct = groups.values().map(|g| g.correct).max().unwrap_or(0);
    let max_total = groups.values().map(|g| g.total).max().unwrap_or(0);

    let mut longest_streak: Vec<CorrectEntry> = groups
        .values()
        .filter(|g| g.correct == max_correct && g.correct > 0)
        .filter_map(|g| {
            g.name.map(|n| CorrectEntry {
                name: n.to_string(),
                correct: g.correct,
            })
        })
        .collect();
    longest_streak.sort_by(|a, b| a.name.cmp(&b.name));

    let mut most_consistent: Vec<TotalEntry> = groups
        .values()
        .filter(|g| g.total == max_total && g.total > 0)
        .filter_map(|g| {
            g.name.map(|n| TotalEntry {
                name: n.to_string(),
                total: g.total,
            })
        })
        .collect();
    most_consistent.sort_by(|a, b| a.name.cmp(&b.name));

    ConsistencyStats {
        longest_streak: or_placeholder(longest_streak, CorrectEntry::placeholder()),
        most_consistent: or_placeholder(most_consistent, TotalEntry::placeholder()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn key(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    fn scored(user: u128, name: Option<&str>, points: i32) -> ScoredRow {
        ScoredRow {
            user_key: key(user),
            display_name: name.map(str::to_string),
            points,
        }
    }

    fn big(user: u128, name: Option<&str>, match_id: u128, points: i32) -> BigMatchRow {
        BigMatchRow {
            user_key: key(user),
            display_name: name.map(str::to_string),
            match_id: key(match_id),
            points,
        }
    }

    #[test]
    fn top_scorers_returns_full_tie_set_sorted_by_name() {
        let rows = vec![
            scored(1, Some("سمير"), 5),
            scored(1, Some("سمير"), 5),
            scored(2, Some("أحمد"), 10),
            scored(3, Some("زيد"), 4),
        ];
        let top = top_scorers(&rows);
        assert_eq!(
            top,
            vec![
                PointsEntry { name: "أحمد".to_string(), points: 10 },
                PointsEntry { name: "سمير".to_string(), points: 10 },
            ]
        );
    }

    #[test]
    fn top_scorers_placeholder_when_no_rows() {
        assert_eq!(top_scorers(&[]), vec![PointsEntry::placeholder()]);
    }

    #[test]
    fn top_scorers_unnamed_leader_suppresses_named_runners_up() {
        // The orphaned participant holds the maximum, so nobody is displayed
        let rows = vec![scored(1, None, 10), scored(2, Some("أحمد"), 5)];
        assert_eq!(top_scorers(&rows), vec![PointsEntry::placeholder()]);
    }

    #[test]
    fn big_match_hunters_counts_distinct_matches() {
        let rows = vec![
            big(1, Some("أحمد"), 100, 3),
            big(1, Some("أحمد"), 100, 3),
            big(1, Some("أحمد"), 101, 6),
            big(2, Some("سمير"), 100, 3),
        ];
        let hunters = big_match_hunters(&rows);
        assert_eq!(
            hunters.by_points,
            vec![PointsEntry { name: "أحمد".to_string(), points: 12 }]
        );
        assert_eq!(
            hunters.by_count,
            vec![CountEntry { name: "أحمد".to_string(), count: 2 }]
        );
    }

    #[test]
    fn big_match_hunters_tie_sets_are_independent() {
        // One participant leads on points, both tie on distinct matches
        let rows = vec![
            big(1, Some("أحمد"), 100, 6),
            big(2, Some("سمير"), 101, 3),
        ];
        let hunters = big_match_hunters(&rows);
        assert_eq!(hunters.by_points.len(), 1);
        assert_eq!(hunters.by_points[0].name, "أحمد");
        assert_eq!(hunters.by_count.len(), 2);
    }

    #[test]
    fn big_match_hunters_placeholders_when_empty() {
        let hunters = big_match_hunters(&[]);
        assert_eq!(hunters.by_points, vec![PointsEntry::placeholder()]);
        assert_eq!(hunters.by_count, vec![CountEntry::placeholder()]);
    }

    #[test]
    fn high_scorers_returns_everyone_at_the_peak_value() {
        let rows = vec![
            scored(1, Some("سمير"), 6),
            scored(2, Some("أحمد"), 6),
            scored(3, Some("زيد"), 3),
        ];
        let top = high_scorers(&rows);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "أحمد");
        assert_eq!(top[1].name, "سمير");
        assert!(top.iter().all(|e| e.points == 6));
    }

    #[test]
    fn high_scorers_placeholder_when_no_positive_points() {
        let rows = vec![scored(1, Some("أحمد"), 0), scored(2, Some("سمير"), 0)];
        assert_eq!(high_scorers(&rows), vec![PointsEntry::placeholder()]);
        assert_eq!(high_scorers(&[]), vec![PointsEntry::placeholder()]);
    }

    #[test]
    fn high_scorers_may_be_empty_when_only_orphans_hold_the_peak() {
        let rows = vec![scored(1, None, 9), scored(2, Some("أحمد"), 3)];
        assert!(high_scorers(&rows).is_empty());
    }

    #[test]
    fn consistency_separates_correct_and_total_leaders() {
        // User 1: 3 predictions, 1 correct. User 2: 2 predictions, 2 correct.
        let rows = vec![
            scored(1, Some("أحمد"), 3),
            scored(1, Some("أحمد"), 0),
            scored(1, Some("أحمد"), 0),
            scored(2, Some("سمير"), 3),
            scored(2, Some("سمير"), 6),
        ];
        let stats = consistency(&rows);
        assert_eq!(
            stats.longest_streak,
            vec![CorrectEntry { name: "سمير".to_string(), correct: 2 }]
        );
        assert_eq!(
            stats.most_consistent,
            vec![TotalEntry { name: "أحمد".to_string(), total: 3 }]
        );
    }

    #[test]
    fn consistency_placeholder_when_no_corrects() {
        let rows = vec![scored(1, Some("أحمد"), 0)];
        let stats = consistency(&rows);
        assert_eq!(stats.longest_streak, vec![CorrectEntry::placeholder()]);
        // The participant still leads on total predictions
        assert_eq!(
            stats.most_consistent,
            vec![TotalEntry { name: "أحمد".to_string(), total: 1 }]
        );
    }

    proptest! {
        /// Tie-set soundness: when the result is not the placeholder, every
        /// displayed entry carries the global maximum summed points, and no
        /// participant sum exceeds it.
        #[test]
        fn top_scorers_entries_all_carry_the_maximum(
            rows in prop::collection::vec((0u128..6, 1i32..50), 0..40)
        ) {
            let rows: Vec<ScoredRow> = rows
                .into_iter()
                .map(|(user, points)| scored(user, Some(&format!("user-{user}")), points))
                .collect();

            let mut sums: HashMap<Uuid, i64> = HashMap::new();
            for row in &rows {
                *sums.entry(row.user_key).or_default() += i64::from(row.points);
            }
            let max = sums.values().copied().max().unwrap_or(0);

            let top = top_scorers(&rows);
            prop_assert!(!top.is_empty());
            if rows.is_empty() {
                prop_assert_eq!(top, vec![PointsEntry::placeholder()]);
            } else {
                prop_assert!(top.iter().all(|e| e.points == max));
                let expected = sums.values().filter(|s| **s == max).count();
                prop_assert_eq!(top.len(), expected);
                prop_assert!(top.windows(2).all(|w| w[0].name <= w[1].name));
            }
        }
    }
}
