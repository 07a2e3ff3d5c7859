use std::collections::{BTreeMap, HashMap};

use uuid::Uuid;

use crate::models::prediction::LeagueRow;
use crate::stats::rankings::PointsEntry;

/// Per-league leader tie-sets. Every configured league name appears exactly
/// once as a key; leagues with no qualifying named participant get the
/// placeholder list. The maximum is league-partitioned, not global.
pub fn league_stars(
    rows: &[LeagueRow],
    configured: &[String],
) -> BTreeMap<String, Vec<PointsEntry>> {
    // Group by (league, participant), summing points. Rows for leagues
    // outside the configured list are ignored.
    let mut groups: HashMap<(&str, Uuid), (Option<&str>, i64)> = HashMap::new();
    for row in rows {
        if !configured.iter().any(|l| l == &row.league_name) {
            continue;
        }
        let group = groups
            .entry((row.league_name.as_str(), row.user_key))
            .or_insert((None, 0));
        if group.0.is_none() {
            group.0 = row.display_name.as_deref();
        }
        group.1 += i64::from(row.points);
    }

    // League-partitioned maxima, over named and unnamed groups alike
    let mut max_per_league: HashMap<&str, i64> = HashMap::new();
    for ((league, _), (_, total)) in &groups {
        let max = max_per_league.entry(*league).or_insert(0);
        if *total > *max {
            *max = *total;
        }
    }

    let mut stars: BTreeMap<String, Vec<PointsEntry>> = configured
        .iter()
        .map(|league| (league.clone(), Vec::new()))
        .collect();

    for ((league, _), (name, total)) in &groups {
        let Some(max) = max_per_league.get(*league) else {
            continue;
        };
        if total == max
            && let Some(name) = name
            && let Some(entries) = stars.get_mut(*league)
        {
            entries.push(PointsEntry {
                name: (*name).to_string(),
                points: *total,
            });
        }
    }

    for entries in stars.values_mut() {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        if entries.is_empty() {
            entries.push(PointsEntry::placeholder());
        }
    }

    stars
}
