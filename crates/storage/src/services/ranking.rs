//! Per-classification leaderboards, recomputed from stored results on every
//! request.

use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

use crate::dto::ranking::{ClassificationGroup, EventRankings, Medal, RankingEntry};
use crate::dto::result::ResultFilter;
use crate::error::{Result, StorageError};
use crate::models::{RaceResult, Swimmer};
use crate::repository::RecordStore;

pub async fn compute_rankings(store: &dyn RecordStore, event_id: Uuid) -> Result<EventRankings> {
    store
        .find_event(event_id)
        .await?
        .ok_or_else(|| StorageError::not_found("event", event_id))?;

    let results = store.list_results(&ResultFilter::for_event(event_id)).await?;
    let swimmers = swimmers_of(store, &results).await?;

    let rankings = rank_results(event_id, &results, &swimmers);
    debug!(
        %event_id,
        results = results.len(),
        groups = rankings.groups.len(),
        "Rankings computed"
    );

    Ok(rankings)
}

async fn swimmers_of(
    store: &dyn RecordStore,
    results: &[RaceResult],
) -> Result<HashMap<Uuid, Swimmer>> {
    let mut swimmer_ids: Vec<Uuid> = results.iter().map(|r| r.swimmer_id).collect();
    swimmer_ids.sort_unstable();
    swimmer_ids.dedup();

    Ok(store
        .find_swimmers_by_ids(&swimmer_ids)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect())
}

/// Placing of each result within its event and meet, keyed by result id.
///
/// The field of every (event, meet) pair in `results` is ranked like an
/// event leaderboard. A result is placed when its timing equals the
/// swimmer's best at that meet; slower repeat swims get no placing.
pub async fn meet_placings(
    store: &dyn RecordStore,
    results: &[RaceResult],
) -> Result<HashMap<Uuid, u32>> {
    let mut fields: Vec<(Uuid, Uuid)> = results.iter().map(|r| (r.event_id, r.meet_id)).collect();
    fields.sort_unstable();
    fields.dedup();

    let mut placings = HashMap::new();
    for (event_id, meet_id) in fields {
        let filter = ResultFilter {
            event_id: Some(event_id),
            meet_id: Some(meet_id),
            swimmer_id: None,
        };
        let field = store.list_results(&filter).await?;
        let swimmers = swimmers_of(store, &field).await?;
        let rankings = rank_results(event_id, &field, &swimmers);

        let by_swimmer: HashMap<Uuid, &RankingEntry> = rankings
            .groups
            .iter()
            .flat_map(|group| group.entries.iter())
            .map(|entry| (entry.swimmer_id, entry))
            .collect();

        for result in &field {
            if let Some(entry) = by_swimmer
                .get(&result.swimmer_id)
                .filter(|entry| entry.best_time == result.timing)
            {
                placings.insert(result.id, entry.rank);
            }
        }
    }

    Ok(placings)
}

/// Rank one event's results.
///
/// Each swimmer keeps only their fastest timing. Within a classification the
/// rows are ordered by that timing; equal timings keep the order in which the
/// swimmers first appear in `results`. Results of unknown swimmers are skipped.
pub fn rank_results(
    event_id: Uuid,
    results: &[RaceResult],
    swimmers: &HashMap<Uuid, Swimmer>,
) -> EventRankings {
    // (classification, [(swimmer, best)]) in first-seen order
    let mut groups: Vec<(Option<String>, Vec<(&Swimmer, f64)>)> = Vec::new();
    let mut positions: HashMap<Uuid, (usize, usize)> = HashMap::new();

    for result in results {
        let Some(swimmer) = swimmers.get(&result.swimmer_id) else {
            continue;
        };

        if let Some(&(group_idx, row_idx)) = positions.get(&swimmer.id) {
            let best = &mut groups[group_idx].1[row_idx].1;
            if result.timing < *best {
                *best = result.timing;
            }
            continue;
        }

        let classification = swimmer.classification_code().map(str::to_string);
        let group_idx = match groups.iter().position(|(c, _)| *c == classification) {
            Some(idx) => idx,
            None => {
                groups.push((classification, Vec::new()));
                groups.len() - 1
            }
        };

        let rows = &mut groups[group_idx].1;
        positions.insert(swimmer.id, (group_idx, rows.len()));
        rows.push((swimmer, result.timing));
    }

    let mut groups: Vec<ClassificationGroup> = groups
        .into_iter()
        .map(|(classification, mut rows)| {
            rows.sort_by(|a, b| a.1.total_cmp(&b.1));
            ClassificationGroup {
                classification,
                entries: rows
                    .into_iter()
                    .zip(1u32..)
                    .map(|((swimmer, best_time), rank)| RankingEntry {
                        rank,
                        swimmer_id: swimmer.id,
                        athlete_id: swimmer.athlete_id.clone(),
                        name: swimmer.name.clone(),
                        best_time,
                        country: swimmer.country.clone(),
                        club: swimmer.club.clone(),
                        medal: Medal::for_rank(rank),
                    })
                    .collect(),
            }
        })
        .collect();

    groups.sort_by(|a, b| {
        a.label()
            .cmp(b.label())
            .then(a.classification.is_none().cmp(&b.classification.is_none()))
    });

    EventRankings { event_id, groups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::format_athlete_id;

    struct Fixture {
        event_id: Uuid,
        swimmers: HashMap<Uuid, Swimmer>,
        results: Vec<RaceResult>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                event_id: Uuid::new_v4(),
                swimmers: HashMap::new(),
                results: Vec::new(),
            }
        }

        fn swimmer(&mut self, name: &str, classification: Option<&str>) -> Uuid {
            let id = Uuid::new_v4();
            let ordinal = self.swimmers.len() as u64 + 1;
            self.swimmers.insert(
                id,
                Swimmer {
                    id,
                    athlete_id: format_athlete_id(2026, ordinal),
                    name: name.to_string(),
                    age: 20,
                    gender: "X".to_string(),
                    classification: classification.map(String::from),
                    country: Some("NZL".to_string()),
                    club: None,
                    created_at: chrono::Utc::now().naive_utc(),
                },
            );
            id
        }

        fn swim(&mut self, swimmer_id: Uuid, timing: f64) {
            self.results.push(RaceResult {
                id: Uuid::new_v4(),
                swimmer_id,
                event_id: self.event_id,
                meet_id: Uuid::new_v4(),
                timing,
                recorded_at: chrono::Utc::now().naive_utc(),
            });
        }

        fn rank(&self) -> EventRankings {
            rank_results(self.event_id, &self.results, &self.swimmers)
        }
    }

    fn names(group: &ClassificationGroup) -> Vec<&str> {
        group.entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_best_time_per_swimmer_within_classification() {
        let mut f = Fixture::new();
        let a = f.swimmer("A", Some("S8"));
        let b = f.swimmer("B", Some("S8"));
        let c = f.swimmer("C", Some("S9"));
        f.swim(a, 62.0);
        f.swim(a, 60.5);
        f.swim(b, 61.0);
        f.swim(c, 58.0);

        let rankings = f.rank();
        assert_eq!(rankings.groups.len(), 2);

        let s8 = rankings.group("S8").unwrap();
        assert_eq!(names(s8), vec!["A", "B"]);
        assert_eq!(s8.entries[0].best_time, 60.5);
        assert_eq!(s8.entries[0].rank, 1);
        assert_eq!(s8.entries[0].medal, Some(Medal::Gold));
        assert_eq!(s8.entries[1].rank, 2);
        assert_eq!(s8.entries[1].medal, Some(Medal::Silver));

        let s9 = rankings.group("S9").unwrap();
        assert_eq!(names(s9), vec!["C"]);
        assert_eq!(s9.entries[0].rank, 1);
    }

    #[test]
    fn test_unclassified_swimmers_rank_in_open_group() {
        let mut f = Fixture::new();
        let x = f.swimmer("X", None);
        let y = f.swimmer("Y", Some("  "));
        let z = f.swimmer("Z", None);
        f.swim(x, 12.5);
        f.swim(y, 11.9);
        f.swim(z, 13.0);

        let rankings = f.rank();
        assert_eq!(rankings.groups.len(), 1);

        let open = rankings.group("Open").unwrap();
        assert_eq!(open.classification, None);
        assert_eq!(names(open), vec!["Y", "X", "Z"]);
        let medals: Vec<_> = open.entries.iter().map(|e| e.medal).collect();
        assert_eq!(
            medals,
            vec![Some(Medal::Gold), Some(Medal::Silver), Some(Medal::Bronze)]
        );
    }

    #[test]
    fn test_equal_times_rank_sequentially_in_first_seen_order() {
        let mut f = Fixture::new();
        let first = f.swimmer("First", Some("S5"));
        let second = f.swimmer("Second", Some("S5"));
        let third = f.swimmer("Third", Some("S5"));
        f.swim(second, 40.0);
        f.swim(first, 40.0);
        f.swim(third, 39.0);

        let s5 = f.rank().group("S5").cloned().unwrap();
        assert_eq!(names(&s5), vec!["Third", "Second", "First"]);
        let ranks: Vec<u32> = s5.entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_no_medal_beyond_third() {
        let mut f = Fixture::new();
        for (i, name) in ["P", "Q", "R", "S"].iter().enumerate() {
            let id = f.swimmer(name, Some("SB4"));
            f.swim(id, 70.0 + i as f64);
        }

        let group = f.rank().group("SB4").cloned().unwrap();
        assert_eq!(group.entries[3].rank, 4);
        assert_eq!(group.entries[3].medal, None);
    }

    #[test]
    fn test_results_of_unknown_swimmers_are_skipped() {
        let mut f = Fixture::new();
        let known = f.swimmer("Known", Some("S10"));
        f.swim(known, 55.0);
        f.swim(Uuid::new_v4(), 50.0);

        let rankings = f.rank();
        let group = rankings.group("S10").unwrap();
        assert_eq!(names(group), vec!["Known"]);
        assert_eq!(group.entries[0].rank, 1);
    }

    #[test]
    fn test_groups_are_ordered_by_label_and_ranking_is_repeatable() {
        let mut f = Fixture::new();
        let s9 = f.swimmer("Nine", Some("S9"));
        let open = f.swimmer("Open swimmer", None);
        let s10 = f.swimmer("Ten", Some("S10"));
        f.swim(s9, 30.0);
        f.swim(open, 31.0);
        f.swim(s10, 29.0);

        let rankings = f.rank();
        let labels: Vec<&str> = rankings.groups.iter().map(|g| g.label()).collect();
        assert_eq!(labels, vec!["Open", "S10", "S9"]);
        assert_eq!(rankings, f.rank());
    }

    #[test]
    fn test_no_results_gives_empty_rankings() {
        let f = Fixture::new();
        assert!(f.rank().groups.is_empty());
    }
}
