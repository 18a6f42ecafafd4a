//! Similarity Recommender — ranks records against a focal record by shared
//! emotions (or shared tags), blended with recency. Pure single-pass ranking;
//! no state machine and nothing cached between calls.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

use crate::models::record::Record;

/// Final recommendation list cap.
const MAX_RECOMMENDATIONS: usize = 5;
/// Similarity candidates taken before the union with the recency list.
const MAX_SIMILAR: usize = 3;

/// Recommends records for a focal record, or by recency when none is given.
///
/// With a focal record carrying emotions, other records are ranked by
/// shared-emotion count; with emotions empty but tags present, by shared-tag
/// count. The top 3 are unioned with the 5 most recent records — recency
/// order first when deduplicating — and capped at 5. The focal record never
/// appears in its own recommendations.
pub fn recommend(all: &[Record], focal: Option<&Record>) -> Vec<Record> {
    if all.is_empty() {
        return Vec::new();
    }

    let mut recent: Vec<&Record> = all
        .iter()
        .filter(|record| focal.map_or(true, |f| record.id != f.id))
        .collect();
    // ISO dates compare lexicographically; equal dates keep corpus order.
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(MAX_RECOMMENDATIONS);

    if let Some(focal) = focal {
        if !focal.emotions.is_empty() {
            let similar = rank_by_overlap(all, &focal.id, |record| {
                record
                    .emotions
                    .iter()
                    .filter(|e| focal.emotions.contains(e))
                    .count()
            });
            return merge_unique(&recent, &similar);
        }

        if !focal.tags.is_empty() {
            let similar = rank_by_overlap(all, &focal.id, |record| {
                record
                    .tags
                    .iter()
                    .filter(|t| focal.tags.contains(t))
                    .count()
            });
            return merge_unique(&recent, &similar);
        }
    }

    recent.into_iter().cloned().collect()
}

/// Ranks non-focal records by an overlap count, descending, keeping only
/// records with at least one shared element. Stable for equal counts.
fn rank_by_overlap<'a, F>(all: &'a [Record], focal_id: &str, overlap: F) -> Vec<&'a Record>
where
    F: Fn(&Record) -> usize,
{
    let mut ranked: Vec<(&Record, usize)> = all
        .iter()
        .filter(|record| record.id != focal_id)
        .map(|record| (record, overlap(record)))
        .filter(|(_, count)| *count > 0)
        .collect();

    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(MAX_SIMILAR)
        .map(|(record, _)| record)
        .collect()
}

fn merge_unique(recent: &[&Record], similar: &[&Record]) -> Vec<Record> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for record in recent.iter().chain(similar.iter()) {
        if seen.insert(record.id.clone()) {
            merged.push((*record).clone());
            if merged.len() == MAX_RECOMMENDATIONS {
                break;
            }
        }
    }

    merged
}

/// Recommends records that fall on the same weekday as `target_date`, newest
/// first, capped at 3. Drives the "on this day" view.
pub fn recommend_by_date(all: &[Record], target_date: &str) -> Vec<Record> {
    let Ok(target) = NaiveDate::parse_from_str(target_date, "%Y-%m-%d") else {
        return Vec::new();
    };
    let weekday = target.weekday();

    let mut same_day: Vec<&Record> = all
        .iter()
        .filter(|record| {
            NaiveDate::parse_from_str(&record.date, "%Y-%m-%d")
                .map(|d| d.weekday() == weekday)
                .unwrap_or(false)
        })
        .collect();

    same_day.sort_by(|a, b| b.date.cmp(&a.date));
    same_day.into_iter().take(3).cloned().collect()
}
