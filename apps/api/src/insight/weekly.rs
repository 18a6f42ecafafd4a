//! Time-Bucketer — groups records into Monday-aligned calendar weeks and
//! tallies per-emotion counts for the emotion-flow trend view.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::record::{Record, WeeklyBucket};

/// Pre-bucketing filter. Month scoping and recent-days scoping are mutually
/// exclusive; the handler rejects requests carrying both.
#[derive(Debug, Clone, PartialEq)]
pub enum WeeklyScope {
    All,
    /// Exact YYYY-MM match on the record date.
    Month(String),
    /// Records dated within the last N days of `today`, inclusive.
    RecentDays(i64),
}

/// Computes the bucket key for a date: the Monday of its week, YYYY-MM-DD.
///
/// Sunday belongs to the *preceding* Monday's week, so a Sunday record and
/// the following Monday's record land in different buckets. Returns `None`
/// for unparsable dates.
pub fn week_key(date: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some(week_key_of(date))
}

fn week_key_of(date: NaiveDate) -> String {
    monday_of(date).format("%Y-%m-%d").to_string()
}

fn monday_of(date: NaiveDate) -> NaiveDate {
    let day_of_week = date.weekday().num_days_from_sunday() as i64; // 0 = Sunday
    let monday_offset = if day_of_week == 0 { -6 } else { 1 - day_of_week };
    date + Duration::days(monday_offset)
}

/// Groups records into weekly buckets, sorted chronologically by bucket key.
///
/// Records with unparsable dates are silently excluded. `today` anchors the
/// recent-days scope so callers (and tests) control the reference point.
pub fn bucket_weekly(records: &[Record], scope: &WeeklyScope, today: NaiveDate) -> Vec<WeeklyBucket> {
    let mut buckets: BTreeMap<String, BTreeMap<_, u32>> = BTreeMap::new();

    for record in records {
        let Ok(date) = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d") else {
            continue;
        };

        match scope {
            WeeklyScope::All => {}
            WeeklyScope::Month(month) => {
                if record.date.get(0..7) != Some(month.as_str()) {
                    continue;
                }
            }
            WeeklyScope::RecentDays(days) => {
                if date < today - Duration::days(*days) {
                    continue;
                }
            }
        }

        let counts = buckets.entry(week_key_of(date)).or_default();
        for &emotion in &record.emotions {
            *counts.entry(emotion).or_insert(0) += 1;
        }
    }

    buckets
        .into_iter()
        .map(|(week_key, counts)| WeeklyBucket { week_key, counts })
        .collect()
}

/// The largest total-per-bucket value, used by consumers to scale a chart.
/// Floors at 1 so an empty series never divides by zero. Recomputed on every
/// call — never cache this against a live bucket set.
pub fn max_weekly_total(buckets: &[WeeklyBucket]) -> u32 {
    buckets
        .iter()
        .map(|bucket| bucket.counts.values().sum::<u32>())
        .max()
        .unwrap_or(0)
        .max(1)
}

/// Renders a bucket key as a week range label: `M/D~D` when the week's Sunday
/// falls in the same month as its Monday, else `M/D~M/D`.
pub fn week_label(week_key: &str) -> Option<String> {
    let monday = NaiveDate::parse_from_str(week_key, "%Y-%m-%d").ok()?;
    let sunday = monday + Duration::days(6);

    if monday.month() == sunday.month() {
        Some(format!("{}/{}~{}", monday.month(), monday.day(), sunday.day()))
    } else {
        Some(format!(
            "{}/{}~{}/{}",
            monday.month(),
            monday.day(),
            sunday.month(),
            sunday.day()
        ))
    }
}
