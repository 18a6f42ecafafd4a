//! Corpus Aggregator — period-scoped statistics over a record collection.
//!
//! Records reaching this module already carry their extracted tags and
//! emotions; nothing here re-runs the extractor on conversation text. All
//! outputs are derived views, recomputed from scratch on every call.

use std::collections::HashMap;

use crate::insight::extractor::extract_nouns;
use crate::models::record::{EmotionData, MonthlyReport, Record};

/// Corpus-level keyword ranking cap.
const MAX_CORPUS_KEYWORDS: usize = 7;

/// Tallies every emotion occurrence across the corpus and computes the
/// count/percentage breakdown, sorted by count descending.
///
/// The percentage base is the total number of emotion occurrences, not the
/// record count. Equal counts keep first-encounter order (stable sort).
pub fn aggregate_emotions(records: &[Record]) -> Vec<EmotionData> {
    let mut order = Vec::new();
    let mut counts = HashMap::new();

    for record in records {
        for &emotion in &record.emotions {
            match counts.get_mut(&emotion) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(emotion, 1u32);
                    order.push(emotion);
                }
            }
        }
    }

    let total: u32 = counts.values().sum();

    let mut distribution: Vec<EmotionData> = order
        .into_iter()
        .map(|emotion| {
            let count = counts[&emotion];
            EmotionData {
                emotion,
                count,
                percentage: if total > 0 {
                    ((count as f64 / total as f64) * 100.0).round() as u32
                } else {
                    0
                },
            }
        })
        .collect();

    distribution.sort_by(|a, b| b.count.cmp(&a.count));
    distribution
}

/// Ranks nouns across the whole corpus by occurrence frequency.
///
/// Runs the noun heuristic over each record's answer + summary, tallies every
/// occurrence, and returns the top 7. Ties break by first-seen order.
pub fn extract_corpus_keywords(records: &[Record]) -> Vec<String> {
    let mut order = Vec::new();
    let mut counts: HashMap<String, u32> = HashMap::new();

    for record in records {
        let text = format!(
            "{} {}",
            record.answer,
            record.summary.as_deref().unwrap_or("")
        );
        let text = text.trim();
        if text.is_empty() {
            continue;
        }

        for noun in extract_nouns(text) {
            match counts.get_mut(&noun) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(noun.clone(), 1);
                    order.push(noun);
                }
            }
        }
    }

    let mut ranked: Vec<(String, u32)> = order
        .into_iter()
        .map(|keyword| {
            let count = counts[&keyword];
            (keyword, count)
        })
        .collect();

    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(MAX_CORPUS_KEYWORDS)
        .map(|(keyword, _)| keyword)
        .collect()
}

/// Builds the aggregate report for one calendar month (YYYY-MM).
///
/// Only records whose date prefix equals `month` participate; records with
/// malformed dates simply never match the prefix. The highlight moment is the
/// record with the most emotion tags, first one winning on ties. An empty
/// month yields empty distributions and no highlight.
pub fn generate_monthly_report(records: &[Record], month: &str) -> MonthlyReport {
    let month_records: Vec<Record> = records
        .iter()
        .filter(|record| record.date.get(0..7) == Some(month))
        .cloned()
        .collect();

    let mut highlight: Option<&Record> = None;
    for record in &month_records {
        let replace = match highlight {
            None => true,
            // Strictly greater, so the earliest record holding the max wins.
            Some(best) => record.emotions.len() > best.emotions.len(),
        };
        if replace {
            highlight = Some(record);
        }
    }

    MonthlyReport {
        month: month.to_string(),
        emotions: aggregate_emotions(&month_records),
        keywords: extract_corpus_keywords(&month_records),
        highlight_moment: highlight.cloned(),
        total_records: month_records.len() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::Emotion;
    use chrono::Utc;

    fn make_record(id: &str, date: &str, emotions: Vec<Emotion>) -> Record {
        Record {
            id: id.to_string(),
            date: date.to_string(),
            question: "오늘 하루는 어땠나요?".to_string(),
            answer: String::new(),
            images: Vec::new(),
            tags: Vec::new(),
            emotions,
            summary: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_aggregate_emotions_empty_corpus() {
        assert!(aggregate_emotions(&[]).is_empty());
    }

    #[test]
    fn test_aggregate_emotions_percentage_base_is_occurrences() {
        // 2 records, 3 occurrences: joy appears twice (67%), love once (33%).
        let records = vec![
            make_record("r1", "2024-03-01", vec![Emotion::Joy, Emotion::Love]),
            make_record("r2", "2024-03-02", vec![Emotion::Joy]),
        ];
        let dist = aggregate_emotions(&records);
        assert_eq!(dist[0].emotion, Emotion::Joy);
        assert_eq!(dist[0].count, 2);
        assert_eq!(dist[0].percentage, 67);
        assert_eq!(dist[1].emotion, Emotion::Love);
        assert_eq!(dist[1].percentage, 33);
    }

    #[test]
    fn test_aggregate_emotions_percentages_sum_near_100() {
        let records = vec![
            make_record("r1", "2024-03-01", vec![Emotion::Joy, Emotion::Sadness]),
            make_record("r2", "2024-03-02", vec![Emotion::Joy, Emotion::Fear]),
            make_record("r3", "2024-03-03", vec![Emotion::Peace]),
        ];
        let sum: u32 = aggregate_emotions(&records)
            .iter()
            .map(|d| d.percentage)
            .sum();
        assert!((99..=101).contains(&sum), "sum was {sum}");
    }

    #[test]
    fn test_aggregate_emotions_ties_keep_encounter_order() {
        let records = vec![
            make_record("r1", "2024-03-01", vec![Emotion::Sadness]),
            make_record("r2", "2024-03-02", vec![Emotion::Joy]),
        ];
        let dist = aggregate_emotions(&records);
        // Both count 1; sadness was encountered first.
        assert_eq!(dist[0].emotion, Emotion::Sadness);
        assert_eq!(dist[1].emotion, Emotion::Joy);
    }

    #[test]
    fn test_corpus_keywords_ranked_by_occurrence_frequency() {
        let mut r1 = make_record("r1", "2024-03-01", vec![Emotion::Joy]);
        r1.answer = "친구 친구 친구 여행 여행 의자".to_string();
        let keywords = extract_corpus_keywords(&[r1]);
        let friend = keywords.iter().position(|k| k == "친구").unwrap();
        let trip = keywords.iter().position(|k| k == "여행").unwrap();
        let chair = keywords.iter().position(|k| k == "의자").unwrap();
        assert!(friend < trip, "expected 친구 before 여행: {keywords:?}");
        assert!(trip < chair, "expected 여행 before 의자: {keywords:?}");
    }

    #[test]
    fn test_corpus_keywords_ties_break_by_first_seen_order() {
        // Both nouns occur once (the pattern pass rejects both for carrying
        // particle fragments), so ranking falls back to first-seen order.
        let mut r1 = make_record("r1", "2024-03-01", vec![Emotion::Joy]);
        r1.answer = "가족 의자".to_string();
        let keywords = extract_corpus_keywords(&[r1]);
        let family = keywords.iter().position(|k| k == "가족").unwrap();
        let chair = keywords.iter().position(|k| k == "의자").unwrap();
        assert!(family < chair, "expected 가족 before 의자: {keywords:?}");
    }

    #[test]
    fn test_corpus_keywords_cap_is_seven() {
        let mut r1 = make_record("r1", "2024-03-01", vec![Emotion::Joy]);
        r1.answer = "친구 가족 학교 직장 취미 운동 음식 여행 영화 음악".to_string();
        assert_eq!(extract_corpus_keywords(&[r1]).len(), 7);
    }

    #[test]
    fn test_monthly_report_filters_by_month_prefix() {
        let records = vec![
            make_record("r1", "2024-03-05", vec![Emotion::Joy]),
            make_record("r2", "2024-04-01", vec![Emotion::Joy]),
            make_record("r3", "2024-03-20", vec![Emotion::Peace]),
            make_record("r4", "not-a-date", vec![Emotion::Anger]),
        ];
        let report = generate_monthly_report(&records, "2024-03");
        assert_eq!(report.total_records, 2);
        assert!(report
            .emotions
            .iter()
            .all(|d| d.emotion != Emotion::Anger));
    }

    #[test]
    fn test_monthly_report_empty_month() {
        let records = vec![make_record("r1", "2024-03-05", vec![Emotion::Joy])];
        let report = generate_monthly_report(&records, "2024-07");
        assert_eq!(report.total_records, 0);
        assert!(report.emotions.is_empty());
        assert!(report.keywords.is_empty());
        assert!(report.highlight_moment.is_none());
    }

    #[test]
    fn test_highlight_is_first_record_reaching_max_emotion_count() {
        let records = vec![
            make_record("r1", "2024-03-01", vec![Emotion::Joy]),
            make_record(
                "r2",
                "2024-03-02",
                vec![Emotion::Joy, Emotion::Love, Emotion::Peace],
            ),
            make_record(
                "r3",
                "2024-03-03",
                vec![Emotion::Sadness, Emotion::Fear, Emotion::Anger],
            ),
            make_record("r4", "2024-03-04", vec![Emotion::Joy, Emotion::Love]),
        ];
        let report = generate_monthly_report(&records, "2024-03");
        assert_eq!(report.highlight_moment.unwrap().id, "r2");
    }

    #[test]
    fn test_march_scenario_end_to_end() {
        // 4 March records among 10; emotion occurrences: joy 3, love 1, sadness 1.
        let mut records = vec![
            make_record("r1", "2024-03-01", vec![Emotion::Joy]),
            make_record("r2", "2024-03-08", vec![Emotion::Joy, Emotion::Love]),
            make_record("r3", "2024-03-15", vec![Emotion::Sadness]),
            make_record("r4", "2024-03-22", vec![Emotion::Joy]),
        ];
        for i in 0..6 {
            records.push(make_record(
                &format!("x{i}"),
                "2024-02-10",
                vec![Emotion::Peace],
            ));
        }

        let report = generate_monthly_report(&records, "2024-03");
        assert_eq!(report.total_records, 4);

        let joy = report
            .emotions
            .iter()
            .find(|d| d.emotion == Emotion::Joy)
            .unwrap();
        assert_eq!(joy.count, 3);
        assert_eq!(joy.percentage, 60);

        let love = report
            .emotions
            .iter()
            .find(|d| d.emotion == Emotion::Love)
            .unwrap();
        assert_eq!(love.count, 1);
        assert_eq!(love.percentage, 20);

        let sadness = report
            .emotions
            .iter()
            .find(|d| d.emotion == Emotion::Sadness)
            .unwrap();
        assert_eq!(sadness.percentage, 20);

        // r2 is the first (and only) record with two emotions.
        assert_eq!(report.highlight_moment.unwrap().id, "r2");
    }
}
