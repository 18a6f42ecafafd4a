use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The closed emotion vocabulary. Fixed at 8 variants — never extended at
/// runtime; the whole aggregation pipeline assumes this set is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Love,
    Peace,
    Excitement,
}

impl Emotion {
    /// All emotions in dictionary-scan order. Extraction iterates this order,
    /// so multi-emotion results are stable across runs.
    pub const ALL: [Emotion; 8] = [
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Surprise,
        Emotion::Love,
        Emotion::Peace,
        Emotion::Excitement,
    ];
}

/// One persisted diary entry. The wire format is camelCase to stay compatible
/// with the record payloads the clients already store and render.
///
/// Invariant: `emotions` is never empty — extraction falls back to `peace`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    /// ISO calendar date (YYYY-MM-DD) — the partitioning key for all
    /// period-scoped aggregation.
    pub date: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub emotions: Vec<Emotion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Question,
    Answer,
    Image,
}

/// A single chat turn as produced by the conversation UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MessageType,
    pub content: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

/// One row of an emotion distribution.
///
/// `percentage` is computed against the total number of emotion occurrences,
/// not the record count — a record with three emotions contributes three.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionData {
    pub emotion: Emotion,
    pub count: u32,
    pub percentage: u32,
}

/// Aggregated report for one calendar month (YYYY-MM).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub month: String,
    pub emotions: Vec<EmotionData>,
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_moment: Option<Record>,
    pub total_records: u32,
}

/// One Monday-aligned week of stacked emotion counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyBucket {
    /// The Monday of the week, YYYY-MM-DD.
    pub week_key: String,
    pub counts: BTreeMap<Emotion, u32>,
}
