//! Conversation ingest — builds a tagged `Record` from a completed
//! conversation before it is persisted. This is the only place the extractor
//! runs; every downstream consumer works from the stored tags and emotions.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::category_client::CategoryClient;
use crate::insight::extractor::{
    answer_text, extract_category, extract_emotions, extract_keywords, generate_summary,
};
use crate::models::record::{ChatMessage, MessageType, Record};

#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    /// Conversation id; generated when absent.
    pub id: Option<String>,
    /// Record date (YYYY-MM-DD); defaults to today.
    pub date: Option<String>,
    pub question: String,
    pub messages: Vec<ChatMessage>,
}

/// Derives a full record from a conversation.
///
/// Emotions are guaranteed non-empty (peace fallback), the category joins the
/// tag list at the front when the remote service (or local fallback) produces
/// one, and `created_at` is stamped exactly once, here.
pub async fn build_record(
    req: &IngestRequest,
    category_client: &CategoryClient,
    now: DateTime<Utc>,
) -> Record {
    let text = answer_text(&req.messages);

    let emotions = extract_emotions(&text);
    let mut tags = extract_keywords(&text);
    if let Some(category) = extract_category(&req.messages, category_client).await {
        if !tags.contains(&category) {
            tags.insert(0, category);
        }
    }

    Record {
        id: req
            .id
            .clone()
            .unwrap_or_else(|| format!("conv_{}", Uuid::new_v4().simple())),
        date: req
            .date
            .clone()
            .unwrap_or_else(|| now.date_naive().format("%Y-%m-%d").to_string()),
        question: req.question.clone(),
        answer: text.clone(),
        images: collect_images(&req.messages),
        tags,
        emotions,
        summary: Some(generate_summary(&text)),
        created_at: now,
    }
}

fn collect_images(messages: &[ChatMessage]) -> Vec<String> {
    let mut images = Vec::new();
    for message in messages.iter().filter(|m| m.kind == MessageType::Image) {
        match &message.images {
            Some(urls) => images.extend(urls.iter().cloned()),
            None if !message.content.is_empty() => images.push(message.content.clone()),
            None => {}
        }
    }
    images
}
