//! Text Feature Extractor — turns raw conversation text into emotion tags,
//! topical keywords, and a short summary.
//!
//! Everything here is a deterministic closed-vocabulary heuristic, not real
//! NLP. The two public signatures (`text -> Vec<Emotion>`, `text -> Vec<String>`)
//! are the seam for swapping in a principled implementation later without
//! touching the aggregator, bucketer, or recommender.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::category_client::{CategoryClient, CategoryError};
use crate::insight::dictionary::{emotion_keywords, COMMON_NOUNS, STOPWORD_FRAGMENTS};
use crate::models::record::{ChatMessage, Emotion, MessageType};

/// Per-conversation keyword cap.
const MAX_KEYWORDS: usize = 5;
/// Summary length threshold, in characters.
const SUMMARY_MAX_CHARS: usize = 100;

/// Concatenates the user's answer turns into one analysis string.
pub fn answer_text(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .filter(|m| m.kind == MessageType::Answer)
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extracts every emotion whose keyword dictionary has a substring hit.
///
/// Multiple emotions may be returned; if nothing matches, `[peace]` is the
/// default so that every record carries at least one emotion.
pub fn extract_emotions(text: &str) -> Vec<Emotion> {
    let lowered = text.to_lowercase();

    let mut emotions: Vec<Emotion> = Emotion::ALL
        .into_iter()
        .filter(|&emotion| {
            emotion_keywords(emotion)
                .iter()
                .any(|keyword| lowered.contains(keyword))
        })
        .collect();

    if emotions.is_empty() {
        emotions.push(Emotion::Peace);
    }
    emotions
}

fn hangul_word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new("[가-힣]{2,4}").expect("hangul word pattern is valid"))
}

/// The raw noun occurrence stream: curated-list hits first, then every 2-4
/// character Hangul run that survives the stopword exclusion. Duplicates are
/// kept — corpus ranking tallies occurrences, not distinct records.
pub fn extract_nouns(text: &str) -> Vec<String> {
    let mut found = Vec::new();
    let lowered = text.to_lowercase();

    for noun in COMMON_NOUNS {
        if lowered.contains(noun) {
            found.push((*noun).to_string());
        }
    }

    for word in hangul_word_pattern().find_iter(text) {
        let word = word.as_str();
        if !STOPWORD_FRAGMENTS.iter().any(|stop| word.contains(stop)) {
            found.push(word.to_string());
        }
    }

    found
}

/// Per-conversation keyword extraction: noun stream, deduplicated in first-seen
/// order, capped at 5. Curated terms precede pattern hits, so they win the cap.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keywords = Vec::new();

    for noun in extract_nouns(text) {
        if seen.insert(noun.clone()) {
            keywords.push(noun);
            if keywords.len() == MAX_KEYWORDS {
                break;
            }
        }
    }

    keywords
}

/// Builds a short synopsis of the conversation text.
///
/// Text of 100 characters or fewer passes through unchanged. Longer text is
/// reduced to first sentence + last sentence when at least two
/// sentence-delimited fragments exist, otherwise hard-truncated at 100
/// characters. Counts are characters, not bytes.
pub fn generate_summary(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return "대화 내용이 없습니다.".to_string();
    }

    if text.chars().count() <= SUMMARY_MAX_CHARS {
        return text.to_string();
    }

    let sentences: Vec<&str> = text
        .split(['.', '!', '?', '。'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if sentences.len() >= 2 {
        return format!("{}... {}", sentences[0], sentences[sentences.len() - 1]);
    }

    let head: String = text.chars().take(SUMMARY_MAX_CHARS).collect();
    format!("{head}...")
}

/// Local stand-in for the remote category service: the first extracted keyword.
pub fn fallback_category(messages: &[ChatMessage]) -> Option<String> {
    extract_keywords(&answer_text(messages)).into_iter().next()
}

/// Derives a topical category for a conversation.
///
/// This is the one remote boundary in the engine: a single attempt against the
/// category service, and on any failure — client disabled, network error,
/// non-2xx, malformed body — the local keyword fallback answers instead. The
/// failure is never surfaced to the caller.
pub async fn extract_category(
    messages: &[ChatMessage],
    client: &CategoryClient,
) -> Option<String> {
    match client.extract(messages).await {
        // The service answering "no category" is a valid result, not a failure.
        Ok(category) => category,
        Err(CategoryError::Disabled) => {
            debug!("category service disabled, using local keyword fallback");
            fallback_category(messages)
        }
        Err(err) => {
            warn!("category extraction failed, using local keyword fallback: {err}");
            fallback_category(messages)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(content: &str) -> ChatMessage {
        ChatMessage {
            id: "m1".to_string(),
            kind: MessageType::Answer,
            content: content.to_string(),
            timestamp: "2024-03-01T12:00:00Z".to_string(),
            images: None,
        }
    }

    #[test]
    fn test_extract_emotions_single_dictionary_hit() {
        let emotions = extract_emotions("오늘 정말 행복한 하루였다");
        assert!(emotions.contains(&Emotion::Joy));
    }

    #[test]
    fn test_extract_emotions_multiple_hits_not_exclusive() {
        let emotions = extract_emotions("행복했지만 조금 우울했다");
        assert!(emotions.contains(&Emotion::Joy));
        assert!(emotions.contains(&Emotion::Sadness));
    }

    #[test]
    fn test_extract_emotions_peace_fallback_when_no_match() {
        let emotions = extract_emotions("xyz 123");
        assert_eq!(emotions, vec![Emotion::Peace]);
    }

    #[test]
    fn test_extract_emotions_never_empty() {
        for text in ["", "hello world", "오늘 행복한 날"] {
            assert!(!extract_emotions(text).is_empty(), "empty for {text:?}");
        }
    }

    #[test]
    fn test_overlapping_stems_hit_both_joy_and_excitement() {
        // "즐거" lives in both dictionaries on purpose.
        let emotions = extract_emotions("즐거운 하루");
        assert!(emotions.contains(&Emotion::Joy));
        assert!(emotions.contains(&Emotion::Excitement));
    }

    #[test]
    fn test_extract_keywords_curated_terms_found() {
        let keywords = extract_keywords("친구와 카페에서 커피를 마셨다");
        assert!(keywords.contains(&"친구".to_string()));
        assert!(keywords.contains(&"카페".to_string()));
        assert!(keywords.contains(&"커피".to_string()));
    }

    #[test]
    fn test_extract_keywords_capped_at_five() {
        let keywords =
            extract_keywords("친구 가족 학교 직장 취미 운동 음식 여행 영화 음악");
        assert_eq!(keywords.len(), 5);
    }

    #[test]
    fn test_extract_keywords_curated_pass_precedes_pattern_pass() {
        // "친구" is curated; whatever the pattern pass adds comes after it.
        let keywords = extract_keywords("친구랑 놀았다");
        assert_eq!(keywords.first(), Some(&"친구".to_string()));
    }

    #[test]
    fn test_extract_keywords_deduplicated() {
        let keywords = extract_keywords("커피 커피 커피");
        let coffee_hits = keywords.iter().filter(|k| *k == "커피").count();
        assert_eq!(coffee_hits, 1);
    }

    #[test]
    fn test_extract_nouns_keeps_duplicate_occurrences() {
        let nouns = extract_nouns("산책 산책");
        let walks = nouns.iter().filter(|n| *n == "산책").count();
        assert!(walks >= 2, "expected repeated occurrences, got {nouns:?}");
    }

    #[test]
    fn test_generate_summary_short_text_is_identity() {
        assert_eq!(generate_summary("짧은 글"), "짧은 글");
    }

    #[test]
    fn test_generate_summary_empty_text() {
        assert_eq!(generate_summary(""), "대화 내용이 없습니다.");
    }

    #[test]
    fn test_generate_summary_first_and_last_sentence() {
        let first = "아침에 일어나서 산책을 했다";
        let middle = "가".repeat(80);
        let last = "저녁에는 집에서 조용히 일기를 썼다";
        let text = format!("{first}. {middle}. {last}.");
        assert!(text.chars().count() > 100);
        let summary = generate_summary(&text);
        assert_eq!(summary, format!("{first}... {last}"));
    }

    #[test]
    fn test_generate_summary_hard_truncation_without_sentences() {
        let text = "가".repeat(150);
        let summary = generate_summary(&text);
        assert_eq!(summary.chars().count(), 103); // 100 chars + "..."
        assert!(summary.ends_with("..."));
    }

    #[test]
    fn test_generate_summary_counts_chars_not_bytes() {
        // 40 Hangul characters is 120 bytes but still under the 100-char limit.
        let text = "가".repeat(40);
        assert_eq!(generate_summary(&text), text);
    }

    #[test]
    fn test_answer_text_filters_to_answer_turns() {
        let messages = vec![
            ChatMessage {
                id: "q1".to_string(),
                kind: MessageType::Question,
                content: "오늘 어땠나요?".to_string(),
                timestamp: "2024-03-01T12:00:00Z".to_string(),
                images: None,
            },
            answer("좋았어요"),
            answer("친구를 만났어요"),
        ];
        assert_eq!(answer_text(&messages), "좋았어요 친구를 만났어요");
    }

    #[test]
    fn test_fallback_category_is_first_keyword() {
        let messages = vec![answer("친구와 카페에 갔다")];
        assert_eq!(fallback_category(&messages), Some("친구".to_string()));
    }

    #[test]
    fn test_fallback_category_none_for_empty_conversation() {
        assert_eq!(fallback_category(&[]), None);
    }
}
