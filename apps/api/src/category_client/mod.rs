/// Category Client — the single point of entry for the one remote call the
/// engine makes: conversation → topical category.
///
/// ARCHITECTURAL RULE: no other module may reach the category service
/// directly, and failures never propagate past the extractor — the local
/// keyword fallback answers instead.
///
/// Exactly one attempt per invocation. No retries, no timeout: a failed call
/// is treated as permanently failed for that invocation.
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::models::record::ChatMessage;

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("category service not configured")]
    Disabled,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned status {status}")]
    Api { status: u16 },
}

#[derive(Debug, Deserialize)]
struct CategoryResponse {
    category: Option<String>,
}

/// Thin client for `POST {endpoint}` with body `{"messages": [...]}`,
/// expecting `{"category": string|null}` back.
#[derive(Clone)]
pub struct CategoryClient {
    client: Client,
    endpoint: Option<String>,
}

impl CategoryClient {
    /// `endpoint = None` disables the remote call entirely; every extraction
    /// then answers with the local fallback.
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Makes the single category request. `Ok(None)` means the service
    /// answered but found no category — a valid result, not a failure.
    pub async fn extract(
        &self,
        messages: &[ChatMessage],
    ) -> Result<Option<String>, CategoryError> {
        let endpoint = self.endpoint.as_deref().ok_or(CategoryError::Disabled)?;

        let response = self
            .client
            .post(endpoint)
            .json(&json!({ "messages": messages }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CategoryError::Api {
                status: status.as_u16(),
            });
        }

        let body: CategoryResponse = response.json().await?;
        let category = body
            .category
            .as_deref()
            .map(clean_category)
            .filter(|c| !c.is_empty());

        debug!("category service answered: {category:?}");
        Ok(category)
    }
}

/// Normalizes a raw category answer: strips label prefixes the upstream model
/// sometimes adds, keeps the first line, and drops anything past a period.
fn clean_category(raw: &str) -> String {
    let mut category = raw.trim();

    for prefix in ["카테고리는", "카테고리:", "카테고리", "답변은", "답변:", "답변"] {
        if let Some(stripped) = category.strip_prefix(prefix) {
            category = stripped.trim_start();
            break;
        }
    }

    category
        .lines()
        .next()
        .unwrap_or("")
        .split('.')
        .next()
        .unwrap_or("")
        .trim()
        .to_string()
}
