use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::insight::aggregator::generate_monthly_report;
use crate::insight::recommender::{recommend, recommend_by_date};
use crate::insight::weekly::{bucket_weekly, max_weekly_total, week_label, WeeklyScope};
use crate::models::record::{MonthlyReport, Record, WeeklyBucket};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub month: String,
}

/// GET /api/v1/insights/report?month=YYYY-MM
pub async fn handle_monthly_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<MonthlyReport>, AppError> {
    validate_month(&query.month)?;
    let records = state.store.get_all().await?;
    Ok(Json(generate_monthly_report(&records, &query.month)))
}

#[derive(Debug, Deserialize)]
pub struct EmotionFlowQuery {
    pub month: Option<String>,
    pub days: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionFlowWeek {
    #[serde(flatten)]
    pub bucket: WeeklyBucket,
    pub label: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionFlowResponse {
    pub weeks: Vec<EmotionFlowWeek>,
    /// Largest total across buckets, for chart scaling. Floors at 1.
    pub max_total: u32,
}

/// GET /api/v1/insights/emotion-flow?month=YYYY-MM | ?days=N
pub async fn handle_emotion_flow(
    State(state): State<AppState>,
    Query(query): Query<EmotionFlowQuery>,
) -> Result<Json<EmotionFlowResponse>, AppError> {
    let scope = match (query.month, query.days) {
        (Some(_), Some(_)) => {
            return Err(AppError::Validation(
                "month and days are mutually exclusive".to_string(),
            ))
        }
        (Some(month), None) => {
            validate_month(&month)?;
            WeeklyScope::Month(month)
        }
        (None, Some(days)) if days > 0 => WeeklyScope::RecentDays(days),
        (None, Some(_)) => {
            return Err(AppError::Validation("days must be positive".to_string()))
        }
        (None, None) => WeeklyScope::All,
    };

    let records = state.store.get_all().await?;
    let buckets = bucket_weekly(&records, &scope, Utc::now().date_naive());
    let max_total = max_weekly_total(&buckets);

    let weeks = buckets
        .into_iter()
        .map(|bucket| {
            let label = week_label(&bucket.week_key).unwrap_or_default();
            EmotionFlowWeek { bucket, label }
        })
        .collect();

    Ok(Json(EmotionFlowResponse { weeks, max_total }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationQuery {
    pub record_id: Option<String>,
    pub date: Option<String>,
}

/// GET /api/v1/insights/recommendations?recordId=... | ?date=YYYY-MM-DD
///
/// With `recordId` the focal record anchors similarity ranking; with `date`
/// the same-weekday view answers; with neither, plain recency.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Query(query): Query<RecommendationQuery>,
) -> Result<Json<Vec<Record>>, AppError> {
    if query.record_id.is_some() && query.date.is_some() {
        return Err(AppError::Validation(
            "recordId and date are mutually exclusive".to_string(),
        ));
    }

    let records = state.store.get_all().await?;

    if let Some(date) = query.date {
        return Ok(Json(recommend_by_date(&records, &date)));
    }

    let focal = match query.record_id {
        Some(id) => Some(
            state
                .store
                .get(&id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Record {id} not found")))?,
        ),
        None => None,
    };

    Ok(Json(recommend(&records, focal.as_ref())))
}

fn validate_month(month: &str) -> Result<(), AppError> {
    let well_formed = month.len() == 7
        && NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").is_ok();
    if well_formed {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "month must be YYYY-MM, got '{month}'"
        )))
    }
}
