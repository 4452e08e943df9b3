//! Request handlers for the dashboard.

use axum::Json;
use axum::extract::State;
use axum::response::Html;
use serde::{Deserialize, Serialize};

use crate::dashboard::AppState;
use crate::dashboard::charts::{Overview, build_overview};
use crate::error::{MaydayError, Result};
use crate::ml::pipeline::Model;

/// The dashboard page; charts and results render client-side from the
/// JSON endpoints.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("page.html"))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CategoryResult {
    /// Raw category column name.
    pub name: String,
    /// Human-readable label ("medical_help" becomes "Medical Help").
    pub label: String,
    /// Whether the message was classified into this category.
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub message: String,
    pub categories: Vec<CategoryResult>,
}

/// Classify a single message into every category.
///
/// One synchronous prediction per request; tokenization uses the same
/// analyzer chain the pipeline was trained with.
pub async fn classify(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(MaydayError::invalid_argument("message must not be empty"));
    }

    let labels = state.pipeline.predict_message(message)?;
    let categories = state
        .pipeline
        .category_names()
        .iter()
        .zip(&labels)
        .map(|(name, &value)| CategoryResult {
            name: name.clone(),
            label: display_label(name),
            active: value == 1,
        })
        .collect();

    Ok(Json(ClassifyResponse {
        message: message.to_string(),
        categories,
    }))
}

/// Chart data, recomputed on every request.
pub async fn overview(State(state): State<AppState>) -> Result<Json<Overview>> {
    let overview = build_overview(&state.table, &state.analyzer, &mut rand::rng())?;
    Ok(Json(overview))
}

/// Turn a category column name into a display label: underscores become
/// spaces, words are title-cased.
pub fn display_label(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::MessageRecord;
    use crate::data::table::MessageTable;
    use crate::ml::pipeline::ClassificationPipeline;

    fn sample_state() -> AppState {
        let records = vec![
            MessageRecord::new(1, "we need clean water", "direct", vec![1, 0]),
            MessageRecord::new(2, "water tank is empty", "direct", vec![1, 0]),
            MessageRecord::new(3, "houses destroyed need shelter", "news", vec![0, 1]),
            MessageRecord::new(4, "emergency shelter required", "news", vec![0, 1]),
            MessageRecord::new(5, "send water bottles", "social", vec![1, 0]),
            MessageRecord::new(6, "families need shelter tents", "social", vec![0, 1]),
        ];
        let table = MessageTable::new(
            records,
            vec!["water".to_string(), "medical_help".to_string()],
        )
        .unwrap();

        let mut pipeline = ClassificationPipeline::new(table.category_names().to_vec());
        pipeline
            .fit(&table.messages(), &table.labels().unwrap())
            .unwrap();

        AppState::new(pipeline, table).unwrap()
    }

    #[test]
    fn test_display_label() {
        assert_eq!(display_label("medical_help"), "Medical Help");
        assert_eq!(display_label("water"), "Water");
        assert_eq!(display_label("aid_related"), "Aid Related");
    }

    #[tokio::test]
    async fn test_health() {
        let response = health().await;
        assert_eq!(response.0.status, "healthy");
    }

    #[tokio::test]
    async fn test_classify() {
        let state = sample_state();
        let response = classify(
            State(state),
            Json(ClassifyRequest {
                message: "we need food and water".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.0.categories.len(), 2);
        assert_eq!(response.0.categories[0].name, "water");
        assert_eq!(response.0.categories[1].label, "Medical Help");
    }

    #[tokio::test]
    async fn test_classify_empty_message_rejected() {
        let state = sample_state();
        let result = classify(
            State(state),
            Json(ClassifyRequest {
                message: "   ".to_string(),
            }),
        )
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_overview() {
        let state = sample_state();
        let response = overview(State(state)).await.unwrap();

        assert_eq!(response.0.genre_counts.len(), 3);
        assert_eq!(response.0.category_counts.len(), 2);
        assert!(!response.0.top_tokens.is_empty());
    }
}
