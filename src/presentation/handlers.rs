// HTTP request handlers
use crate::domain::projection::ProjectionMode;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct TabQuery {
    pub tab: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedStatus {
    pub last_updated_on: Option<DateTime<Utc>>,
    pub is_stale: bool,
    pub error: Option<String>,
    pub dates: usize,
    pub metrics: Vec<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List configured cards
pub async fn list_cards(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.card_service.list_cards())
}

/// Render one card for the selected tab (daily by default)
pub async fn get_card(
    Path(id): Path<String>,
    Query(query): Query<TabQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let mode = match query.tab.as_deref() {
        None => ProjectionMode::default(),
        Some(tab) => match tab.parse::<ProjectionMode>() {
            Ok(mode) => mode,
            Err(e) => {
                tracing::debug!("Rejecting card request for {}: {}", id, e);
                return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
            }
        },
    };

    match state.card_service.render(&id, mode).await {
        Some(card) => Json(card).into_response(),
        None => (StatusCode::NOT_FOUND, format!("unknown card '{}'", id)).into_response(),
    }
}

/// Summary of the cached feed
pub async fn feed_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let envelope = state.feed_service.latest().await;
    Json(FeedStatus {
        last_updated_on: envelope.last_updated_on,
        is_stale: envelope.is_stale,
        error: envelope.error.map(|e| e.to_string()),
        dates: envelope.dates.len(),
        metrics: envelope.metrics.into_keys().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::card_service::CardService;
    use crate::application::feed_service::FeedService;
    use crate::application::feed_store::FeedStore;
    use crate::infrastructure::config::{
        CardConfig, CardSeriesConfig, CardsConfig, FreshnessSettings,
    };
    use async_trait::async_trait;

    struct StaticStore;

    #[async_trait]
    impl FeedStore for StaticStore {
        async fn get_raw_data(&self) -> anyhow::Result<String> {
            Ok(r#"{
                "lastUpdatedOn": 1615125900,
                "dates": ["06.03", "07.03"],
                "metrics": { "confirmed": [10, 15] }
            }"#
            .to_string())
        }

        async fn save_raw_data(&self, _content: &str) -> anyhow::Result<()> {
            anyhow::bail!("not implemented")
        }
    }

    fn state() -> State<Arc<AppState>> {
        let feed_service = FeedService::new(Arc::new(StaticStore), FreshnessSettings::default());
        let cards = CardsConfig {
            cards: vec![CardConfig {
                id: "cases-per-day".to_string(),
                title: "Număr de cazuri pe zile".to_string(),
                embed_path: "cazuri-pe-zi".to_string(),
                short_date: false,
                series: vec![CardSeriesConfig {
                    metric: "confirmed".to_string(),
                    name: "Confirmați".to_string(),
                    color: "#f4a261".to_string(),
                }],
            }],
        };
        State(Arc::new(AppState {
            card_service: CardService::new(feed_service.clone(), cards),
            feed_service,
        }))
    }

    async fn card(id: &str, tab: Option<&str>) -> axum::response::Response {
        get_card(
            Path(id.to_string()),
            Query(TabQuery {
                tab: tab.map(str::to_string),
            }),
            state(),
        )
        .await
        .into_response()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_tab_defaults_to_daily() {
        let response = card("cases-per-day", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["activeTab"], "daily");
        assert_eq!(body["chart"]["series"][0]["type"], "bar");
        assert_eq!(body["chart"]["series"][0]["data"], serde_json::json!([10, 5]));
    }

    #[tokio::test]
    async fn test_cumulative_tab() {
        let response = card("cases-per-day", Some("cumulative")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["activeTab"], "cumulative");
        assert_eq!(body["chart"]["series"][0]["data"], serde_json::json!([10, 15]));
    }

    #[tokio::test]
    async fn test_unknown_tab_is_bad_request() {
        let response = card("cases-per-day", Some("weekly")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_card_is_not_found() {
        let response = card("tests-per-day", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_feed_status() {
        let response = feed_status(state()).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["dates"], 2);
        assert_eq!(body["metrics"], serde_json::json!(["confirmed"]));
    }
}
