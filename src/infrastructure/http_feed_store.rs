// Object storage feed store over plain HTTP
use crate::application::feed_store::FeedStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

const LOGGED_BODY_LIMIT: usize = 256;

#[derive(Debug, Clone)]
pub struct HttpFeedStore {
    client: reqwest::Client,
    endpoint: String,
    bucket: String,
    key: String,
    token: Option<String>,
}

impl HttpFeedStore {
    pub fn new(
        endpoint: String,
        bucket: String,
        key: String,
        token: Option<String>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            bucket,
            key,
            token,
        }
    }

    fn object_url(&self) -> String {
        let key = self
            .key
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!("{}/{}/{}", self.endpoint, self.bucket, key)
    }
}

#[async_trait]
impl FeedStore for HttpFeedStore {
    async fn get_raw_data(&self) -> Result<String> {
        let url = self.object_url();
        tracing::debug!("Fetching feed from {}", url);

        let mut request = self.client.get(&url).header("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Token {}", token));
        }

        let response = request
            .send()
            .await
            .context("Failed to send request to object storage")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            // The body can echo bucket internals; keep it in the logs only.
            tracing::warn!(
                "Object storage answered {}: {}",
                status,
                body.chars().take(LOGGED_BODY_LIMIT).collect::<String>()
            );
            anyhow::bail!("Feed fetch failed with status {}", status);
        }

        response
            .text()
            .await
            .context("Failed to read feed body")
    }

    async fn save_raw_data(&self, _content: &str) -> Result<()> {
        anyhow::bail!("Writing the feed to object storage is not implemented")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};

    fn store(endpoint: String, key: &str) -> HttpFeedStore {
        HttpFeedStore::new(
            endpoint,
            "coviz".to_string(),
            key.to_string(),
            None,
            Duration::from_secs(2),
        )
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_object_url() {
        let store = store(
            "https://storage.example.com/".to_string(),
            "exports/latest data.json",
        );
        assert_eq!(
            store.object_url(),
            "https://storage.example.com/coviz/exports/latest%20data.json"
        );
    }

    #[tokio::test]
    async fn test_reads_object() {
        let router = Router::new().route(
            "/coviz/latestData.json",
            get(|| async { r#"{"dates":["07.03"]}"# }),
        );
        let endpoint = serve(router).await;

        let body = store(endpoint, "latestData.json").get_raw_data().await.unwrap();
        assert_eq!(body, r#"{"dates":["07.03"]}"#);
    }

    #[tokio::test]
    async fn test_error_status_hides_body() {
        let router = Router::new().route(
            "/coviz/latestData.json",
            get(|| async {
                (
                    StatusCode::FORBIDDEN,
                    "<Error><Code>AccessDenied</Code><BucketOwner>internal</BucketOwner></Error>",
                )
            }),
        );
        let endpoint = serve(router).await;

        let err = store(endpoint, "latestData.json")
            .get_raw_data()
            .await
            .unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("403"));
        assert!(!message.contains("BucketOwner"));
    }

    #[tokio::test]
    async fn test_save_not_implemented() {
        let store = store("http://localhost".to_string(), "latestData.json");
        assert!(store.save_raw_data("{}").await.is_err());
    }
}
