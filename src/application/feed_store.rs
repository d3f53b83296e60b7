// Storage trait for the raw statistics feed
use async_trait::async_trait;

#[async_trait]
pub trait FeedStore: Send + Sync {
    /// Read the latest raw feed document
    async fn get_raw_data(&self) -> anyhow::Result<String>;

    /// Publish a new feed document. No store supports writing yet.
    async fn save_raw_data(&self, content: &str) -> anyhow::Result<()>;
}
