// Local file feed store, for development and offline mirrors
use crate::application::feed_store::FeedStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileFeedStore {
    path: PathBuf,
}

impl FileFeedStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl FeedStore for FileFeedStore {
    async fn get_raw_data(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read feed file {}", self.path.display()))
    }

    async fn save_raw_data(&self, _content: &str) -> Result<()> {
        anyhow::bail!("Writing the feed file is not implemented")
    }
}
