// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod feed_document;
pub mod file_feed_store;
pub mod http_feed_store;

use crate::application::feed_store::FeedStore;
use self::config::StorageSettings;
use self::file_feed_store::FileFeedStore;
use self::http_feed_store::HttpFeedStore;
use std::sync::Arc;
use std::time::Duration;

pub fn feed_store_from_settings(settings: &StorageSettings) -> Arc<dyn FeedStore> {
    match settings {
        StorageSettings::Http {
            endpoint,
            bucket,
            key,
            token,
            timeout_secs,
        } => Arc::new(HttpFeedStore::new(
            endpoint.clone(),
            bucket.clone(),
            key.clone(),
            token.clone(),
            Duration::from_secs(*timeout_secs),
        )),
        StorageSettings::File { path } => Arc::new(FileFeedStore::new(path.clone())),
    }
}
