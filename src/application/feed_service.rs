// Feed service - Fetch, validate and cache the statistics feed
use crate::application::feed_store::FeedStore;
use crate::domain::feed::{FeedEnvelope, FeedError};
use crate::infrastructure::config::FreshnessSettings;
use crate::infrastructure::feed_document::decode_feed;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

struct CachedFeed {
    fetched_at: Instant,
    envelope: FeedEnvelope,
}

#[derive(Clone)]
pub struct FeedService {
    store: Arc<dyn FeedStore>,
    freshness: FreshnessSettings,
    cache: Arc<RwLock<Option<CachedFeed>>>,
}

impl FeedService {
    pub fn new(store: Arc<dyn FeedStore>, freshness: FreshnessSettings) -> Self {
        Self {
            store,
            freshness,
            cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Latest envelope, fetched at most once per refresh interval.
    pub async fn latest(&self) -> FeedEnvelope {
        let refresh = Duration::from_secs(self.freshness.refresh_secs);

        if let Some(cached) = self.cache.read().await.as_ref() {
            if cached.fetched_at.elapsed() < refresh {
                return cached.envelope.clone();
            }
        }

        let mut cache = self.cache.write().await;
        // Another request may have refreshed while we waited for the lock.
        if let Some(cached) = cache.as_ref() {
            if cached.fetched_at.elapsed() < refresh {
                return cached.envelope.clone();
            }
        }

        let envelope = self.fetch_at(Utc::now()).await;
        *cache = Some(CachedFeed {
            fetched_at: Instant::now(),
            envelope: envelope.clone(),
        });
        envelope
    }

    /// Fetch and decode the feed, judging staleness against `now`.
    pub async fn fetch_at(&self, now: DateTime<Utc>) -> FeedEnvelope {
        let limit = Duration::from_millis(self.freshness.fetch_timeout_ms);
        let fetched = match tokio::time::timeout(limit, self.store.get_raw_data()).await {
            Ok(result) => result,
            Err(_) => Err(anyhow::anyhow!(
                "feed fetch timed out after {}ms",
                self.freshness.fetch_timeout_ms
            )),
        };

        match fetched {
            Ok(raw) => {
                let mut envelope = decode_feed(&raw);
                self.mark_staleness(&mut envelope, now);
                tracing::info!(
                    "Loaded feed: {} dates, stale={}",
                    envelope.dates.len(),
                    envelope.is_stale
                );
                envelope
            }
            Err(e) => {
                tracing::error!("Error fetching feed: {:#}", e);
                FeedEnvelope::failed(FeedError::unavailable(format!("{:#}", e)))
            }
        }
    }

    fn mark_staleness(&self, envelope: &mut FeedEnvelope, now: DateTime<Utc>) {
        let max_age_hours = self.freshness.max_age_hours;
        let age_hours = envelope
            .last_updated_on
            .map(|ts| (now - ts).num_hours());

        match age_hours {
            Some(age_hours) if age_hours <= max_age_hours => {}
            Some(age_hours) => {
                tracing::warn!("Feed is {}h old, limit {}h", age_hours, max_age_hours);
                envelope.is_stale = true;
                envelope.record_error(FeedError::Stale {
                    age_hours,
                    max_age_hours,
                });
            }
            None => {
                tracing::warn!("Feed has no lastUpdatedOn, treating as stale");
                envelope.is_stale = true;
            }
        }
    }
}
