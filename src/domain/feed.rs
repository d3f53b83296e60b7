// Feed domain model - decoded statistics feed and its error taxonomy
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Why a feed could not be used as-is. Carried as data next to whatever
/// partial content was recovered, never raised by the core.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FeedError {
    #[error("feed unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("feed is {age_hours}h old (limit {max_age_hours}h)")]
    #[serde(rename_all = "camelCase")]
    Stale { age_hours: i64, max_age_hours: i64 },

    #[error("malformed feed: {detail}")]
    Malformed { detail: String },
}

impl FeedError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::Malformed {
            detail: detail.into(),
        }
    }
}

/// The whole feed as delivered by the storage collaborator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedEnvelope {
    pub dates: Vec<String>,
    pub metrics: BTreeMap<String, Vec<i64>>,
    pub last_updated_on: Option<DateTime<Utc>>,
    pub is_stale: bool,
    pub error: Option<FeedError>,
}

impl FeedEnvelope {
    /// Empty envelope standing in for a feed that could not be fetched.
    pub fn failed(error: FeedError) -> Self {
        Self {
            is_stale: true,
            error: Some(error),
            ..Self::default()
        }
    }

    /// Record an error unless an earlier one is already present.
    pub fn record_error(&mut self, error: FeedError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    /// Pick the metrics named by `keys`, in that order.
    pub fn select<S: AsRef<str>>(&self, keys: &[S]) -> RawSeries {
        let mut error = self.error.clone();
        let metrics = keys
            .iter()
            .map(|key| match self.metrics.get(key.as_ref()) {
                Some(values) => values.clone(),
                None => {
                    if error.is_none() && !self.dates.is_empty() {
                        error = Some(FeedError::malformed(format!(
                            "metric '{}' missing from feed",
                            key.as_ref()
                        )));
                    }
                    Vec::new()
                }
            })
            .collect();

        RawSeries {
            last_updated_on: self.last_updated_on,
            is_stale: self.is_stale,
            error,
            ..RawSeries::new(self.dates.clone(), metrics)
        }
    }
}

/// Parallel date/metric sequences handed to the projector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSeries {
    pub dates: Vec<String>,
    pub metrics: Vec<Vec<i64>>,
    pub last_updated_on: Option<DateTime<Utc>>,
    pub is_stale: bool,
    pub error: Option<FeedError>,
}

impl RawSeries {
    pub fn new(dates: Vec<String>, metrics: Vec<Vec<i64>>) -> Self {
        Self {
            dates,
            metrics,
            ..Self::default()
        }
    }
}
