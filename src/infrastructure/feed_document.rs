// JSON feed document decoding
use crate::domain::feed::{FeedEnvelope, FeedError};
use chrono::DateTime;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedDocument {
    #[serde(default)]
    last_updated_on: Option<i64>,
    #[serde(default)]
    dates: Vec<String>,
    #[serde(default)]
    metrics: BTreeMap<String, serde_json::Value>,
}

/// Decode a raw feed body. Never fails: an undecodable body becomes an empty
/// envelope carrying `Malformed`. Each metric is decoded on its own, so one
/// with non-integer values is dropped and flagged while the others survive.
/// Metrics whose length disagrees with `dates` are kept but flagged.
pub fn decode_feed(raw: &str) -> FeedEnvelope {
    let document: FeedDocument = match serde_json::from_str(raw) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!("Failed to decode feed document: {}", e);
            return FeedEnvelope {
                error: Some(FeedError::malformed(e.to_string())),
                ..FeedEnvelope::default()
            };
        }
    };

    let mut envelope = FeedEnvelope {
        last_updated_on: document
            .last_updated_on
            .and_then(|secs| DateTime::from_timestamp(secs, 0)),
        dates: document.dates,
        ..FeedEnvelope::default()
    };

    for (key, value) in document.metrics {
        match serde_json::from_value::<Vec<i64>>(value) {
            Ok(values) => {
                envelope.metrics.insert(key, values);
            }
            Err(e) => {
                tracing::warn!("Dropping metric {}: {}", key, e);
                envelope.record_error(FeedError::malformed(format!(
                    "metric '{}' is not a list of counts: {}",
                    key, e
                )));
            }
        }
    }

    let mismatched: Vec<(String, usize)> = envelope
        .metrics
        .iter()
        .filter(|(_, values)| values.len() != envelope.dates.len())
        .map(|(key, values)| (key.clone(), values.len()))
        .collect();

    for (key, len) in mismatched {
        tracing::warn!(
            "Metric {} has {} values for {} dates",
            key,
            len,
            envelope.dates.len()
        );
        envelope.record_error(FeedError::malformed(format!(
            "metric '{}' has {} values, expected {}",
            key,
            len,
            envelope.dates.len()
        )));
    }

    tracing::debug!(
        "Decoded feed with {} dates and {} metrics",
        envelope.dates.len(),
        envelope.metrics.len()
    );

    envelope
}
