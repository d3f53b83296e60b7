// Daily/cumulative projection of raw feed series
use super::feed::{FeedError, RawSeries};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionMode {
    #[default]
    Daily,
    Cumulative,
}

impl ProjectionMode {
    pub const ALL: [ProjectionMode; 2] = [ProjectionMode::Daily, ProjectionMode::Cumulative];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectionMode::Daily => "daily",
            ProjectionMode::Cumulative => "cumulative",
        }
    }

    /// Tab caption shown on the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectionMode::Daily => "Creștere zilnică",
            ProjectionMode::Cumulative => "Creștere cumulativă",
        }
    }
}

impl fmt::Display for ProjectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectionMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(ProjectionMode::Daily),
            "cumulative" => Ok(ProjectionMode::Cumulative),
            other => anyhow::bail!("unknown tab '{}'", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedView {
    pub dates: Vec<String>,
    pub metrics: Vec<Vec<i64>>,
    pub is_stale: bool,
    pub error: Option<FeedError>,
    pub last_updated_on: Option<DateTime<Utc>>,
}

/// Project every metric of `raw` into `mode`.
///
/// The feed stores running totals, so `Cumulative` is a copy and `Daily`
/// differences consecutive days. The first day keeps its raw value. A metric
/// whose length disagrees with `dates` comes out empty. Envelope metadata is
/// forwarded untouched.
pub fn project(raw: &RawSeries, mode: ProjectionMode) -> ProjectedView {
    let metrics = raw
        .metrics
        .iter()
        .map(|values| {
            if values.len() != raw.dates.len() {
                return Vec::new();
            }
            match mode {
                ProjectionMode::Daily => daily_deltas(values),
                ProjectionMode::Cumulative => values.to_vec(),
            }
        })
        .collect();

    ProjectedView {
        dates: raw.dates.clone(),
        metrics,
        is_stale: raw.is_stale,
        error: raw.error.clone(),
        last_updated_on: raw.last_updated_on,
    }
}

fn daily_deltas(values: &[i64]) -> Vec<i64> {
    let mut deltas = Vec::with_capacity(values.len());
    if let Some(&first) = values.first() {
        deltas.push(first);
    }
    deltas.extend(values.windows(2).map(|pair| pair[1].saturating_sub(pair[0])));
    deltas
}
