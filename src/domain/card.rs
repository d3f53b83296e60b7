// Dashboard card domain model
use super::chart::ChartSpec;
use super::projection::ProjectionMode;
use super::table::{DateRange, TableRow};
use chrono::{DateTime, Utc};
use serde::Serialize;

const SUBTITLE_PREFIX: &str = "Ultima actualizare";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tab {
    pub label: String,
    pub value: ProjectionMode,
}

impl Tab {
    pub fn all() -> Vec<Tab> {
        ProjectionMode::ALL
            .iter()
            .map(|mode| Tab {
                label: mode.label().to_string(),
                value: *mode,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSummary {
    pub id: String,
    pub title: String,
    pub embed_path: String,
    pub tabs: Vec<Tab>,
}

/// One rendered card: chart plus the metadata the page shows around it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub embed_path: String,
    pub is_stale: bool,
    pub error: Option<String>,
    pub active_tab: ProjectionMode,
    pub tabs: Vec<Tab>,
    pub date_range: Option<DateRange>,
    pub chart: ChartSpec,
    pub table: Vec<TableRow>,
}

pub fn subtitle(last_updated_on: Option<DateTime<Utc>>, short_date: bool) -> String {
    let format = if short_date { "%d.%m.%Y" } else { "%d.%m.%Y %H:%M" };
    match last_updated_on {
        Some(ts) => format!("{}: {}", SUBTITLE_PREFIX, ts.format(format)),
        None => format!("{}: -", SUBTITLE_PREFIX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_subtitle_formats() {
        let ts = Utc.with_ymd_and_hms(2021, 3, 7, 14, 5, 0).unwrap();
        assert_eq!(subtitle(Some(ts), false), "Ultima actualizare: 07.03.2021 14:05");
        assert_eq!(subtitle(Some(ts), true), "Ultima actualizare: 07.03.2021");
        assert_eq!(subtitle(None, true), "Ultima actualizare: -");
    }

    #[test]
    fn test_tabs_daily_first() {
        let tabs = Tab::all();
        assert_eq!(tabs[0].value, ProjectionMode::Daily);
        assert_eq!(tabs[1].label, "Creștere cumulativă");
    }
}
