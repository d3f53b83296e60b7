// Screen-reader table and date range for a projected view
use super::projection::ProjectedView;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub date: String,
    pub values: Vec<Option<i64>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub from: String,
    pub to: String,
}

/// Rows newest first. Walking backwards stops at the first blank date label,
/// which the feed uses as a padding marker.
pub fn accessibility_rows(view: &ProjectedView) -> Vec<TableRow> {
    view.dates
        .iter()
        .enumerate()
        .rev()
        .take_while(|(_, date)| !date.trim().is_empty())
        .map(|(index, date)| TableRow {
            date: date.clone(),
            values: view
                .metrics
                .iter()
                .map(|metric| metric.get(index).copied())
                .collect(),
        })
        .collect()
}

pub fn date_range(dates: &[String]) -> Option<DateRange> {
    let mut labelled = dates.iter().filter(|d| !d.trim().is_empty());
    let first = labelled.next()?;
    let last = labelled.last().unwrap_or(first);
    Some(DateRange {
        from: first.clone(),
        to: last.clone(),
    })
}
