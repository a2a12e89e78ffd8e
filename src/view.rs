use std::collections::BTreeMap;

use polars::prelude::DataFrame;

use crate::data::catalog::Catalog;
use crate::data::derive::{delivery_times, DeliveryTimes};
use crate::data::filter::{filter_rows, FilterState};
use crate::data::model::cell_text;
use crate::data::schema::CATEGORY_NAME_ENGLISH;
use crate::data::stats::{histogram, kde_curve, top_counts, KDE_POINTS};
use crate::error::DataError;

pub const TITLE: &str = "Interactive Data Analysis Dashboard";

/// Number of categories in the bar chart.
pub const TOP_CATEGORIES: usize = 10;

/// Number of rows in the preview table.
pub const PREVIEW_ROWS: usize = 20;

/// Fixed closing remarks. Written by hand, not computed from the data.
pub const CONCLUSIONS: [(&str, &str); 2] = [
    (
        "Top Purchased Categories",
        "The most purchased categories include household items and health-related products.",
    ),
    (
        "Delivery Analysis",
        "Most deliveries are faster than the estimated delivery time, although a few outliers exist.",
    ),
];

/// Column headers of the two derived fields in the preview.
pub const DELIVERY_DAYS_COLUMN: &str = "delivery_days";
pub const ESTIMATED_DAYS_COLUMN: &str = "estimated_days";

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

/// Everything the UI draws for one filter selection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardView {
    /// Rows in the merged table.
    pub total_rows: usize,
    /// Rows passing the current selection.
    pub visible_rows: usize,
    /// Highest counts first.
    pub top_categories: Vec<(String, usize)>,
    pub actual_delivery: DaySeries,
    pub estimated_delivery: DaySeries,
    pub preview: TablePreview,
}

/// Histogram and density curve of one day-count series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DaySeries {
    pub bins: BTreeMap<i64, usize>,
    pub kde: Vec<[f64; 2]>,
}

impl DaySeries {
    fn from_days(days: impl Iterator<Item = Option<i64>>) -> Self {
        let days: Vec<i64> = days.flatten().collect();
        let as_f64: Vec<f64> = days.iter().map(|&d| d as f64).collect();
        DaySeries {
            bins: histogram(days),
            kde: kde_curve(&as_f64, KDE_POINTS),
        }
    }

    /// Number of values in the series.
    pub fn count(&self) -> usize {
        self.bins.values().sum()
    }
}

/// The first rows of the filtered table, formatted for display.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TablePreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

// ---------------------------------------------------------------------------
// render
// ---------------------------------------------------------------------------

/// Build the dashboard for `filters`. Pure: the catalog is never modified.
pub fn render(filters: &FilterState, catalog: &Catalog) -> Result<DashboardView, DataError> {
    let rows = filter_rows(catalog, filters)?;
    let times = delivery_times(&rows)?;
    let top_categories = top_counts(&rows, CATEGORY_NAME_ENGLISH, TOP_CATEGORIES)?;

    log::debug!(
        "Rendering {} of {} rows for {} selected categories",
        rows.height(),
        catalog.merged().height(),
        filters.len()
    );

    Ok(DashboardView {
        total_rows: catalog.merged().height(),
        visible_rows: rows.height(),
        top_categories,
        actual_delivery: DaySeries::from_days(times.iter().map(|t| t.delivery_days)),
        estimated_delivery: DaySeries::from_days(times.iter().map(|t| t.estimated_days)),
        preview: preview(&rows, &times)?,
    })
}

/// Cells are turned into display text here and nowhere earlier.
fn preview(rows: &DataFrame, times: &[DeliveryTimes]) -> Result<TablePreview, DataError> {
    let head = rows.head(Some(PREVIEW_ROWS));
    let mut columns: Vec<String> = head
        .get_column_names_str()
        .into_iter()
        .map(str::to_string)
        .collect();
    columns.push(DELIVERY_DAYS_COLUMN.to_string());
    columns.push(ESTIMATED_DAYS_COLUMN.to_string());

    let days = |d: Option<i64>| d.map(|d| d.to_string()).unwrap_or_default();
    let mut out = Vec::with_capacity(head.height());
    for (row, t) in times.iter().take(head.height()).enumerate() {
        let mut cells = head
            .get_columns()
            .iter()
            .map(|c| c.get(row).map(|v| cell_text(&v)))
            .collect::<Result<Vec<String>, _>>()?;
        cells.push(days(t.delivery_days));
        cells.push(days(t.estimated_days));
        out.push(cells);
    }

    Ok(TablePreview { columns, rows: out })
}
