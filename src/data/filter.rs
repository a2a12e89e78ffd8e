use std::collections::BTreeSet;

use polars::prelude::*;

use super::catalog::Catalog;
use super::schema::CATEGORY_NAME_ENGLISH;
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Filter predicate: which English categories are selected
// ---------------------------------------------------------------------------

/// The selected English category names. An empty set selects nothing.
pub type FilterState = BTreeSet<String>;

/// Initialise a [`FilterState`] with every category selected.
pub fn init_filter_state(catalog: &Catalog) -> FilterState {
    catalog.category_options().clone()
}

/// Merged rows whose English category is selected, in merged order.
///
/// Rows without a translated category never pass, whatever the selection.
pub fn filter_rows(catalog: &Catalog, filters: &FilterState) -> Result<DataFrame, DataError> {
    let merged = catalog.merged();
    if filters.is_empty() {
        return Ok(merged.clear());
    }
    let selected = Series::new(
        "selected".into(),
        filters.iter().map(String::as_str).collect::<Vec<_>>(),
    );
    Ok(merged
        .clone()
        .lazy()
        .filter(col(CATEGORY_NAME_ENGLISH).is_in(lit(selected)))
        .collect()?)
}
