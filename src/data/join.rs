use polars::prelude::*;

use super::loader::SourceTables;
use super::schema::{CATEGORY_NAME, ORDER_ID, PRODUCT_ID};
use crate::error::DataError;

/// Join `left` and `right` on the column `on`.
///
/// `JoinType::Inner` keeps left rows with at least one match;
/// `JoinType::Left` keeps every left row with nulls for unmatched right
/// columns. A non-key name present on both sides keeps its name on the left
/// and gets a `_right` suffix on the right. Null keys never match.
pub fn join(
    left: &DataFrame,
    right: &DataFrame,
    on: &str,
    how: JoinType,
) -> Result<DataFrame, DataError> {
    for (df, side) in [(left, "left"), (right, "right")] {
        if df.get_column_index(on).is_none() {
            return Err(DataError::MissingKey {
                key: on.to_string(),
                side,
            });
        }
    }

    let joined = left
        .clone()
        .lazy()
        .join(
            right.clone().lazy(),
            [col(on)],
            [col(on)],
            JoinArgs::new(how),
        )
        .collect()?;
    Ok(joined)
}

/// Drop rows identical in every column, keeping the first occurrence in
/// row order.
pub fn dedupe(df: DataFrame) -> Result<DataFrame, DataError> {
    Ok(df
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?)
}

/// Items ⋈ orders (inner) ⋈ products (inner) ⟕ translations (left).
pub fn merge_sources(tables: &SourceTables) -> Result<DataFrame, DataError> {
    let merged = join(&tables.order_items, &tables.orders, ORDER_ID, JoinType::Inner)?;
    let merged = join(&merged, &tables.products, PRODUCT_ID, JoinType::Inner)?;
    join(
        &merged,
        &tables.category_translation,
        CATEGORY_NAME,
        JoinType::Left,
    )
}
