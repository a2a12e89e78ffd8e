use polars::prelude::DataFrame;

use super::loader::SourceTables;
use crate::error::{DataError, MissingColumns};

// Column names shared by the loader, the join pipeline and the derived fields.
pub const ORDER_ID: &str = "order_id";
pub const ORDER_ITEM_ID: &str = "order_item_id";
pub const PRODUCT_ID: &str = "product_id";
pub const CUSTOMER_ID: &str = "customer_id";
pub const CATEGORY_NAME: &str = "product_category_name";
pub const CATEGORY_NAME_ENGLISH: &str = "product_category_name_english";
pub const PURCHASED_AT: &str = "order_purchase_timestamp";
pub const DELIVERED_AT: &str = "order_delivered_customer_date";
pub const ESTIMATED_AT: &str = "order_estimated_delivery_date";

/// Columns always read as text: join keys, category names and timestamps.
pub const TEXT_COLUMNS: &[&str] = &[
    ORDER_ID,
    PRODUCT_ID,
    CUSTOMER_ID,
    CATEGORY_NAME,
    CATEGORY_NAME_ENGLISH,
    PURCHASED_AT,
    DELIVERED_AT,
    ESTIMATED_AT,
];

pub const CUSTOMERS_COLUMNS: &[&str] = &[CUSTOMER_ID];
pub const ORDER_ITEMS_COLUMNS: &[&str] = &[ORDER_ID, ORDER_ITEM_ID, PRODUCT_ID];
pub const ORDERS_COLUMNS: &[&str] = &[
    ORDER_ID,
    CUSTOMER_ID,
    PURCHASED_AT,
    DELIVERED_AT,
    ESTIMATED_AT,
];
pub const PRODUCTS_COLUMNS: &[&str] = &[PRODUCT_ID, CATEGORY_NAME];
pub const CATEGORY_TRANSLATION_COLUMNS: &[&str] = &[CATEGORY_NAME, CATEGORY_NAME_ENGLISH];

/// Check every source table for the columns the pipeline reads.
///
/// All tables are checked before failing, so one error names every missing
/// column at once.
pub fn validate(tables: &SourceTables) -> Result<(), DataError> {
    let checks: [(&str, &DataFrame, &[&str]); 5] = [
        ("customers", &tables.customers, CUSTOMERS_COLUMNS),
        ("order_items", &tables.order_items, ORDER_ITEMS_COLUMNS),
        ("orders", &tables.orders, ORDERS_COLUMNS),
        ("products", &tables.products, PRODUCTS_COLUMNS),
        (
            "category_translation",
            &tables.category_translation,
            CATEGORY_TRANSLATION_COLUMNS,
        ),
    ];

    let missing: Vec<MissingColumns> = checks
        .iter()
        .filter_map(|(name, table, required)| {
            let columns = missing_columns(table, required);
            (!columns.is_empty()).then(|| MissingColumns {
                table: name.to_string(),
                columns,
            })
        })
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DataError::MissingColumns(missing))
    }
}

/// Names from `required` that `df` does not have.
pub fn missing_columns(df: &DataFrame, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|c| df.get_column_index(c).is_none())
        .map(|c| c.to_string())
        .collect()
}
