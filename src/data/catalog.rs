use std::collections::BTreeSet;

use anyhow::{Context, Result};
use polars::prelude::*;

use super::join::{dedupe, merge_sources};
use super::loader::{load_sources, SourceTables};
use super::schema::{
    self, missing_columns, CATEGORY_NAME_ENGLISH, DELIVERED_AT, ESTIMATED_AT, PURCHASED_AT,
};
use crate::config::DataSources;
use crate::error::{DataError, MissingColumns};

/// Columns of the merged table the filter and derived fields read.
const MERGED_COLUMNS: [&str; 4] = [CATEGORY_NAME_ENGLISH, PURCHASED_AT, DELIVERED_AT, ESTIMATED_AT];

/// Row counts of the raw tables, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceCounts {
    pub customers: usize,
    pub order_items: usize,
    pub orders: usize,
    pub products: usize,
    pub category_translation: usize,
}

// ---------------------------------------------------------------------------
// Catalog – the immutable, joined and deduplicated dataset
// ---------------------------------------------------------------------------

/// Built once at start-up and shared read-only by every session.
#[derive(Debug, Clone)]
pub struct Catalog {
    merged: DataFrame,
    categories: BTreeSet<String>,
    source_counts: SourceCounts,
}

impl Catalog {
    /// Load, validate, join and deduplicate the configured sources.
    pub fn load(sources: &DataSources) -> Result<Self> {
        let tables = load_sources(sources)?;
        Self::from_sources(tables)
    }

    pub fn from_sources(tables: SourceTables) -> Result<Self> {
        schema::validate(&tables).context("validating source tables")?;

        let source_counts = SourceCounts {
            customers: tables.customers.height(),
            order_items: tables.order_items.height(),
            orders: tables.orders.height(),
            products: tables.products.height(),
            category_translation: tables.category_translation.height(),
        };

        let joined = merge_sources(&tables).context("joining source tables")?;
        let joined_len = joined.height();
        let merged = dedupe(joined).context("deduplicating merged rows")?;

        let missing = missing_columns(&merged, &MERGED_COLUMNS);
        if !missing.is_empty() {
            return Err(DataError::MissingColumns(vec![MissingColumns {
                table: "merged".into(),
                columns: missing,
            }])
            .into());
        }

        let categories = distinct_categories(&merged)?;

        log::info!(
            "Merged {} rows ({} duplicates dropped), {} categories",
            merged.height(),
            joined_len - merged.height(),
            categories.len()
        );

        Ok(Catalog {
            merged,
            categories,
            source_counts,
        })
    }

    pub fn merged(&self) -> &DataFrame {
        &self.merged
    }

    /// Distinct non-null English category names, sorted.
    pub fn category_options(&self) -> &BTreeSet<String> {
        &self.categories
    }

    pub fn source_counts(&self) -> SourceCounts {
        self.source_counts
    }
}

fn distinct_categories(merged: &DataFrame) -> Result<BTreeSet<String>, DataError> {
    let names = merged
        .column(CATEGORY_NAME_ENGLISH)?
        .as_materialized_series()
        .drop_nulls()
        .unique()?;
    Ok(names
        .str()?
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    #[test]
    fn builds_from_fixture() {
        let catalog = Catalog::from_sources(fixtures::sources()).unwrap();
        assert_eq!(catalog.merged().height(), 3);
        assert_eq!(
            catalog.category_options().iter().collect::<Vec<_>>(),
            vec!["Toys"]
        );
        assert_eq!(catalog.source_counts().customers, 3);
    }

    #[test]
    fn untranslated_rows_have_no_category() {
        let catalog = Catalog::from_sources(fixtures::sources()).unwrap();
        let english = catalog.merged().column(CATEGORY_NAME_ENGLISH).unwrap();
        assert_eq!(english.null_count(), 1);
    }

    #[test]
    fn duplicate_items_are_merged_once() {
        let mut tables = fixtures::sources();
        tables.order_items = fixtures::table(&format!("{}o1,1,p1,s1,29.99,8.72\n", fixtures::ORDER_ITEMS));
        let catalog = Catalog::from_sources(tables).unwrap();
        assert_eq!(catalog.merged().height(), 3);
    }

    #[test]
    fn schema_errors_surface_before_joining() {
        let mut tables = fixtures::sources();
        tables.products = fixtures::table("product_id\np1\n");
        let err = Catalog::from_sources(tables).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::MissingColumns(m)) if m[0].table == "products"
        ));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_csv_dir(dir.path());
        let catalog = Catalog::load(&DataSources::in_dir(dir.path())).unwrap();
        assert_eq!(catalog.merged().height(), 3);
    }
}
