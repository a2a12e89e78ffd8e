use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use polars::prelude::*;

use super::model::NULL_TOKENS;
use super::schema::TEXT_COLUMNS;
use crate::config::DataSources;
use crate::error::DataError;

/// Rows scanned to pick each CSV column's dtype.
const INFER_SCHEMA_ROWS: usize = 10_000;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// The five raw tables, as read from disk.
#[derive(Debug, Clone)]
pub struct SourceTables {
    pub customers: DataFrame,
    pub order_items: DataFrame,
    pub orders: DataFrame,
    pub products: DataFrame,
    pub category_translation: DataFrame,
}

/// Load all five tables. The first unreadable source aborts the load.
pub fn load_sources(sources: &DataSources) -> Result<SourceTables> {
    let tables = SourceTables {
        customers: load_table(&sources.customers_path())?,
        order_items: load_table(&sources.order_items_path())?,
        orders: load_table(&sources.orders_path())?,
        products: load_table(&sources.products_path())?,
        category_translation: load_table(&sources.category_translation_path())?,
    };
    log::info!(
        "Loaded {} customers, {} order items, {} orders, {} products, {} category translations",
        tables.customers.height(),
        tables.order_items.height(),
        tables.orders.height(),
        tables.products.height(),
        tables.category_translation.height()
    );
    Ok(tables)
}

/// Load a single table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, comma separated, one dtype inferred per column
/// * `.parquet` – any flat schema; dtypes come from the file
///
/// Identifier, category and timestamp columns are always text, whatever the
/// source stores, so `"0042"` and `"42"` stay distinct join keys.
pub fn load_table(path: &Path) -> Result<DataFrame> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => std::fs::read(path)
            .context("opening CSV")
            .and_then(parse_csv),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataError::UnsupportedFormat(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse CSV bytes (header row first).
pub fn parse_csv(bytes: Vec<u8>) -> Result<DataFrame> {
    let text_columns = text_columns_in(&bytes)?;
    let overwrite: Schema = text_columns
        .iter()
        .map(|name| Field::new(name.as_str().into(), DataType::String))
        .collect();

    let parse_options = CsvParseOptions::default()
        .with_missing_is_null(true)
        .with_null_values(Some(NullValues::AllColumns(
            NULL_TOKENS.iter().map(|t| (*t).into()).collect(),
        )));

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_schema_overwrite(Some(Arc::new(overwrite)))
        .with_parse_options(parse_options)
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .context("parsing CSV")?;
    Ok(df)
}

/// Header names that must be read as text, in file order.
fn text_columns_in(bytes: &[u8]) -> Result<Vec<String>> {
    let mut reader = ::csv::Reader::from_reader(bytes);
    let headers = reader.headers().context("reading CSV headers")?;
    Ok(headers
        .iter()
        .filter(|h| TEXT_COLUMNS.contains(h))
        .map(|h| h.to_string())
        .collect())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<DataFrame> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let df = ParquetReader::new(file)
        .finish()
        .context("reading parquet file")?;
    text_keys(df)
}

/// Cast the text columns a typed source may store as numbers.
fn text_keys(df: DataFrame) -> Result<DataFrame> {
    let casts: Vec<Expr> = df
        .get_column_names()
        .into_iter()
        .filter(|name| TEXT_COLUMNS.contains(&name.as_str()))
        .filter(|name| {
            df.column(name.as_str())
                .is_ok_and(|c| {
                    !matches!(
                        c.dtype(),
                        DataType::String | DataType::Datetime(..) | DataType::Date
                    )
                })
        })
        .map(|name| col(name.as_str()).cast(DataType::String))
        .collect();
    if casts.is_empty() {
        return Ok(df);
    }
    Ok(df.lazy().with_columns(casts).collect()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;
    use crate::data::model::{cell_text, timestamp_of};
    use crate::data::schema::{ORDER_ID, PRODUCT_ID};

    #[test]
    fn infers_one_dtype_per_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order_items_dataset.csv");
        std::fs::write(
            &path,
            "order_id,order_item_id,product_id,price,shipping_limit_date\n\
             0042,1,0007,118.70,2017-10-10 21:25:13\n\
             43,2,8,29.99,NA\n",
        )
        .unwrap();

        let df = load_table(&path).unwrap();
        assert_eq!(
            df.get_column_names_str(),
            ["order_id", "order_item_id", "product_id", "price", "shipping_limit_date"]
        );
        assert_eq!(df.height(), 2);
        assert_eq!(df.column(ORDER_ID).unwrap().dtype(), &DataType::String);
        assert_eq!(df.column(PRODUCT_ID).unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("order_item_id").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("price").unwrap().dtype(), &DataType::Float64);

        let order = df.column(ORDER_ID).unwrap();
        assert_eq!(cell_text(&order.get(0).unwrap()), "0042");
        assert_eq!(cell_text(&order.get(1).unwrap()), "43");
        assert_eq!(
            cell_text(&df.column(PRODUCT_ID).unwrap().get(0).unwrap()),
            "0007"
        );

        let shipping = df.column("shipping_limit_date").unwrap();
        assert!(timestamp_of(&shipping.get(0).unwrap()).is_some());
        assert_eq!(shipping.null_count(), 1);
    }

    #[test]
    fn empty_cells_and_null_tokens_are_missing() {
        let df = parse_csv(b"order_id,price\no1,\no2,NaN\no3,1.5\n".to_vec()).unwrap();
        assert_eq!(df.column("price").unwrap().null_count(), 2);
    }

    #[test]
    fn parquet_and_csv_load_the_same_table() {
        let dir = tempfile::tempdir().unwrap();

        let csv_path = dir.path().join("items.csv");
        std::fs::write(
            &csv_path,
            "order_id,order_item_id,product_id\n\
             o1,1,42\n\
             o2,1,abc\n",
        )
        .unwrap();

        // Parquet stores product ids as integers here; they load as text.
        let mut typed = df!(
            "order_id" => ["o1", "o2"],
            "order_item_id" => [1i64, 1],
            "product_id" => [Some(42i64), None],
        )
        .unwrap();
        let pq_path = dir.path().join("items.parquet");
        let file = std::fs::File::create(&pq_path).unwrap();
        ParquetWriter::new(file).finish(&mut typed).unwrap();

        let from_csv = load_table(&csv_path).unwrap();
        let from_parquet = load_table(&pq_path).unwrap();
        assert_eq!(from_csv.schema(), from_parquet.schema());
        assert_eq!(
            cell_text(&from_parquet.column(PRODUCT_ID).unwrap().get(0).unwrap()),
            "42"
        );
        assert!(from_csv
            .column(ORDER_ID)
            .unwrap()
            .as_materialized_series()
            .equals_missing(from_parquet.column(ORDER_ID).unwrap().as_materialized_series()));
    }

    #[test]
    fn parquet_timestamps_keep_their_dtype() {
        let dir = tempfile::tempdir().unwrap();
        let shipped = Series::new("shipping_limit_date".into(), [Some(1_505_814_335_000i64), None])
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
            .unwrap();
        let mut typed = DataFrame::new(vec![
            Column::new("order_id".into(), ["o1", "o2"]),
            shipped.into(),
        ])
        .unwrap();
        let path = dir.path().join("items.parquet");
        ParquetWriter::new(std::fs::File::create(&path).unwrap())
            .finish(&mut typed)
            .unwrap();

        let df = load_table(&path).unwrap();
        let shipping = df.column("shipping_limit_date").unwrap();
        assert_eq!(
            timestamp_of(&shipping.get(0).unwrap()).unwrap().to_string(),
            "2017-09-19 09:45:35"
        );
        assert!(timestamp_of(&shipping.get(1).unwrap()).is_none());
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = load_table(Path::new("orders.xlsx")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn missing_file_aborts_the_whole_load() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_csv_dir(dir.path());
        std::fs::remove_file(dir.path().join("products_dataset.csv")).unwrap();

        let err = load_sources(&DataSources::in_dir(dir.path())).unwrap_err();
        assert!(format!("{err:#}").contains("products_dataset.csv"));
    }

    #[test]
    fn loads_all_five_sources() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_csv_dir(dir.path());

        let tables = load_sources(&DataSources::in_dir(dir.path())).unwrap();
        assert_eq!(tables.orders.height(), 3);
        assert_eq!(tables.order_items.height(), 3);
        assert_eq!(tables.products.height(), 2);
        assert_eq!(tables.category_translation.height(), 1);
        assert_eq!(tables.customers.height(), 3);
    }
}
