/// Data layer: core types, loading, joining, filtering and statistics.
///
/// Architecture:
/// ```text
///  five .csv / .parquet files
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse files → SourceTables
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  schema   │  required columns present? (all tables, one error)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   join    │  items ⋈ orders ⋈ products ⟕ translations, dedupe
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ catalog   │  immutable merged DataFrame + category options
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  selected categories → filtered DataFrame
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  derive   │  delivery / estimated days per filtered row
///   └──────────┘
/// ```

pub mod catalog;
pub mod derive;
pub mod filter;
pub mod join;
pub mod loader;
pub mod model;
pub mod schema;
pub mod stats;
