use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

// ---------------------------------------------------------------------------
// DataSources – where the five tables live
// ---------------------------------------------------------------------------

/// Locations of the source tables. File names are relative to `data_dir`
/// unless absolute. Keys left out of the config file keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataSources {
    pub data_dir: PathBuf,
    pub customers: PathBuf,
    pub order_items: PathBuf,
    pub orders: PathBuf,
    pub products: PathBuf,
    pub category_translation: PathBuf,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            customers: PathBuf::from("customers_dataset.csv"),
            order_items: PathBuf::from("order_items_dataset.csv"),
            orders: PathBuf::from("orders_dataset.csv"),
            products: PathBuf::from("products_dataset.csv"),
            category_translation: PathBuf::from("product_category_name_translation.csv"),
        }
    }
}

impl DataSources {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: dir.into(),
            ..Self::default()
        }
    }

    /// Read `dashboard.json` from `dir` if present, defaults otherwise.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.is_file() {
            log::info!("Reading data sources from {}", path.display());
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn customers_path(&self) -> PathBuf {
        self.data_dir.join(&self.customers)
    }

    pub fn order_items_path(&self) -> PathBuf {
        self.data_dir.join(&self.order_items)
    }

    pub fn orders_path(&self) -> PathBuf {
        self.data_dir.join(&self.orders)
    }

    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join(&self.products)
    }

    pub fn category_translation_path(&self) -> PathBuf {
        self.data_dir.join(&self.category_translation)
    }
}
