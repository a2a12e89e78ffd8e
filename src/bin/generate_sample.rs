//! Writes a synthetic, deterministic copy of the five source tables so the
//! dashboard can be tried without the real data.
//!
//! Usage: `generate_sample [output_dir]` (default `data`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

const ORDERS: usize = 600;
const PRODUCTS: usize = 80;
const CUSTOMERS: usize = 450;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Native category name, English translation (`None` = untranslated).
const CATEGORIES: &[(&str, Option<&str>)] = &[
    ("cama_mesa_banho", Some("bed_bath_table")),
    ("beleza_saude", Some("health_beauty")),
    ("esporte_lazer", Some("sports_leisure")),
    ("moveis_decoracao", Some("furniture_decor")),
    ("informatica_acessorios", Some("computers_accessories")),
    ("utilidades_domesticas", Some("housewares")),
    ("relogios_presentes", Some("watches_gifts")),
    ("telefonia", Some("telephony")),
    ("ferramentas_jardim", Some("garden_tools")),
    ("automotivo", Some("auto")),
    ("brinquedos", Some("toys")),
    ("cool_stuff", Some("cool_stuff")),
    ("pc_gamer", None),
];

/// Seeded xoshiro256** generator, so every run writes the same files.
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    /// Index in `0..n`, biased towards small indices.
    fn skewed(&mut self, n: usize) -> usize {
        let u = self.next_f64();
        ((u * u) * n as f64) as usize % n
    }

    /// Normally distributed sample around `mean`.
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn write_csv(dir: &Path, name: &str, header: &[&str], rows: &[Vec<String>]) -> Result<()> {
    let path = dir.join(name);
    let mut writer =
        csv::Writer::from_path(&path).with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn fmt_ts(t: NaiveDateTime) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let start = NaiveDate::from_ymd_opt(2017, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .context("invalid start date")?;
    let span_secs = 600 * 86_400;

    let customers: Vec<Vec<String>> = (0..CUSTOMERS)
        .map(|i| {
            let state = ["SP", "RJ", "MG", "RS", "PR"][rng.skewed(5)];
            vec![format!("c{i:05}"), format!("u{i:05}"), state.to_string()]
        })
        .collect();

    let products: Vec<Vec<String>> = (0..PRODUCTS)
        .map(|i| {
            let (category, _) = CATEGORIES[rng.skewed(CATEGORIES.len())];
            let weight = 100 + rng.below(5_000);
            vec![format!("p{i:04}"), category.to_string(), weight.to_string()]
        })
        .collect();

    let mut orders = Vec::with_capacity(ORDERS);
    let mut items = Vec::new();
    for i in 0..ORDERS {
        let order_id = format!("o{i:05}");
        let purchased = start + TimeDelta::seconds((rng.next_f64() * span_secs as f64) as i64);
        let estimated_days = rng.gauss(24.0, 7.0).round().max(3.0) as i64;
        let estimated = purchased.date().and_time(chrono::NaiveTime::MIN)
            + TimeDelta::days(estimated_days);

        // A few orders are still in transit.
        let (status, delivered) = if rng.next_f64() < 0.03 {
            ("shipped", String::new())
        } else {
            let secs = (rng.gauss(12.0, 6.0).abs() * 86_400.0) as i64;
            ("delivered", fmt_ts(purchased + TimeDelta::seconds(secs)))
        };

        orders.push(vec![
            order_id.clone(),
            format!("c{:05}", rng.below(CUSTOMERS)),
            status.to_string(),
            fmt_ts(purchased),
            delivered,
            fmt_ts(estimated),
        ]);

        for item in 1..=(1 + rng.skewed(3)) {
            let price = 10.0 + rng.next_f64() * 290.0;
            items.push(vec![
                order_id.clone(),
                item.to_string(),
                format!("p{:04}", rng.skewed(PRODUCTS)),
                format!("s{:03}", rng.below(40)),
                format!("{price:.2}"),
                format!("{:.2}", price * 0.12),
            ]);
        }
    }

    let translations: Vec<Vec<String>> = CATEGORIES
        .iter()
        .filter_map(|(native, english)| english.map(|e| vec![native.to_string(), e.to_string()]))
        .collect();

    write_csv(
        &out_dir,
        "customers_dataset.csv",
        &["customer_id", "customer_unique_id", "customer_state"],
        &customers,
    )?;
    write_csv(
        &out_dir,
        "products_dataset.csv",
        &["product_id", "product_category_name", "product_weight_g"],
        &products,
    )?;
    write_csv(
        &out_dir,
        "orders_dataset.csv",
        &[
            "order_id",
            "customer_id",
            "order_status",
            "order_purchase_timestamp",
            "order_delivered_customer_date",
            "order_estimated_delivery_date",
        ],
        &orders,
    )?;
    write_csv(
        &out_dir,
        "order_items_dataset.csv",
        &[
            "order_id",
            "order_item_id",
            "product_id",
            "seller_id",
            "price",
            "freight_value",
        ],
        &items,
    )?;
    write_csv(
        &out_dir,
        "product_category_name_translation.csv",
        &["product_category_name", "product_category_name_english"],
        &translations,
    )?;

    println!(
        "Wrote {} orders, {} order items, {} products, {} customers to {}",
        orders.len(),
        items.len(),
        products.len(),
        customers.len(),
        out_dir.display()
    );
    Ok(())
}
