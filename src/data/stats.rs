use std::collections::BTreeMap;

use polars::prelude::*;

use crate::error::DataError;

/// Number of points a KDE curve is evaluated on.
pub const KDE_POINTS: usize = 200;

/// Bandwidths of padding on each side of the KDE support.
const KDE_CUT: f64 = 3.0;

/// Name of the count column produced by [`top_counts`]'s value counts.
const COUNT_COLUMN: &str = "count";

/// Occurrences of each non-null value of `column`, highest count first, ties
/// by ascending value, truncated to `n`.
pub fn top_counts(df: &DataFrame, column: &str, n: usize) -> Result<Vec<(String, usize)>, DataError> {
    let values = df.column(column)?.as_materialized_series().drop_nulls();
    let counts = values
        .value_counts(false, false, COUNT_COLUMN.into(), false)?
        .sort(
            [COUNT_COLUMN, column],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )?
        .head(Some(n));

    let names = counts.column(column)?.cast(&DataType::String)?;
    let totals = counts.column(COUNT_COLUMN)?.cast(&DataType::UInt64)?;
    Ok(names
        .as_materialized_series()
        .str()?
        .into_iter()
        .zip(totals.as_materialized_series().u64()?)
        .filter_map(|(name, count)| Some((name?.to_string(), count? as usize)))
        .collect())
}

/// One-day-wide bins: day → count.
pub fn histogram(values: impl IntoIterator<Item = i64>) -> BTreeMap<i64, usize> {
    let mut bins = BTreeMap::new();
    for v in values {
        *bins.entry(v).or_default() += 1;
    }
    bins
}

/// Gaussian kernel density estimate scaled to counts over one-day bins,
/// so it overlays a [`histogram`] of the same values.
///
/// Uses Scott's rule for the bandwidth. Returns no points for fewer than two
/// values or zero variance.
pub fn kde_curve(values: &[f64], points: usize) -> Vec<[f64; 2]> {
    let n = values.len();
    if n < 2 || points < 2 {
        return Vec::new();
    }
    let nf = n as f64;
    let mean = values.iter().sum::<f64>() / nf;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (nf - 1.0);
    let std = var.sqrt();
    if std <= f64::EPSILON {
        return Vec::new();
    }

    let bw = std * nf.powf(-0.2);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min) - KDE_CUT * bw;
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max) + KDE_CUT * bw;
    let step = (max - min) / (points - 1) as f64;
    let norm = 1.0 / (bw * (2.0 * std::f64::consts::PI).sqrt());

    (0..points)
        .map(|i| {
            let x = min + step * i as f64;
            let density: f64 = values
                .iter()
                .map(|v| {
                    let z = (x - v) / bw;
                    norm * (-0.5 * z * z).exp()
                })
                .sum::<f64>();
            // Summed kernels = density × n.
            [x, density]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(values: Vec<&str>) -> DataFrame {
        df!("category" => values).unwrap()
    }

    #[test]
    fn top_counts_orders_by_count_then_key() {
        let mut values = vec!["bed_bath_table"; 37];
        values.extend(vec!["toys"; 12]);
        values.extend(vec!["health_beauty"; 12]);
        values.extend(vec!["auto"; 3]);

        let top = top_counts(&categories(values), "category", 10).unwrap();
        assert_eq!(
            top,
            vec![
                ("bed_bath_table".to_string(), 37),
                ("health_beauty".to_string(), 12),
                ("toys".to_string(), 12),
                ("auto".to_string(), 3)
            ]
        );
    }

    #[test]
    fn top_counts_truncates_and_skips_nulls() {
        let names: Vec<String> = (0..25).map(|i| format!("c{i:02}")).collect();
        let values: Vec<Option<&str>> = names
            .iter()
            .enumerate()
            .flat_map(|(i, n)| std::iter::repeat(Some(n.as_str())).take(i + 1))
            .chain(std::iter::repeat(None).take(100))
            .collect();
        let df = df!("category" => values).unwrap();

        let top = top_counts(&df, "category", 10).unwrap();
        assert_eq!(top.len(), 10);
        assert_eq!(top[0], ("c24".to_string(), 25));
        assert_eq!(top[9], ("c15".to_string(), 16));
    }

    #[test]
    fn top_counts_of_nothing_is_empty() {
        let df = categories(Vec::new());
        assert!(top_counts(&df, "category", 10).unwrap().is_empty());
    }

    #[test]
    fn histogram_keeps_negative_days() {
        let bins = histogram([3, -1, 3, 0]);
        assert_eq!(bins.into_iter().collect::<Vec<_>>(), vec![(-1, 1), (0, 1), (3, 2)]);
    }

    #[test]
    fn kde_area_matches_count() {
        let values: Vec<f64> = [5, 7, 8, 8, 9, 10, 12, 15, 21]
            .iter()
            .map(|&v| v as f64)
            .collect();
        let curve = kde_curve(&values, KDE_POINTS);
        assert_eq!(curve.len(), KDE_POINTS);

        let area: f64 = curve
            .windows(2)
            .map(|w| (w[1][0] - w[0][0]) * (w[0][1] + w[1][1]) / 2.0)
            .sum();
        assert!((area - values.len() as f64).abs() < 0.05, "area {area}");
    }

    #[test]
    fn kde_needs_spread() {
        assert!(kde_curve(&[4.0], KDE_POINTS).is_empty());
        assert!(kde_curve(&[4.0, 4.0, 4.0], KDE_POINTS).is_empty());
    }
}
