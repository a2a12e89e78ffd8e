use chrono::NaiveDateTime;
use polars::prelude::*;

use super::model::{is_null, timestamp_of};
use super::schema::{DELIVERED_AT, ESTIMATED_AT, PURCHASED_AT};
use crate::error::DataError;

const SECONDS_PER_DAY: i64 = 86_400;

/// Day counts derived for one merged row. Values may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeliveryTimes {
    /// Purchase → delivered to customer.
    pub delivery_days: Option<i64>,
    /// Purchase → estimated delivery date.
    pub estimated_days: Option<i64>,
}

/// Whole days from `start` to `end`, rounded towards negative infinity.
pub fn days_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Compute [`DeliveryTimes`] for each row of `rows`, in the same order.
///
/// Missing or unparsable timestamps give `None` for that row only.
pub fn delivery_times(rows: &DataFrame) -> Result<Vec<DeliveryTimes>, DataError> {
    let purchased = rows.column(PURCHASED_AT)?;
    let delivered = rows.column(DELIVERED_AT)?;
    let estimated = rows.column(ESTIMATED_AT)?;
    let mut unparsable = 0usize;

    let mut times = Vec::with_capacity(rows.height());
    for row in 0..rows.height() {
        let mut parse = |c: &Column| -> Result<Option<NaiveDateTime>, DataError> {
            let v = c.get(row)?;
            let t = timestamp_of(&v);
            if t.is_none() && !is_null(&v) {
                unparsable += 1;
            }
            Ok(t)
        };
        let purchased = parse(purchased)?;
        let delivered = parse(delivered)?;
        let estimated = parse(estimated)?;

        times.push(DeliveryTimes {
            delivery_days: purchased.zip(delivered).map(|(p, d)| days_between(p, d)),
            estimated_days: purchased.zip(estimated).map(|(p, e)| days_between(p, e)),
        });
    }

    if unparsable > 0 {
        log::debug!("{unparsable} timestamp cells could not be parsed; their day counts are empty");
    }
    Ok(times)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::Catalog;
    use crate::data::filter::{filter_rows, init_filter_state};
    use crate::data::fixtures;
    use crate::data::model::parse_timestamp;
    use crate::data::schema::ORDER_ID;

    fn ts(s: &str) -> NaiveDateTime {
        parse_timestamp(s).unwrap()
    }

    /// Day counts for a single order with the given timestamp cells.
    fn single(purchased: &str, delivered: &str, estimated: &str) -> DeliveryTimes {
        let rows = fixtures::table(&format!(
            "order_id,order_purchase_timestamp,order_delivered_customer_date,order_estimated_delivery_date\n\
             o1,{purchased},{delivered},{estimated}\n"
        ));
        delivery_times(&rows).unwrap()[0]
    }

    #[test]
    fn counts_whole_days() {
        assert_eq!(
            days_between(ts("2017-10-02 10:56:33"), ts("2017-10-10 21:25:13")),
            8
        );
        assert_eq!(days_between(ts("2017-10-02 10:56:33"), ts("2017-10-03 10:56:32")), 0);
    }

    #[test]
    fn negative_differences_floor() {
        assert_eq!(days_between(ts("2017-10-02 12:00:00"), ts("2017-10-02 06:00:00")), -1);
        assert_eq!(days_between(ts("2017-10-05 00:00:00"), ts("2017-10-02 00:00:00")), -3);
    }

    #[test]
    fn fractional_seconds_are_accepted() {
        let expected = DeliveryTimes {
            delivery_days: Some(8),
            estimated_days: Some(15),
        };
        assert_eq!(
            single("2017-10-02 10:56:33.250", "2017-10-10 21:25:13.000", "2017-10-18"),
            expected
        );
        assert_eq!(
            single("2017-10-02T10:56:33.250", "2017-10-10T21:25:13.000", "2017-10-18T00:00:00"),
            expected
        );
    }

    #[test]
    fn rfc3339_offsets_are_normalised_to_utc() {
        // 23:30 at -03:00 is 02:30 UTC the next day.
        assert_eq!(
            single("2017-10-01T23:30:00-03:00", "2017-10-10T21:25:13Z", "2017-10-18T00:00:00Z"),
            DeliveryTimes {
                delivery_days: Some(8),
                estimated_days: Some(15),
            }
        );
    }

    #[test]
    fn missing_delivery_keeps_estimate() {
        let catalog = Catalog::from_sources(fixtures::sources()).unwrap();
        let merged = catalog.merged();
        let times = delivery_times(merged).unwrap();

        let ids = merged.column(ORDER_ID).unwrap().as_materialized_series().str().unwrap();
        let o3 = ids.into_iter().position(|id| id == Some("o3")).unwrap();
        assert_eq!(times[o3].delivery_days, None);
        assert_eq!(times[o3].estimated_days, Some(26));
    }

    #[test]
    fn unparsable_timestamp_nulls_only_that_row() {
        let rows = fixtures::table(
            "order_id,customer_id,order_purchase_timestamp,order_delivered_customer_date,order_estimated_delivery_date\n\
             o1,c1,2017-10-02 10:56:33,sometime,2017-10-18 00:00:00\n\
             o2,c2,2018-07-24 20:41:37,2018-08-07 15:27:45,2018-08-13 00:00:00\n",
        );
        assert_eq!(
            delivery_times(&rows).unwrap(),
            vec![
                DeliveryTimes {
                    delivery_days: None,
                    estimated_days: Some(15),
                },
                DeliveryTimes {
                    delivery_days: Some(13),
                    estimated_days: Some(19),
                },
            ]
        );
    }

    #[test]
    fn computed_only_for_filtered_rows() {
        let catalog = Catalog::from_sources(fixtures::sources()).unwrap();
        let rows = filter_rows(&catalog, &init_filter_state(&catalog)).unwrap();
        assert_eq!(delivery_times(&rows).unwrap().len(), rows.height());
    }
}
