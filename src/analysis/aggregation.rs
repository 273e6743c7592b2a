//! Calendar bucketing of hourly price series into weekly and monthly
//! averages for chart views. Buckets are recomputed on every call and
//! never persisted.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::price::PricePoint;

/// One aggregation period (week-of-month or month-of-year) with its
/// averaged price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateBucket {
    pub bucket_key: u32,
    pub label: String,
    pub average_price: f64,
    pub source_count: usize,
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Average prices by week of the current calendar month.
///
/// The week key is `ceil(day_of_month / 7)`. Points outside the current
/// month and year are silently dropped, so a series spanning a month
/// boundary only contributes its in-month points. Buckets with no
/// contributing points are never emitted.
pub fn aggregate_by_week(series: &[PricePoint], now: DateTime<Utc>) -> Vec<AggregateBucket> {
    let mut sums: BTreeMap<u32, (f64, usize)> = BTreeMap::new();

    for point in series {
        if point.timestamp.year() != now.year() || point.timestamp.month() != now.month() {
            continue;
        }
        let week = point.timestamp.day().div_ceil(7);
        let entry = sums.entry(week).or_insert((0.0, 0));
        entry.0 += point.price;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(week, (sum, count))| AggregateBucket {
            bucket_key: week,
            label: format!("Week {}", week),
            average_price: sum / count as f64,
            source_count: count,
        })
        .collect()
}

/// Average prices by calendar month of the current year. Points from
/// other years are silently dropped.
pub fn aggregate_by_month(series: &[PricePoint], now: DateTime<Utc>) -> Vec<AggregateBucket> {
    let mut sums: BTreeMap<u32, (f64, usize)> = BTreeMap::new();

    for point in series {
        if point.timestamp.year() != now.year() {
            continue;
        }
        let entry = sums.entry(point.timestamp.month()).or_insert((0.0, 0));
        entry.0 += point.price;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(month, (sum, count))| AggregateBucket {
            bucket_key: month,
            label: MONTH_NAMES[(month - 1) as usize].to_string(),
            average_price: sum / count as f64,
            source_count: count,
        })
        .collect()
}
