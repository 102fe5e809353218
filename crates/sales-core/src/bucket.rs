//! Maps order dates to trend buckets.

use chrono::{Datelike, NaiveDate};
use sales_domain::{BucketKey, Granularity};

/// Returns the bucket `date` belongs to at `granularity`.
///
/// Weekly buckets use the ISO week number and quarterly buckets the calendar
/// quarter; neither includes the year.
pub fn bucket_for(granularity: Granularity, date: NaiveDate) -> BucketKey {
    match granularity {
        Granularity::Daily => BucketKey::Day(date),
        Granularity::Weekly => BucketKey::Week(date.iso_week().week()),
        Granularity::Monthly => BucketKey::Month {
            year: date.year(),
            month: date.month(),
        },
        Granularity::Quarterly => BucketKey::Quarter(quarter_of(date)),
        Granularity::Yearly => BucketKey::Year(date.year()),
    }
}

fn quarter_of(date: NaiveDate) -> u32 {
    (date.month() - 1) / 3 + 1
}
