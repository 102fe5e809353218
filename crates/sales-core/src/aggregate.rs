//! Groups sale records and sums their metrics.

use std::{cmp::Reverse, collections::BTreeMap};

use chrono::NaiveDate;
use sales_domain::{
    AggregateRow, DailySummaryRow, DateRange, GroupBy, GroupKey, Granularity, SaleRecord,
    TrendRow,
};

use crate::{bucket::bucket_for, metrics};

/// Key `record` falls under for `group_by`.
pub fn group_key(record: &SaleRecord, group_by: GroupBy) -> GroupKey {
    match group_by {
        GroupBy::Period(granularity) => GroupKey::Bucket(bucket_for(granularity, record.order_date)),
        GroupBy::Product => GroupKey::Product(record.product.clone()),
        GroupBy::Customer => GroupKey::Customer(record.customer.clone()),
    }
}

/// One row per distinct key present in `records`, in ascending key order.
///
/// Keys that no record maps to produce no row.
pub fn aggregate<'a, I>(records: I, group_by: GroupBy) -> Vec<AggregateRow>
where
    I: IntoIterator<Item = &'a SaleRecord>,
{
    let mut groups: BTreeMap<GroupKey, AggregateRow> = BTreeMap::new();
    for record in records {
        let key = group_key(record, group_by);
        let row = groups
            .entry(key.clone())
            .or_insert_with(|| AggregateRow::empty(key));
        row.sales += record.sales;
        row.profit += record.profit;
        row.quantity += u64::from(record.quantity);
        row.transaction_count += 1;
    }
    groups.into_values().collect()
}

/// Chronological trend at `granularity`, each row carrying its profit margin.
pub fn trend<'a, I>(records: I, granularity: Granularity) -> Vec<TrendRow>
where
    I: IntoIterator<Item = &'a SaleRecord>,
{
    aggregate(records, GroupBy::Period(granularity))
        .into_iter()
        .filter_map(|row| match row.key {
            GroupKey::Bucket(bucket) => Some(TrendRow {
                bucket,
                sales: row.sales,
                profit: row.profit,
                quantity: row.quantity,
                transaction_count: row.transaction_count,
                profit_margin: metrics::profit_margin(row.profit, row.sales),
            }),
            _ => None,
        })
        .collect()
}

/// Totals per (date, product, customer), newest date first, optionally limited to `window`.
pub fn daily_breakdown<'a, I>(records: I, window: Option<DateRange>) -> Vec<DailySummaryRow>
where
    I: IntoIterator<Item = &'a SaleRecord>,
{
    let mut groups: BTreeMap<(Reverse<NaiveDate>, &'a str, &'a str), DailySummaryRow> =
        BTreeMap::new();
    for record in records {
        if window.is_some_and(|range| !range.contains(record.order_date)) {
            continue;
        }
        let row = groups
            .entry((
                Reverse(record.order_date),
                record.product.as_str(),
                record.customer.as_str(),
            ))
            .or_insert_with(|| DailySummaryRow {
                order_date: record.order_date,
                product: record.product.clone(),
                customer: record.customer.clone(),
                total_sales: 0.0,
                total_profit: 0.0,
                total_quantity: 0,
                transaction_count: 0,
            });
        row.total_sales += record.sales;
        row.total_profit += record.profit;
        row.total_quantity += u64::from(record.quantity);
        row.transaction_count += 1;
    }
    groups.into_values().collect()
}
