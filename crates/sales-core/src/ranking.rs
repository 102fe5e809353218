//! Top-N selection over aggregate rows.

use std::cmp::Ordering;

use sales_domain::{AggregateRow, GroupBy, RankMetric, SaleRecord};

use crate::{aggregate::aggregate, metrics};

pub fn metric_value(row: &AggregateRow, metric: RankMetric) -> f64 {
    match metric {
        RankMetric::Sales => row.sales,
        RankMetric::Profit => row.profit,
        RankMetric::Quantity => row.quantity as f64,
        RankMetric::Transactions => row.transaction_count as f64,
        RankMetric::ProfitMargin => metrics::profit_margin(row.profit, row.sales),
    }
}

/// At most `n` rows, descending by `metric`.
///
/// The sort is stable, so ties keep their ascending key order.
pub fn top_n(mut rows: Vec<AggregateRow>, metric: RankMetric, n: usize) -> Vec<AggregateRow> {
    rows.sort_by(|a, b| descending(metric_value(a, metric), metric_value(b, metric)));
    rows.truncate(n);
    rows
}

pub fn top_products<'a, I>(records: I, metric: RankMetric, n: usize) -> Vec<AggregateRow>
where
    I: IntoIterator<Item = &'a SaleRecord>,
{
    top_n(aggregate(records, GroupBy::Product), metric, n)
}

pub fn top_customers<'a, I>(records: I, metric: RankMetric, n: usize) -> Vec<AggregateRow>
where
    I: IntoIterator<Item = &'a SaleRecord>,
{
    top_n(aggregate(records, GroupBy::Customer), metric, n)
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
