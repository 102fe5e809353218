//! Narrows a full record set to the filtered view for one reporting pass.

use std::collections::BTreeSet;

use sales_domain::{DateRange, ReportFilter, SaleRecord, ALL_PRODUCTS};

/// Borrowed subset of the full record set, owned by a single reporting pass.
pub type FilteredView<'a> = Vec<&'a SaleRecord>;

/// Returns `true` when `record` satisfies every predicate of `filter`.
pub fn matches(record: &SaleRecord, filter: &ReportFilter) -> bool {
    filter
        .date_range()
        .map_or(true, |range| range.contains(record.order_date))
        && filter.product().matches(&record.product)
        && record.sales >= filter.min_sales()
        && record.profit >= filter.min_profit()
}

/// Applies `filter` conjunctively. Input order is preserved.
pub fn apply<'a>(records: &'a [SaleRecord], filter: &ReportFilter) -> FilteredView<'a> {
    let view: FilteredView<'a> = records
        .iter()
        .filter(|record| matches(record, filter))
        .collect();
    tracing::debug!(
        total = records.len(),
        kept = view.len(),
        "applied report filter"
    );
    view
}

/// Product selector choices: `"All"` followed by the sorted distinct product names.
pub fn product_options(records: &[SaleRecord]) -> Vec<String> {
    let names: BTreeSet<&str> = records.iter().map(|r| r.product.as_str()).collect();
    std::iter::once(ALL_PRODUCTS.to_string())
        .chain(names.into_iter().map(str::to_string))
        .collect()
}

/// Earliest and latest order dates, used as the default report range.
pub fn date_bounds<'a, I>(records: I) -> Option<DateRange>
where
    I: IntoIterator<Item = &'a SaleRecord>,
{
    let mut bounds: Option<(chrono::NaiveDate, chrono::NaiveDate)> = None;
    for record in records {
        let date = record.order_date;
        bounds = Some(match bounds {
            None => (date, date),
            Some((min, max)) => (min.min(date), max.max(date)),
        });
    }
    bounds.and_then(|(start, end)| DateRange::new(start, end).ok())
}

/// Number of distinct products among `records`.
pub fn distinct_products<'a, I>(records: I) -> usize
where
    I: IntoIterator<Item = &'a SaleRecord>,
{
    records
        .into_iter()
        .map(|r| r.product.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use sales_domain::ProductSelector;

    fn record(id: u64, date: (i32, u32, u32), product: &str, sales: f64, profit: f64) -> SaleRecord {
        SaleRecord {
            id,
            order_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            product: product.into(),
            customer: "Acme".into(),
            quantity: 1,
            sales,
            profit,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        }
    }

    fn sample() -> Vec<SaleRecord> {
        vec![
            record(1, (2024, 1, 1), "Widget", 100.0, 20.0),
            record(2, (2024, 1, 2), "Widget", 200.0, 50.0),
            record(3, (2024, 2, 1), "Gadget", 150.0, 0.0),
        ]
    }

    #[test]
    fn default_filter_keeps_everything() {
        let records = sample();
        assert_eq!(apply(&records, &ReportFilter::default()).len(), 3);
    }

    #[test]
    fn min_profit_excludes_zero_profit_gadget() {
        let records = sample();
        let filter = ReportFilter::default().with_min_profit(10.0).unwrap();
        let view = apply(&records, &filter);
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|r| r.product == "Widget"));
    }

    #[test]
    fn product_match_is_exact_and_case_sensitive() {
        let records = sample();
        let filter =
            ReportFilter::default().with_product(ProductSelector::Named("widget".into()));
        assert!(apply(&records, &filter).is_empty());
        let filter =
            ReportFilter::default().with_product(ProductSelector::Named("Gadget".into()));
        assert_eq!(apply(&records, &filter).len(), 1);
    }

    #[test]
    fn date_range_bounds_are_inclusive() {
        let records = sample();
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        )
        .unwrap();
        let view = apply(&records, &ReportFilter::default().with_date_range(range));
        let ids: Vec<u64> = view.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn product_options_start_with_all() {
        let options = product_options(&sample());
        assert_eq!(options, vec!["All", "Gadget", "Widget"]);
    }

    #[test]
    fn date_bounds_span_full_set() {
        let bounds = date_bounds(&sample()).expect("bounds");
        assert_eq!(bounds.start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(bounds.end, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert!(date_bounds(&Vec::<SaleRecord>::new()).is_none());
    }
}
