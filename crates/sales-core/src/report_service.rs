//! Composes the full dashboard report from a record set and a request.

use sales_domain::{
    DailySummaryRow, DateRange, QuickStats, RankMetric, ReportCoverage, ReportOutcome,
    ReportRequest, SaleRecord, SalesReport,
};

use crate::{aggregate, filter, metrics, ranking, storage::SaleStore, CoreError};

pub struct ReportService;

impl ReportService {
    /// Runs one reporting pass over `records`.
    ///
    /// An empty record set and a filter that matches nothing are reported as
    /// outcomes, not errors.
    pub fn build(records: &[SaleRecord], request: &ReportRequest) -> ReportOutcome {
        if records.is_empty() {
            tracing::debug!("report requested on an empty store");
            return ReportOutcome::EmptyStore;
        }

        let view = filter::apply(records, &request.filter);
        if view.is_empty() {
            return ReportOutcome::NoMatches;
        }

        let rows = view.iter().copied();
        let coverage = ReportCoverage {
            products_in_view: filter::distinct_products(rows.clone()),
            products_total: filter::distinct_products(records),
            date_range: request
                .filter
                .date_range()
                .or_else(|| filter::date_bounds(rows.clone())),
        };

        let report = SalesReport {
            granularity: request.granularity,
            kpis: metrics::kpi_summary(rows.clone()),
            trend: aggregate::trend(rows.clone(), request.granularity),
            top_products: ranking::top_products(rows.clone(), RankMetric::Sales, request.top_n),
            top_customers: ranking::top_customers(rows.clone(), RankMetric::Sales, request.top_n),
            profitability: metrics::profitability_matrix(rows),
            coverage,
        };
        tracing::debug!(
            records = view.len(),
            buckets = report.trend.len(),
            "report built"
        );
        ReportOutcome::Ready(Box::new(report))
    }

    /// Reads every record from `store` and builds the report.
    pub fn generate(store: &dyn SaleStore, request: &ReportRequest) -> Result<ReportOutcome, CoreError> {
        let records = store.fetch_all()?;
        Ok(Self::build(&records, request))
    }

    pub fn quick_stats(store: &dyn SaleStore) -> Result<QuickStats, CoreError> {
        Ok(metrics::quick_stats(&store.fetch_all()?))
    }

    /// Totals per day, product and customer, newest first.
    pub fn daily_summary(
        store: &dyn SaleStore,
        window: Option<DateRange>,
    ) -> Result<Vec<DailySummaryRow>, CoreError> {
        Ok(aggregate::daily_breakdown(&store.fetch_all()?, window))
    }

    /// Choices for the product selector, `"All"` first.
    pub fn product_options(store: &dyn SaleStore) -> Result<Vec<String>, CoreError> {
        Ok(filter::product_options(&store.fetch_all()?))
    }

    /// Earliest and latest order dates in the store, if any.
    pub fn date_bounds(store: &dyn SaleStore) -> Result<Option<DateRange>, CoreError> {
        Ok(filter::date_bounds(&store.fetch_all()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use sales_domain::{Granularity, ProductSelector, ReportFilter};

    fn record(id: u64, day: u32, product: &str, customer: &str, sales: f64) -> SaleRecord {
        SaleRecord {
            id,
            order_date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            product: product.into(),
            customer: customer.into(),
            quantity: 1,
            sales,
            profit: sales / 10.0,
            created_at: Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn empty_store_is_an_outcome() {
        let outcome = ReportService::build(&[], &ReportRequest::default());
        assert_eq!(outcome, ReportOutcome::EmptyStore);
    }

    #[test]
    fn unmatched_filter_is_no_matches() {
        let records = vec![record(1, 1, "Widget", "Acme", 10.0)];
        let request = ReportRequest {
            filter: ReportFilter::default().with_product(ProductSelector::Named("Nope".into())),
            ..ReportRequest::default()
        };
        assert_eq!(ReportService::build(&records, &request), ReportOutcome::NoMatches);
    }

    #[test]
    fn coverage_counts_products_in_view_and_total() {
        let records = vec![
            record(1, 1, "Widget", "Acme", 10.0),
            record(2, 5, "Gadget", "Acme", 20.0),
            record(3, 9, "Gizmo", "Initech", 30.0),
        ];
        let request = ReportRequest {
            filter: ReportFilter::default().with_min_sales(15.0).unwrap(),
            granularity: Granularity::Daily,
            top_n: 1,
        };
        let outcome = ReportService::build(&records, &request);
        let report = outcome.report().expect("report");
        assert_eq!(report.coverage.products_in_view, 2);
        assert_eq!(report.coverage.products_total, 3);
        let range = report.coverage.date_range.expect("range");
        assert_eq!(range.to_string(), "2024-03-05 to 2024-03-09");
        assert_eq!(report.top_products.len(), 1);
        assert_eq!(report.top_products[0].key.label(), "Gizmo");
        assert_eq!(report.trend.len(), 2);
    }
}
