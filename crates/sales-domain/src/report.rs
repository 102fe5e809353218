//! Report requests and the tabular rows produced by the aggregation engine.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::{
    filter::{DateRange, ReportFilter},
    period::{BucketKey, Granularity},
};

/// Number of rows kept by product and customer rankings unless overridden.
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Selects the key records are grouped under.
pub enum GroupBy {
    Period(Granularity),
    Product,
    Customer,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Value of a grouping key for one aggregate row.
pub enum GroupKey {
    Bucket(BucketKey),
    Product(String),
    Customer(String),
}

impl GroupKey {
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Bucket(key) => write!(f, "{key}"),
            GroupKey::Product(name) | GroupKey::Customer(name) => f.write_str(name),
        }
    }
}

impl Serialize for GroupKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Summed metrics for one group of sale records.
pub struct AggregateRow {
    pub key: GroupKey,
    pub sales: f64,
    pub profit: f64,
    pub quantity: u64,
    pub transaction_count: usize,
}

impl AggregateRow {
    pub fn empty(key: GroupKey) -> Self {
        Self {
            key,
            sales: 0.0,
            profit: 0.0,
            quantity: 0,
            transaction_count: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// One point of a time trend, with its profit margin in percent.
pub struct TrendRow {
    pub bucket: BucketKey,
    pub sales: f64,
    pub profit: f64,
    pub quantity: u64,
    pub transaction_count: usize,
    pub profit_margin: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Metric used to rank aggregate rows.
pub enum RankMetric {
    Sales,
    Profit,
    Quantity,
    Transactions,
    ProfitMargin,
}

impl RankMetric {
    pub fn as_str(self) -> &'static str {
        match self {
            RankMetric::Sales => "sales",
            RankMetric::Profit => "profit",
            RankMetric::Quantity => "quantity",
            RankMetric::Transactions => "transactions",
            RankMetric::ProfitMargin => "margin",
        }
    }
}

impl fmt::Display for RankMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankMetric {
    type Err = ParseMetricError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sales" => Ok(RankMetric::Sales),
            "profit" => Ok(RankMetric::Profit),
            "quantity" | "qty" => Ok(RankMetric::Quantity),
            "transactions" | "orders" => Ok(RankMetric::Transactions),
            "margin" | "profit_margin" => Ok(RankMetric::ProfitMargin),
            _ => Err(ParseMetricError(value.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMetricError(pub String);

impl fmt::Display for ParseMetricError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown metric `{}` (expected sales, profit, quantity, transactions or margin)",
            self.0
        )
    }
}

impl std::error::Error for ParseMetricError {}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Headline figures for a filtered view.
pub struct KpiSummary {
    pub total_sales: f64,
    pub total_profit: f64,
    pub total_orders: usize,
    pub average_order_value: f64,
    pub profit_margin: f64,
    pub average_profit_per_order: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Position of a product relative to the median reference lines.
pub enum Quadrant {
    HighSalesHighMargin,
    HighSalesLowMargin,
    LowSalesHighMargin,
    LowSalesLowMargin,
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Quadrant::HighSalesHighMargin => "high sales / high margin",
            Quadrant::HighSalesLowMargin => "high sales / low margin",
            Quadrant::LowSalesHighMargin => "low sales / high margin",
            Quadrant::LowSalesLowMargin => "low sales / low margin",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductProfitability {
    pub product: String,
    pub sales: f64,
    pub profit: f64,
    pub quantity: u64,
    pub profit_margin: f64,
    pub average_price: f64,
    pub profit_per_unit: f64,
    pub quadrant: Quadrant,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
/// Median sales and median margin across the matrix rows.
pub struct QuadrantLines {
    pub median_sales: f64,
    pub median_margin: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitabilityMatrix {
    pub rows: Vec<ProductProfitability>,
    pub lines: QuadrantLines,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// How much of the full record set a report covers.
pub struct ReportCoverage {
    pub products_in_view: usize,
    pub products_total: usize,
    pub date_range: Option<DateRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Parameters for one full report: filter, trend granularity and ranking size.
pub struct ReportRequest {
    pub filter: ReportFilter,
    pub granularity: Granularity,
    pub top_n: usize,
}

impl Default for ReportRequest {
    fn default() -> Self {
        Self {
            filter: ReportFilter::default(),
            granularity: Granularity::default(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesReport {
    pub granularity: Granularity,
    pub kpis: KpiSummary,
    pub trend: Vec<TrendRow>,
    pub top_products: Vec<AggregateRow>,
    pub top_customers: Vec<AggregateRow>,
    pub profitability: ProfitabilityMatrix,
    pub coverage: ReportCoverage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "report", rename_all = "snake_case")]
/// Result of a reporting pass. Both empty variants are valid outcomes, not failures.
pub enum ReportOutcome {
    EmptyStore,
    NoMatches,
    Ready(Box<SalesReport>),
}

impl ReportOutcome {
    pub fn report(&self) -> Option<&SalesReport> {
        match self {
            ReportOutcome::Ready(report) => Some(report),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Unfiltered totals across every stored record.
pub struct QuickStats {
    pub record_count: usize,
    pub total_sales: f64,
    pub total_profit: f64,
    pub profit_margin: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Totals for one (date, product, customer) combination.
pub struct DailySummaryRow {
    pub order_date: NaiveDate,
    pub product: String,
    pub customer: String,
    pub total_sales: f64,
    pub total_profit: f64,
    pub total_quantity: u64,
    pub transaction_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_aliases_parse() {
        assert_eq!("Margin".parse::<RankMetric>(), Ok(RankMetric::ProfitMargin));
        assert_eq!("orders".parse::<RankMetric>(), Ok(RankMetric::Transactions));
        assert!("revenue".parse::<RankMetric>().is_err());
    }

    #[test]
    fn empty_outcomes_serialize_with_status_tag() {
        let json = serde_json::to_string(&ReportOutcome::NoMatches).expect("serialize");
        assert_eq!(json, r#"{"status":"no_matches"}"#);
    }

    #[test]
    fn group_keys_display_their_label() {
        let key = GroupKey::Bucket(BucketKey::Quarter(3));
        assert_eq!(key.label(), "3");
        assert_eq!(GroupKey::Customer("Acme".into()).label(), "Acme");
    }
}
