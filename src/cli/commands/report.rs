//! Dashboard reporting commands: the full report, trend, rankings and summaries.
//!
//! Every reporting command reads the store afresh, so results always reflect
//! the latest inserts and deletes.

use sales_core::{filter, metrics, ranking, ReportService, SaleStore};
use sales_domain::{
    AggregateRow, DailySummaryRow, DateRange, Granularity, KpiSummary, ProductSelector,
    ProfitabilityMatrix, RankMetric, ReportFilter, ReportOutcome, ReportRequest, SalesReport,
    TrendRow,
};

use crate::cli::args::ParsedArgs;
use crate::cli::core::{
    parse_amount, parse_count, parse_date, parse_granularity, parse_metric, CommandError,
    CommandResult, ShellContext,
};
use crate::cli::formatters::CliFormatters;
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::table::{Table, TableColumn, TableRenderer};
use crate::errors::SalesError;

const FILTER_OPTIONS: &[&str] = &["from", "to", "product", "min-sales", "min-profit"];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "report",
            "Show KPIs, trend, top products and customers, and the profitability matrix",
            "report [--from YYYY-MM-DD] [--to YYYY-MM-DD] [--product NAME] [--min-sales X] [--min-profit Y] [--period P] [--top N] [--json]",
            cmd_report,
        ),
        CommandEntry::new(
            "trend",
            "Show sales and profit per period bucket",
            "trend [daily|weekly|monthly|quarterly|yearly] [filters] [--json]",
            cmd_trend,
        ),
        CommandEntry::new(
            "top",
            "Rank products or customers by a metric",
            "top <products|customers> [--by sales|profit|quantity|transactions|margin] [--limit N] [filters]",
            cmd_top,
        ),
        CommandEntry::new(
            "daily",
            "Show totals per date, product and customer",
            "daily [--from YYYY-MM-DD] [--to YYYY-MM-DD]",
            cmd_daily,
        ),
        CommandEntry::new(
            "products",
            "List the product filter choices",
            "products",
            cmd_products,
        ),
        CommandEntry::new(
            "stats",
            "Show record count and unfiltered totals",
            "stats",
            cmd_stats,
        ),
    ]
}

pub(crate) fn with_filter_options(extra: &[&'static str]) -> Vec<&'static str> {
    FILTER_OPTIONS.iter().chain(extra).copied().collect()
}

/// Builds a [`ReportFilter`] from the shared filter options.
///
/// A range given with only one end is closed with the store's own bounds. When
/// the given end lies outside those bounds the range collapses onto it, so the
/// filter matches nothing instead of failing.
pub(crate) fn parse_filter(store: &dyn SaleStore, parsed: &ParsedArgs) -> Result<ReportFilter, CommandError> {
    let mut filter = ReportFilter::default();

    let from = parsed.parsed_option("from", parse_date)?;
    let to = parsed.parsed_option("to", parse_date)?;
    if let Some(range) = parse_range(store, from, to)? {
        filter = filter.with_date_range(range);
    }
    if let Some(product) = parsed.option("product") {
        filter = filter.with_product(ProductSelector::from_label(product));
    }
    if let Some(value) = parsed.parsed_option("min-sales", |raw| parse_amount("min-sales", raw))? {
        filter = filter.with_min_sales(value).map_err(SalesError::from)?;
    }
    if let Some(value) = parsed.parsed_option("min-profit", |raw| parse_amount("min-profit", raw))? {
        filter = filter.with_min_profit(value).map_err(SalesError::from)?;
    }
    Ok(filter)
}

fn parse_range(
    store: &dyn SaleStore,
    from: Option<chrono::NaiveDate>,
    to: Option<chrono::NaiveDate>,
) -> Result<Option<DateRange>, CommandError> {
    let (start, end) = match (from, to) {
        (None, None) => return Ok(None),
        (Some(start), Some(end)) => (start, end),
        (Some(start), None) => {
            let latest = ReportService::date_bounds(store)?.map_or(start, |b| b.end);
            (start, latest.max(start))
        }
        (None, Some(end)) => {
            let earliest = ReportService::date_bounds(store)?.map_or(end, |b| b.start);
            (earliest.min(end), end)
        }
    };
    let range = DateRange::new(start, end).map_err(SalesError::from)?;
    Ok(Some(range))
}

fn build_request(
    context: &ShellContext,
    parsed: &ParsedArgs,
    granularity: Option<Granularity>,
) -> Result<ReportRequest, CommandError> {
    Ok(ReportRequest {
        filter: parse_filter(context.store(), parsed)?,
        granularity: granularity.unwrap_or(context.config.default_granularity),
        top_n: parsed
            .parsed_option("top", |raw| parse_count("top", raw))?
            .unwrap_or(context.config.top_n),
    })
}

/// Prints the message for an empty outcome. Returns `true` when nothing else should be shown.
pub(crate) fn announce_empty(outcome: &ReportOutcome) -> bool {
    match outcome {
        ReportOutcome::EmptyStore => {
            io::print_info("No sales data available. Use `add` to record sales first.");
            true
        }
        ReportOutcome::NoMatches => {
            io::print_warning("No records match the current filters.");
            true
        }
        ReportOutcome::Ready(_) => false,
    }
}

fn print_json(value: &serde_json::Value) -> CommandResult {
    let json = serde_json::to_string_pretty(value)?;
    io::println_text(&json)?;
    Ok(())
}

/// The trend part of `outcome`, tagged with the same `status` as `report --json`.
fn trend_json(outcome: &ReportOutcome) -> Result<serde_json::Value, serde_json::Error> {
    match outcome.report() {
        Some(report) => Ok(serde_json::json!({
            "status": "ready",
            "granularity": report.granularity.as_str(),
            "trend": &report.trend,
        })),
        None => serde_json::to_value(outcome),
    }
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &with_filter_options(&["period", "top"]), &["json"])?;
    let granularity = parsed.parsed_option("period", parse_granularity)?;
    let request = build_request(context, &parsed, granularity)?;
    let outcome = ReportService::generate(context.store(), &request)?;

    if parsed.switch("json") {
        return print_json(&serde_json::to_value(&outcome)?);
    }
    if announce_empty(&outcome) {
        return Ok(());
    }
    if let Some(report) = outcome.report() {
        let fmt = context.formatters();
        for table in report_tables(report, &fmt) {
            TableRenderer::print(&table);
        }
        io::print_hint(coverage_line(report));
    }
    Ok(())
}

fn cmd_trend(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &with_filter_options(&[]), &["json"])?;
    let granularity = parsed
        .positional
        .first()
        .map(|raw| parse_granularity(raw))
        .transpose()?;
    let request = build_request(context, &parsed, granularity)?;
    let outcome = ReportService::generate(context.store(), &request)?;

    if parsed.switch("json") {
        return print_json(&trend_json(&outcome)?);
    }
    if announce_empty(&outcome) {
        return Ok(());
    }
    if let Some(report) = outcome.report() {
        TableRenderer::print(&trend_table(report.granularity, &report.trend, &context.formatters()));
    }
    Ok(())
}

fn cmd_top(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &with_filter_options(&["by", "limit"]), &[])?;
    let usage = || CommandError::InvalidArguments("usage: top <products|customers> [--by metric] [--limit N]".into());
    let target = parsed.positional.first().ok_or_else(usage)?.to_ascii_lowercase();
    let metric = parsed
        .parsed_option("by", parse_metric)?
        .unwrap_or(RankMetric::Sales);
    let limit = parsed
        .parsed_option("limit", |raw| parse_count("limit", raw))?
        .unwrap_or(context.config.top_n);
    let filter = parse_filter(context.store(), &parsed)?;

    let records = context.store().fetch_all()?;
    let view = filter::apply(&records, &filter);
    if records.is_empty() {
        announce_empty(&ReportOutcome::EmptyStore);
        return Ok(());
    }
    if view.is_empty() {
        announce_empty(&ReportOutcome::NoMatches);
        return Ok(());
    }

    let (title, label, rows) = match target.as_str() {
        "products" | "product" => (
            "Top products",
            "Product",
            ranking::top_products(view.iter().copied(), metric, limit),
        ),
        "customers" | "customer" => (
            "Top customers",
            "Customer",
            ranking::top_customers(view.iter().copied(), metric, limit),
        ),
        _ => return Err(usage()),
    };
    let title = format!("{title} by {}", metric.as_str());
    TableRenderer::print(&ranking_table(&title, label, &rows, &context.formatters()));
    Ok(())
}

fn cmd_daily(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["from", "to"], &[])?;
    let from = parsed.parsed_option("from", parse_date)?;
    let to = parsed.parsed_option("to", parse_date)?;
    let range = parse_range(context.store(), from, to)?;

    let rows = ReportService::daily_summary(context.store(), range)?;
    if rows.is_empty() {
        io::print_info("No sales in the selected period.");
        return Ok(());
    }
    TableRenderer::print(&daily_table(&rows, &context.formatters()));
    Ok(())
}

fn cmd_products(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let options = ReportService::product_options(context.store())?;
    if options.len() == 1 {
        io::print_info("No products recorded yet.");
        return Ok(());
    }
    let mut table = Table::new(Some("Products"), vec![TableColumn::left("Product")]);
    for option in options {
        table.add_row(vec![option]);
    }
    TableRenderer::print(&table);
    Ok(())
}

fn cmd_stats(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let stats = ReportService::quick_stats(context.store())?;
    let bounds = ReportService::date_bounds(context.store())?;
    let fmt = context.formatters();

    let mut table = Table::new(
        Some("Quick stats"),
        vec![TableColumn::left("Metric"), TableColumn::right("Value")],
    );
    table.add_row(vec!["Records".to_string(), fmt.format_count(stats.record_count as u64)]);
    table.add_row(vec!["Total sales".to_string(), fmt.format_amount(stats.total_sales)]);
    table.add_row(vec!["Total profit".to_string(), fmt.format_amount(stats.total_profit)]);
    table.add_row(vec!["Profit margin".to_string(), fmt.format_percent(stats.profit_margin)]);
    if let Some(range) = bounds {
        table.add_row(vec!["Date range".to_string(), range.to_string()]);
    }
    TableRenderer::print(&table);
    Ok(())
}

/// Tables printed by `report`, in display order.
pub fn report_tables(report: &SalesReport, fmt: &CliFormatters) -> Vec<Table> {
    vec![
        kpi_table(&report.kpis, fmt),
        trend_table(report.granularity, &report.trend, fmt),
        ranking_table("Top products", "Product", &report.top_products, fmt),
        ranking_table("Top customers", "Customer", &report.top_customers, fmt),
        profitability_table(&report.profitability, fmt),
    ]
}

/// `Products analysed: X of Y` plus the covered date range.
pub fn coverage_line(report: &SalesReport) -> String {
    let coverage = &report.coverage;
    let mut line = format!(
        "Products analysed: {} of {}",
        coverage.products_in_view, coverage.products_total
    );
    if let Some(range) = coverage.date_range {
        line.push_str(&format!(" | Date range: {range}"));
    }
    line
}

pub fn kpi_table(kpis: &KpiSummary, fmt: &CliFormatters) -> Table {
    let mut table = Table::new(
        Some("Key figures"),
        vec![TableColumn::left("Metric"), TableColumn::right("Value")],
    );
    table.add_row(vec!["Total sales".to_string(), fmt.format_amount(kpis.total_sales)]);
    table.add_row(vec!["Total profit".to_string(), fmt.format_amount(kpis.total_profit)]);
    table.add_row(vec!["Orders".to_string(), fmt.format_count(kpis.total_orders as u64)]);
    table.add_row(vec![
        "Avg order value".to_string(),
        fmt.format_amount(kpis.average_order_value),
    ]);
    table.add_row(vec!["Profit margin".to_string(), fmt.format_percent(kpis.profit_margin)]);
    table.add_row(vec![
        "Avg profit/order".to_string(),
        fmt.format_amount(kpis.average_profit_per_order),
    ]);
    table
}

pub fn trend_table(granularity: Granularity, rows: &[TrendRow], fmt: &CliFormatters) -> Table {
    let mut table = Table::new(
        Some(format!("Trend ({})", granularity.as_str())),
        vec![
            TableColumn::left(bucket_header(granularity)),
            TableColumn::right("Sales"),
            TableColumn::right("Profit"),
            TableColumn::right("Qty"),
            TableColumn::right("Orders"),
            TableColumn::right("Margin"),
        ],
    );
    for row in rows {
        table.add_row(vec![
            row.bucket.to_string(),
            fmt.format_amount(row.sales),
            fmt.format_amount(row.profit),
            fmt.format_count(row.quantity),
            fmt.format_count(row.transaction_count as u64),
            fmt.format_percent(row.profit_margin),
        ]);
    }
    table
}

fn bucket_header(granularity: Granularity) -> &'static str {
    match granularity {
        Granularity::Daily => "Date",
        Granularity::Weekly => "Week",
        Granularity::Monthly => "Month",
        Granularity::Quarterly => "Quarter",
        Granularity::Yearly => "Year",
    }
}

pub fn ranking_table(title: &str, label: &str, rows: &[AggregateRow], fmt: &CliFormatters) -> Table {
    let mut table = Table::new(
        Some(title),
        vec![
            TableColumn::right("#"),
            TableColumn::left(label),
            TableColumn::right("Sales"),
            TableColumn::right("Profit"),
            TableColumn::right("Qty"),
            TableColumn::right("Orders"),
            TableColumn::right("Margin"),
        ],
    );
    for (rank, row) in rows.iter().enumerate() {
        table.add_row(vec![
            (rank + 1).to_string(),
            row.key.label(),
            fmt.format_amount(row.sales),
            fmt.format_amount(row.profit),
            fmt.format_count(row.quantity),
            fmt.format_count(row.transaction_count as u64),
            fmt.format_percent(ranking::metric_value(row, RankMetric::ProfitMargin)),
        ]);
    }
    table
}

pub fn profitability_table(matrix: &ProfitabilityMatrix, fmt: &CliFormatters) -> Table {
    let title = format!(
        "Profitability (median sales {}, median margin {})",
        fmt.format_amount(matrix.lines.median_sales),
        fmt.format_percent(matrix.lines.median_margin)
    );
    let mut table = Table::new(
        Some(title),
        vec![
            TableColumn::left("Product"),
            TableColumn::right("Sales"),
            TableColumn::right("Margin"),
            TableColumn::right("Avg price"),
            TableColumn::right("Profit/unit"),
            TableColumn::left("Quadrant"),
        ],
    );
    for row in &matrix.rows {
        table.add_row(vec![
            row.product.clone(),
            fmt.format_amount(row.sales),
            fmt.format_percent(row.profit_margin),
            fmt.format_amount(row.average_price),
            fmt.format_amount(row.profit_per_unit),
            row.quadrant.to_string(),
        ]);
    }
    table
}

pub fn daily_table(rows: &[DailySummaryRow], fmt: &CliFormatters) -> Table {
    let mut table = Table::new(
        Some("Daily summary"),
        vec![
            TableColumn::left("Date"),
            TableColumn::left("Product"),
            TableColumn::left("Customer"),
            TableColumn::right("Sales"),
            TableColumn::right("Profit"),
            TableColumn::right("Qty"),
            TableColumn::right("Orders"),
            TableColumn::right("Margin"),
        ],
    );
    for row in rows {
        table.add_row(vec![
            fmt.format_date(row.order_date),
            row.product.clone(),
            row.customer.clone(),
            fmt.format_amount(row.total_sales),
            fmt.format_amount(row.total_profit),
            fmt.format_count(row.total_quantity),
            fmt.format_count(row.transaction_count as u64),
            fmt.format_percent(metrics::profit_margin(row.total_profit, row.total_sales)),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_options_extend_the_shared_set() {
        let options = with_filter_options(&["period"]);
        assert_eq!(options.len(), FILTER_OPTIONS.len() + 1);
        assert_eq!(options.last(), Some(&"period"));
    }

    #[test]
    fn bucket_headers_follow_granularity() {
        assert_eq!(bucket_header(Granularity::Quarterly), "Quarter");
        assert_eq!(bucket_header(Granularity::Daily), "Date");
    }
}
