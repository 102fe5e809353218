use chrono::{NaiveDate, TimeZone, Utc};
use sales_core::ReportService;
use sales_domain::{Granularity, ReportRequest, SaleRecord, SalesReport};
use sales_ledger::cli::commands::report::{coverage_line, report_tables};
use sales_ledger::cli::formatters::CliFormatters;
use sales_ledger::cli::ui::table::TableRenderer;

fn record(id: u64, date: (i32, u32, u32), product: &str, customer: &str, qty: u32, sales: f64, profit: f64) -> SaleRecord {
    SaleRecord {
        id,
        order_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        product: product.into(),
        customer: customer.into(),
        quantity: qty,
        sales,
        profit,
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
    }
}

fn seeded_report() -> SalesReport {
    let records = vec![
        record(3, (2024, 2, 1), "Gadget", "Acme", 1, 150.0, 0.0),
        record(2, (2024, 1, 2), "Widget", "Globex", 3, 200.0, 50.0),
        record(1, (2024, 1, 1), "Widget", "Acme", 2, 100.0, 20.0),
    ];
    ReportService::build(&records, &ReportRequest::default())
        .report()
        .cloned()
        .expect("report ready")
}

#[test]
fn kpi_table_layout() {
    let report = seeded_report();
    let tables = report_tables(&report, &CliFormatters::new("INR", 2));
    assert_eq!(tables.len(), 5);

    insta::assert_snapshot!(TableRenderer::render(&tables[0]), @r"
    Metric              Value
    -------------------------
    Total sales       ₹450.00
    Total profit       ₹70.00
    Orders                  3
    Avg order value   ₹150.00
    Profit margin       15.6%
    Avg profit/order   ₹23.33
    ");
}

#[test]
fn tables_are_titled_in_display_order() {
    let report = seeded_report();
    let titles: Vec<String> = report_tables(&report, &CliFormatters::new("USD", 2))
        .into_iter()
        .filter_map(|table| table.title)
        .collect();
    assert_eq!(
        titles,
        vec![
            "Key figures".to_string(),
            "Trend (monthly)".to_string(),
            "Top products".to_string(),
            "Top customers".to_string(),
            "Profitability (median sales $225.00, median margin 11.7%)".to_string(),
        ]
    );
}

#[test]
fn profitability_rows_carry_quadrants() {
    let report = seeded_report();
    let tables = report_tables(&report, &CliFormatters::new("INR", 2));
    let lines = TableRenderer::render_lines(&tables[4]);
    assert!(lines[2].starts_with("Gadget") || lines[2].starts_with("Widget"));
    let widget = lines.iter().find(|line| line.starts_with("Widget")).expect("widget row");
    assert!(widget.ends_with("high sales / high margin"));
    let gadget = lines.iter().find(|line| line.starts_with("Gadget")).expect("gadget row");
    assert!(gadget.ends_with("low sales / low margin"));
}

#[test]
fn quarterly_trend_and_coverage_footer() {
    let records = vec![
        record(2, (2024, 5, 10), "Widget", "Acme", 1, 80.0, 8.0),
        record(1, (2024, 1, 15), "Widget", "Acme", 1, 20.0, 2.0),
    ];
    let request = ReportRequest {
        granularity: Granularity::Quarterly,
        ..ReportRequest::default()
    };
    let outcome = ReportService::build(&records, &request);
    let report = outcome.report().expect("ready");
    let tables = report_tables(report, &CliFormatters::new("EUR", 0));

    let trend = TableRenderer::render_lines(&tables[1]);
    assert!(trend[0].starts_with("Quarter"));
    assert!(trend[2].starts_with("1 "));
    assert!(trend[3].starts_with("2 "));
    assert!(trend[3].contains("€80"));

    assert_eq!(
        coverage_line(report),
        "Products analysed: 1 of 1 | Date range: 2024-01-15 to 2024-05-10"
    );
}
