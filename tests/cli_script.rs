mod common;

use predicates::str::contains;
use regex::Regex;

use common::{run_script, script_command, test_home, SEED_LINES};

#[test]
fn script_mode_records_sales_and_persists_them() {
    let home = test_home();
    script_command(&home)
        .write_stdin(format!("{SEED_LINES}exit\n"))
        .assert()
        .success()
        .stdout(contains("Sale record #1 added successfully"))
        .stdout(contains("Sale record #3 added successfully"));

    let json = std::fs::read_to_string(home.join("data").join("sales.json")).expect("data file");
    assert!(json.contains("\"Globex\""));
    assert!(json.contains("\"next_id\": 4"));
}

#[test]
fn rejected_sale_prints_validation_message() {
    let home = test_home();
    script_command(&home)
        .write_stdin("add 2024-01-01 Widget Acme 1 50 60\nadd 2024-01-01 Widget Acme 0 50 5\nlist\n")
        .assert()
        .success()
        .stdout(contains("Profit cannot be greater than sales amount"))
        .stdout(contains("Quantity must be greater than 0"))
        .stdout(contains("No sales recorded yet"));
}

#[test]
fn report_shows_kpis_trend_and_coverage() {
    let home = test_home();
    let stdout = run_script(&home, &format!("{SEED_LINES}report\n"));

    assert!(stdout.contains("=== Key figures ==="));
    assert!(stdout.contains("₹450.00"));
    assert!(stdout.contains("=== Trend (monthly) ==="));
    assert!(stdout.contains("Products analysed: 2 of 2 | Date range: 2024-01-01 to 2024-02-01"));

    let month_row = Regex::new(r"(?m)^2024-01\s+₹300\.00\s+₹70\.00\s+5\s+2\s+23\.3%$").unwrap();
    assert!(month_row.is_match(&stdout), "missing January trend row:\n{stdout}");
}

#[test]
fn filters_narrow_the_report() {
    let home = test_home();
    let stdout = run_script(
        &home,
        &format!("{SEED_LINES}report --min-profit 10 --period daily\n"),
    );
    assert!(stdout.contains("Products analysed: 1 of 2"));
    assert!(stdout.contains("=== Trend (daily) ==="));
    assert!(!stdout.contains("Gadget"));

    let stdout = run_script(&home, "report --product Nothing\n");
    assert!(stdout.contains("No records match the current filters."));
}

#[test]
fn empty_store_report_is_not_an_error() {
    let home = test_home();
    script_command(&home)
        .write_stdin("report\nstats\n")
        .assert()
        .success()
        .stdout(contains("No sales data available"))
        .stdout(contains("Records"))
        .stdout(contains("₹0.00"));
}

#[test]
fn json_report_is_machine_readable() {
    let home = test_home();
    let stdout = run_script(&home, &format!("{SEED_LINES}report --json\n"));
    let start = stdout.find('{').expect("json object");
    let end = stdout.rfind('}').expect("json end");
    let value: serde_json::Value = serde_json::from_str(&stdout[start..=end]).expect("valid json");
    assert_eq!(value["status"], "ready");
    assert_eq!(value["report"]["kpis"]["total_orders"], 3);
    assert_eq!(value["report"]["top_customers"][0]["key"], "Acme");
}

#[test]
fn top_customers_by_profit_and_delete() {
    let home = test_home();
    let stdout = run_script(
        &home,
        &format!("{SEED_LINES}top customers --by profit --limit 1\ndelete 2\nlist\n"),
    );
    let first_rank = Regex::new(r"(?m)^1\s+Globex\s").unwrap();
    assert!(first_rank.is_match(&stdout), "unexpected ranking:\n{stdout}");
    assert!(stdout.contains("Sale record #2 deleted."));

    let list_rows = Regex::new(r"(?m)^\s*\d+\s+2024-\d{2}-\d{2}\s").unwrap();
    let listed = stdout
        .rsplit("=== Sales ===")
        .next()
        .map(|tail| list_rows.find_iter(tail).count())
        .unwrap_or(0);
    assert_eq!(listed, 2);
}

#[test]
fn unknown_command_suggests_closest() {
    let home = test_home();
    script_command(&home)
        .write_stdin("reprot\nshow 42\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `reprot`"))
        .stdout(contains("Suggestion: `report`?"))
        .stdout(contains("Sale not found: #42"));
}

#[test]
fn config_set_changes_currency_formatting() {
    let home = test_home();
    let stdout = run_script(
        &home,
        &format!("config set currency usd\n{SEED_LINES}stats\nconfig show\n"),
    );
    assert!(stdout.contains("currency set to USD."));
    assert!(stdout.contains("$450.00"));
    assert!(home.join("config").join("config.json").exists());
}

#[test]
fn open_ended_range_past_the_data_reports_no_matches() {
    let home = test_home();
    let stdout = run_script(
        &home,
        &format!("{SEED_LINES}report --from 2025-01-01\nreport --to 2023-06-01\ndaily --from 2025-01-01\n"),
    );
    assert_eq!(stdout.matches("No records match the current filters.").count(), 2);
    assert!(stdout.contains("No sales in the selected period."));
    assert!(!stdout.contains("before start"));
}

#[test]
fn list_accepts_the_report_filters() {
    let home = test_home();
    let stdout = run_script(
        &home,
        &format!("{SEED_LINES}list --from 2024-01-02 --product Widget\nlist --min-sales 1000\n"),
    );
    let list_rows = Regex::new(r"(?m)^\s*(\d+)\s+(2024-\d{2}-\d{2})\s").unwrap();
    let rows: Vec<(String, String)> = list_rows
        .captures_iter(&stdout)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect();
    assert_eq!(rows, vec![("2".to_string(), "2024-01-02".to_string())]);
    assert!(stdout.contains("No records match the current filters."));
}

#[test]
fn trend_json_distinguishes_empty_outcomes() {
    let home = test_home();
    let stdout = run_script(&home, "trend --json\n");
    assert!(stdout.contains(r#""status": "empty_store""#), "{stdout}");

    let stdout = run_script(
        &home,
        &format!("{SEED_LINES}trend --json --product Nothing\ntrend quarterly --json\n"),
    );
    assert!(stdout.contains(r#""status": "no_matches""#), "{stdout}");
    assert!(stdout.contains(r#""status": "ready""#));
    assert!(stdout.contains(r#""granularity": "quarterly""#));
}
