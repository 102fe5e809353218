use sales_core::{filter, SaleService};
use sales_domain::{Displayable, NewSale, ReportOutcome, SaleRecord, SaleUpdate};

use crate::cli::args::ParsedArgs;
use crate::cli::commands::report;
use crate::cli::core::{
    parse_amount, parse_count, parse_date, parse_id, parse_quantity, CommandError, CommandResult,
    ShellContext,
};
use crate::cli::formatters::CliFormatters;
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::table::{Table, TableColumn, TableRenderer};

const ADD_USAGE: &str = "add <date> <product> <customer> <quantity> <sales> <profit>";
const EDIT_FIELDS: &[&str] = &["date", "product", "customer", "quantity", "sales", "profit"];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record a sale (prompts for fields when run without arguments)",
            ADD_USAGE,
            cmd_add,
        ),
        CommandEntry::new(
            "list",
            "List recorded sales, newest order date first",
            "list [limit] [--from YYYY-MM-DD] [--to YYYY-MM-DD] [--product NAME] [--min-sales X] [--min-profit Y]",
            cmd_list,
        ),
        CommandEntry::new("show", "Show one sale in detail", "show <id>", cmd_show),
        CommandEntry::new(
            "edit",
            "Change fields of a recorded sale",
            "edit <id> [date=YYYY-MM-DD] [product=..] [customer=..] [quantity=N] [sales=X] [profit=Y]",
            cmd_edit,
        ),
        CommandEntry::new(
            "delete",
            "Delete a sale by id",
            "delete <id> [--yes]",
            cmd_delete,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let candidate = if args.is_empty() && context.is_interactive() {
        prompt_new_sale(context)?
    } else {
        parse_new_sale(args)?
    };

    let outcome = SaleService::add(context.store(), candidate);
    if outcome.success {
        io::print_success(&outcome.message);
        Ok(())
    } else {
        Err(CommandError::Message(outcome.message))
    }
}

fn parse_new_sale(args: &[&str]) -> Result<NewSale, CommandError> {
    let [date, product, customer, quantity, sales, profit] = args else {
        return Err(CommandError::InvalidArguments(format!("usage: {ADD_USAGE}")));
    };
    Ok(NewSale::new(
        parse_date(date)?,
        *product,
        *customer,
        parse_quantity(quantity)?,
        parse_amount("sales", sales)?,
        parse_amount("profit", profit)?,
    ))
}

fn prompt_new_sale(context: &ShellContext) -> Result<NewSale, CommandError> {
    let theme = context.theme();
    let today = context.today().format("%Y-%m-%d").to_string();
    let date = parse_date(&io::prompt_text(theme, "Order date", Some(today.as_str()))?)?;
    let product = io::prompt_text(theme, "Product", None)?;
    let customer = io::prompt_text(theme, "Customer", None)?;
    let quantity = parse_quantity(&io::prompt_text(theme, "Quantity", Some("1"))?)?;
    let sales = parse_amount("sales", &io::prompt_text(theme, "Sales amount", None)?)?;
    let profit = parse_amount("profit", &io::prompt_text(theme, "Profit", Some("0"))?)?;
    Ok(NewSale::new(date, product, customer, quantity, sales, profit))
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &report::with_filter_options(&[]), &[])?;
    let limit = parsed
        .positional
        .first()
        .map(|raw| parse_count("limit", raw))
        .transpose()?;
    let filter = report::parse_filter(context.store(), &parsed)?;
    let records = SaleService::list(context.store())?;
    if records.is_empty() {
        io::print_info("No sales recorded yet. Use `add` to record one.");
        return Ok(());
    }

    let view = filter::apply(&records, &filter);
    if view.is_empty() {
        report::announce_empty(&ReportOutcome::NoMatches);
        return Ok(());
    }

    let shown = limit.unwrap_or(view.len()).min(view.len());
    let table = sales_table("Sales", &view[..shown], &context.formatters());
    TableRenderer::print(&table);
    if shown < view.len() {
        io::print_hint(format!("Showing {} of {} records.", shown, view.len()));
    }
    Ok(())
}

/// Tabulates `records` in the order given.
pub fn sales_table(title: &str, records: &[&SaleRecord], fmt: &CliFormatters) -> Table {
    let mut table = Table::new(
        Some(title),
        vec![
            TableColumn::right("ID"),
            TableColumn::left("Date"),
            TableColumn::left("Product"),
            TableColumn::left("Customer"),
            TableColumn::right("Qty"),
            TableColumn::right("Sales"),
            TableColumn::right("Profit"),
        ],
    );
    for record in records {
        table.add_row(vec![
            record.id.to_string(),
            fmt.format_date(record.order_date),
            record.product.clone(),
            record.customer.clone(),
            fmt.format_count(u64::from(record.quantity)),
            fmt.format_amount(record.sales),
            fmt.format_amount(record.profit),
        ]);
    }
    table
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: show <id>".into()))?;
    let record = SaleService::get(context.store(), parse_id(raw)?)?;
    let fmt = context.formatters();

    output::section(format!("Sale #{}", record.id));
    for (label, value) in detail_rows(&record, &fmt) {
        io::print_info(format!("  {label:<10} {value}"));
    }
    Ok(())
}

fn detail_rows(record: &SaleRecord, fmt: &CliFormatters) -> Vec<(&'static str, String)> {
    let margin = sales_core::metrics::profit_margin(record.profit, record.sales);
    vec![
        ("Date", fmt.format_date(record.order_date)),
        ("Product", record.product.clone()),
        ("Customer", record.customer.clone()),
        ("Quantity", fmt.format_count(u64::from(record.quantity))),
        ("Sales", fmt.format_amount(record.sales)),
        ("Profit", fmt.format_amount(record.profit)),
        ("Margin", fmt.format_percent(margin)),
        (
            "Recorded",
            record.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        ),
    ]
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (raw_id, assignments) = args.split_first().ok_or_else(|| {
        CommandError::InvalidArguments("usage: edit <id> field=value...".into())
    })?;
    let id = parse_id(raw_id)?;

    let changes = if assignments.is_empty() && context.is_interactive() {
        let current = SaleService::get(context.store(), id)?;
        prompt_changes(context, &current)?
    } else {
        parse_changes(assignments)?
    };

    let updated = SaleService::update(context.store(), id, &changes)?;
    io::print_success(format!("Sale record #{} updated.", updated.id));
    Ok(())
}

fn parse_changes(assignments: &[&str]) -> Result<SaleUpdate, CommandError> {
    let mut changes = SaleUpdate::default();
    for assignment in assignments {
        let (field, value) = assignment.split_once('=').ok_or_else(|| {
            CommandError::InvalidArguments(format!(
                "expected field=value, got `{}`",
                assignment
            ))
        })?;
        match field.trim().to_ascii_lowercase().as_str() {
            "date" => changes.order_date = Some(parse_date(value)?),
            "product" => changes.product = Some(value.to_string()),
            "customer" => changes.customer = Some(value.to_string()),
            "quantity" | "qty" => changes.quantity = Some(parse_quantity(value)?),
            "sales" => changes.sales = Some(parse_amount("sales", value)?),
            "profit" => changes.profit = Some(parse_amount("profit", value)?),
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown field `{}` (expected one of {})",
                    other,
                    EDIT_FIELDS.join(", ")
                )))
            }
        }
    }
    Ok(changes)
}

/// Prompts for every field, pre-filled with the current value. Unchanged answers are skipped.
fn prompt_changes(context: &ShellContext, current: &SaleRecord) -> Result<SaleUpdate, CommandError> {
    let theme = context.theme();
    let ask = |label: &str, value: String| io::prompt_text(theme, label, Some(value.as_str()));

    let date = parse_date(&ask("Order date", current.order_date.to_string())?)?;
    let product = ask("Product", current.product.clone())?;
    let customer = ask("Customer", current.customer.clone())?;
    let quantity = parse_quantity(&ask("Quantity", current.quantity.to_string())?)?;
    let sales = parse_amount("sales", &ask("Sales amount", current.sales.to_string())?)?;
    let profit = parse_amount("profit", &ask("Profit", current.profit.to_string())?)?;

    Ok(SaleUpdate {
        order_date: changed(date, current.order_date),
        product: changed(product, current.product.clone()),
        customer: changed(customer, current.customer.clone()),
        quantity: changed(quantity, i64::from(current.quantity)),
        sales: changed(sales, current.sales),
        profit: changed(profit, current.profit),
    })
}

fn changed<T: PartialEq>(value: T, current: T) -> Option<T> {
    (value != current).then_some(value)
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[], &["yes"])?;
    let raw = parsed
        .positional
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: delete <id> [--yes]".into()))?;
    let record = SaleService::get(context.store(), parse_id(raw)?)?;

    if !parsed.switch("yes") {
        let prompt = format!("Delete {}?", record.display_label());
        if !context.confirm(&prompt, false)? {
            io::print_info("Operation cancelled.");
            return Ok(());
        }
    }

    if SaleService::delete(context.store(), record.id)? {
        io::print_success(format!("Sale record #{} deleted.", record.id));
    } else {
        io::print_warning(format!("Sale record #{} was already removed.", record.id));
    }
    Ok(())
}
