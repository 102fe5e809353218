use sales_config::ConfigKey;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::table::{Table, TableColumn, TableRenderer};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change CLI preferences",
        "config [show|set <key> <value>|path]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        return show_config(context);
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                let keys: Vec<&str> = ConfigKey::ALL.iter().map(|key| key.as_str()).collect();
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    keys.join("|")
                )));
            }
            let key: ConfigKey = args[1].parse().map_err(CommandError::from)?;
            let value = args[2..].join(" ");
            let shown = context.update_config(key.as_str(), value.trim())?.value_of(key);
            io::print_success(format!("{} set to {}.", key, display_value(&shown)));
            Ok(())
        }
        "path" => {
            io::print_info(format!(
                "Config file: {}",
                context.config_manager.config_path().display()
            ));
            io::print_info(format!("Data file: {}", context.data_file().display()));
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{}`",
            other
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    let mut table = Table::new(
        Some("Configuration"),
        vec![TableColumn::left("Key"), TableColumn::left("Value")],
    );
    for key in ConfigKey::ALL {
        let value = context.config.value_of(key);
        table.add_row(vec![key.as_str().to_string(), display_value(&value).to_string()]);
    }
    TableRenderer::print(&table);
    io::print_hint(format!("Resolved data file: {}", context.data_file().display()));
    Ok(())
}

fn display_value(value: &str) -> &str {
    if value.is_empty() {
        "(default)"
    } else {
        value
    }
}
