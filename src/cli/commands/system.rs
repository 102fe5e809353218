use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("help", "Show available commands", "help [command]", cmd_help),
        CommandEntry::new(
            "version",
            "Show build and data file information",
            "version",
            cmd_version,
        ),
        CommandEntry::new("exit", "Leave the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first() {
        None => {
            help::print_overview(&context.registry);
            Ok(())
        }
        Some(name) => {
            let needle = name.to_ascii_lowercase();
            match context.command(&needle) {
                Some(entry) => {
                    help::print_command(entry);
                    Ok(())
                }
                None => {
                    context.suggest_command(name);
                    Ok(())
                }
            }
        }
    }
}

fn cmd_version(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let metadata = build_info::current();
    output::section(format!("sales_ledger {}", build_info::CLI_VERSION));
    for (label, value) in metadata.rows() {
        io::print_info(format!("  {label:<10} {value}"));
    }
    io::print_info(format!("  {:<10} {}", "Home", context.home.display()));
    io::print_info(format!("  {:<10} {}", "Data file", context.data_file().display()));
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    io::print_info("Goodbye.");
    Err(CommandError::ExitRequested)
}
