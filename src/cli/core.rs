//! Shell context construction, dispatch and shared argument parsing.

use std::{io, path::Path, path::PathBuf, sync::Arc};

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use sales_config::{resolve_home, Config, ConfigError, ConfigManager};
use sales_core::{Clock, CoreError, SaleStore, SystemClock};
use sales_domain::{Granularity, RankMetric, SaleId};
use sales_storage_json::JsonSaleStore;

pub use crate::errors::CliError;
use crate::errors::SalesError;

use super::commands;
use super::formatters::CliFormatters;
use super::io as cli_io;
use super::output::{self, OutputPreferences};
use super::registry::{CommandEntry, CommandRegistry};
pub use super::shell_context::{CliMode, ShellContext};

const PROMPT: &str = "sales> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_home(mode, resolve_home(), Arc::new(SystemClock))
    }

    /// Builds a context rooted at `home`, loading its config and opening its data file.
    pub fn with_home(mode: CliMode, home: PathBuf, clock: Arc<dyn Clock>) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = ConfigManager::with_base_dir(&home)?;
        let config = config_manager.load()?;
        let store = open_store(&config, &home, Arc::clone(&clock))?;

        let context = ShellContext {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            home,
            config_manager,
            config,
            store,
            clock,
            last_command: None,
            running: true,
        };
        context.apply_output_preferences();
        tracing::debug!(
            home = %context.home.display(),
            data_file = %context.data_file().display(),
            ?mode,
            "shell context ready"
        );
        Ok(context)
    }

    pub(crate) fn store(&self) -> &dyn SaleStore {
        self.store.as_ref()
    }

    pub(crate) fn formatters(&self) -> CliFormatters {
        CliFormatters::from_config(&self.config)
    }

    pub(crate) fn data_file(&self) -> PathBuf {
        self.config.resolve_data_file(&self.home)
    }

    pub(crate) fn is_interactive(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub(crate) fn theme(&self) -> &ColorfulTheme {
        &self.theme
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn prompt(&self) -> String {
        PROMPT.to_string()
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    /// Persists one configuration change and applies it to the running shell.
    pub(crate) fn update_config(&mut self, key: &str, value: &str) -> Result<&Config, CommandError> {
        let updated = self.config_manager.update(key, value)?;
        let reopen = updated.data_file != self.config.data_file;
        self.config = updated;
        if reopen {
            self.store = open_store(&self.config, &self.home, Arc::clone(&self.clock))?;
            tracing::info!(data_file = %self.data_file().display(), "data file switched");
        }
        self.apply_output_preferences();
        Ok(&self.config)
    }

    fn apply_output_preferences(&self) {
        output::set_preferences(OutputPreferences {
            color_enabled: self.config.ui_color_enabled && self.is_interactive(),
        });
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            tracing::debug!(command, args = args.len(), "dispatching command");
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.registry.closest(input) {
            cli_io::print_info(format!("Suggestion: `{}`?", best));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(self.confirm("Exit shell?", true)?)
    }

    /// Asks a yes/no question in interactive mode; scripts always proceed.
    pub(crate) fn confirm(&self, prompt: &str, default: bool) -> Result<bool, CommandError> {
        if !self.is_interactive() {
            return Ok(true);
        }
        cli_io::confirm_action(self.theme(), prompt, default)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(SalesError::StorageError(message)) => {
                cli_io::print_error(format!("Storage error: {message}"));
                cli_io::print_hint(format!("Data file: {}", self.data_file().display()));
                Ok(())
            }
            other => {
                cli_io::print_error(other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }
}

fn open_store(
    config: &Config,
    home: &Path,
    clock: Arc<dyn Clock>,
) -> Result<Box<dyn SaleStore>, CliError> {
    let store = JsonSaleStore::new(config.resolve_data_file(home), clock)?;
    Ok(Box::new(store))
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("invalid date `{}` (use YYYY-MM-DD)", input))
    })
}

/// Accepts `12` or `#12`.
pub(crate) fn parse_id(input: &str) -> Result<SaleId, CommandError> {
    let trimmed = input.trim();
    trimmed
        .strip_prefix('#')
        .unwrap_or(trimmed)
        .parse::<SaleId>()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid sale id `{}`", input)))
}

pub(crate) fn parse_amount(label: &str, input: &str) -> Result<f64, CommandError> {
    input
        .trim()
        .replace(',', "")
        .parse::<f64>()
        .map_err(|_| CommandError::InvalidArguments(format!("{label} must be a number, got `{input}`")))
}

pub(crate) fn parse_quantity(input: &str) -> Result<i64, CommandError> {
    input.trim().parse::<i64>().map_err(|_| {
        CommandError::InvalidArguments(format!("quantity must be a whole number, got `{input}`"))
    })
}

pub(crate) fn parse_count(label: &str, input: &str) -> Result<usize, CommandError> {
    input.trim().parse::<usize>().map_err(|_| {
        CommandError::InvalidArguments(format!("{label} must be a non-negative whole number"))
    })
}

pub(crate) fn parse_granularity(input: &str) -> Result<Granularity, CommandError> {
    input
        .parse::<Granularity>()
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))
}

pub(crate) fn parse_metric(input: &str) -> Result<RankMetric, CommandError> {
    input
        .parse::<RankMetric>()
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Core(#[from] SalesError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CoreError> for CommandError {
    fn from(err: CoreError) -> Self {
        CommandError::Core(SalesError::from(err))
    }
}

impl From<ConfigError> for CommandError {
    fn from(err: ConfigError) -> Self {
        CommandError::Core(SalesError::from(err))
    }
}

impl From<CliError> for CommandError {
    fn from(err: CliError) -> Self {
        match err {
            CliError::Core(inner) => CommandError::Core(inner),
            CliError::Input(message) | CliError::Command(message) => {
                CommandError::InvalidArguments(message)
            }
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(inner) => CliError::Core(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}

#[cfg(test)]
pub(crate) fn process_script(home: &Path, lines: &[&str]) -> Result<ShellContext, CliError> {
    use chrono::{TimeZone, Utc};
    use sales_core::FixedClock;

    let clock = Arc::new(FixedClock(
        Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0)
            .single()
            .ok_or_else(|| CliError::Input("bad test clock".into()))?,
    ));
    let mut app = ShellContext::with_home(CliMode::Script, home.to_path_buf(), clock)?;
    for line in lines {
        match app.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => app.report_error(err)?,
        }
    }
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parses_ids_with_hash_prefix() {
        assert_eq!(parse_id("#12").unwrap(), 12);
        assert_eq!(parse_id(" 7 ").unwrap(), 7);
        assert!(parse_id("abc").is_err());
    }

    #[test]
    fn amounts_accept_grouping_commas() {
        assert_eq!(parse_amount("sales", "1,250.50").unwrap(), 1250.5);
        assert!(parse_amount("sales", "ten").is_err());
    }

    #[test]
    fn script_adds_and_deletes_sales() {
        let home = tempdir().expect("tempdir");
        let app = process_script(
            home.path(),
            &[
                "add 2024-01-01 Widget Acme 2 100 20",
                "add 2024-01-02 Widget Globex 3 200 50",
                "delete 1",
            ],
        )
        .expect("script");

        let records = app.store().fetch_all().expect("fetch");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 2);
        assert!(app.data_file().exists());
    }

    #[test]
    fn rejected_add_is_not_stored() {
        let home = tempdir().expect("tempdir");
        let app = process_script(home.path(), &["add 2024-01-01 Widget Acme 1 50 60"])
            .expect("script");
        assert!(app.store().fetch_all().expect("fetch").is_empty());
    }

    #[test]
    fn bad_arguments_surface_as_invalid_arguments() {
        let home = tempdir().expect("tempdir");
        let mut app = process_script(home.path(), &[]).expect("script");
        let err = app.process_line("show nope").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
        let err = app.process_line("show 99").unwrap_err();
        assert!(matches!(err, CommandError::Core(SalesError::SaleNotFound(99))));
    }

    #[test]
    fn config_set_switches_data_file() {
        let home = tempdir().expect("tempdir");
        let custom = home.path().join("elsewhere").join("book.json");
        let script = format!("config set data_file {}", custom.display());
        let app = process_script(
            home.path(),
            &[script.as_str(), "add 2024-02-01 Gadget Acme 1 150 0"],
        )
        .expect("script");
        assert_eq!(app.data_file(), custom);
        assert!(custom.exists());
    }

    #[test]
    fn one_sided_range_outside_the_data_is_an_empty_result() {
        let home = tempdir().expect("tempdir");
        let mut app = process_script(
            home.path(),
            &[
                "add 2024-01-01 Widget Acme 2 100 20",
                "add 2024-02-01 Gadget Acme 1 150 0",
            ],
        )
        .expect("script");

        for line in [
            "report --from 2025-01-01",
            "report --to 2023-06-01",
            "trend --from 2025-01-01",
            "top products --to 2023-06-01",
            "daily --from 2025-01-01",
            "list --from 2025-01-01",
        ] {
            let result = app.process_line(line);
            assert!(
                matches!(result, Ok(LoopControl::Continue)),
                "{line} => {result:?}"
            );
        }
        let err = app.process_line("report --from 2024-02-01 --to 2024-01-01").unwrap_err();
        assert!(matches!(err, CommandError::Core(SalesError::InvalidInput(_))));
    }

    #[test]
    fn exit_stops_processing() {
        let home = tempdir().expect("tempdir");
        let app = process_script(
            home.path(),
            &["exit", "add 2024-01-01 Widget Acme 2 100 20"],
        )
        .expect("script");
        assert!(app.store().fetch_all().expect("fetch").is_empty());
    }
}
