use std::{path::PathBuf, sync::Arc};

use dialoguer::theme::ColorfulTheme;
use sales_config::{Config, ConfigManager};
use sales_core::{Clock, SaleStore};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything a command handler can reach: registry, configuration and the record store.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub home: PathBuf,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub store: Box<dyn SaleStore>,
    pub clock: Arc<dyn Clock>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn status(&self) -> String {
        format!(
            "ShellContext {{ mode: {:?}, running: {}, last_command: {:?} }}",
            self.mode, self.running, self.last_command
        )
    }
}
