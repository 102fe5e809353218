use std::{env, path::PathBuf};

/// Environment variable that overrides the application home directory.
pub const HOME_ENV: &str = "SALES_LEDGER_HOME";

const APP_DIR: &str = "sales_ledger";

/// Application home: `$SALES_LEDGER_HOME`, else the platform data directory,
/// else `./.sales_ledger`.
pub fn resolve_home() -> PathBuf {
    if let Some(home) = env::var_os(HOME_ENV).filter(|value| !value.is_empty()) {
        return PathBuf::from(home);
    }
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(format!(".{APP_DIR}")))
}
