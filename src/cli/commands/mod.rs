pub mod config;
pub mod report;
pub mod sale;
pub mod system;

use crate::cli::registry::{CommandEntry, CommandRegistry};

/// Order in which commands appear in `help` and completion.
const ROOT_COMMAND_ORDER: &[&str] = &[
    "add", "list", "show", "edit", "delete", "report", "trend", "top", "daily", "products",
    "stats", "config", "help", "version", "exit",
];

pub fn register_all(registry: &mut CommandRegistry) {
    let mut entries: Vec<CommandEntry> = Vec::new();
    entries.extend(sale::definitions());
    entries.extend(report::definitions());
    entries.extend(config::definitions());
    entries.extend(system::definitions());

    entries.sort_by_key(|entry| {
        ROOT_COMMAND_ORDER
            .iter()
            .position(|name| *name == entry.name)
            .unwrap_or(usize::MAX)
    });
    for entry in entries {
        registry.register(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_ordered_command_is_registered() {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, ROOT_COMMAND_ORDER);
    }
}
