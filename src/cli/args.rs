//! `--option value` and `--switch` parsing shared by the reporting commands.

use std::collections::{BTreeMap, BTreeSet};

use crate::cli::core::CommandError;

#[derive(Debug, Default)]
pub struct ParsedArgs {
    pub positional: Vec<String>,
    options: BTreeMap<&'static str, String>,
    switches: BTreeSet<&'static str>,
}

impl ParsedArgs {
    /// Splits `args` into positionals, value options and switches.
    ///
    /// `options` and `switches` list the accepted names without their `--` prefix.
    /// Anything else starting with `--` is rejected.
    pub fn parse(
        args: &[&str],
        options: &[&'static str],
        switches: &[&'static str],
    ) -> Result<Self, CommandError> {
        let mut parsed = ParsedArgs::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let Some(flag) = arg.strip_prefix("--") else {
                parsed.positional.push(arg.to_string());
                continue;
            };
            let (name, inline) = match flag.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (flag, None),
            };
            if let Some(known) = switches.iter().copied().find(|s| *s == name) {
                parsed.switches.insert(known);
            } else if let Some(known) = options.iter().copied().find(|o| *o == name) {
                let value = match inline {
                    Some(value) => value.to_string(),
                    None => iter
                        .next()
                        .map(|value| value.to_string())
                        .ok_or_else(|| {
                            CommandError::InvalidArguments(format!("--{name} expects a value"))
                        })?,
                };
                parsed.options.insert(known, value);
            } else {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown option `--{name}`"
                )));
            }
        }
        Ok(parsed)
    }

    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    pub fn switch(&self, name: &str) -> bool {
        self.switches.contains(name)
    }

    /// Parses option `name` with `parse`, or returns `None` when it is absent.
    pub fn parsed_option<T>(
        &self,
        name: &str,
        parse: impl FnOnce(&str) -> Result<T, CommandError>,
    ) -> Result<Option<T>, CommandError> {
        self.option(name).map(parse).transpose()
    }
}
