//! Runtime configuration.

use std::env;

/// Default description for options and commands declared without one.
pub const DEFAULT_DESCRIPTION: &str = "No description provided";

/// Knobs that change how commands are declared and synchronized.
///
/// Construct with struct-update syntax over [`Config::default`], or read it
/// from the environment with [`Config::from_env`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Whether `instantiate` overwrites remote commands that already exist.
    ///
    /// When off, a matching remote command is left untouched.
    pub update_commands: bool,
    /// Description used when a command or option doesn't declare one.
    pub default_description: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            update_commands: true,
            default_description: DEFAULT_DESCRIPTION.to_owned(),
        }
    }
}

impl Config {
    /// Read `DISCORD_UPDATE_COMMANDS` and `DISCORD_DEFAULT_DESCRIPTION`,
    /// falling back to the defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let update_commands = lookup("DISCORD_UPDATE_COMMANDS")
            .and_then(|value| parse_flag(&value))
            .unwrap_or(defaults.update_commands);
        let default_description = lookup("DISCORD_DEFAULT_DESCRIPTION")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.default_description);

        Self {
            update_commands,
            default_description,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, DEFAULT_DESCRIPTION};
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_update_and_use_the_placeholder_description() {
        let config = Config::default();
        assert!(config.update_commands);
        assert_eq!(config.default_description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("DISCORD_UPDATE_COMMANDS", "off"),
            ("DISCORD_DEFAULT_DESCRIPTION", "tbd"),
        ]));
        assert!(!config.update_commands);
        assert_eq!(config.default_description, "tbd");
    }

    #[test]
    fn ignores_garbage() {
        let config = Config::from_lookup(lookup(&[
            ("DISCORD_UPDATE_COMMANDS", "maybe"),
            ("DISCORD_DEFAULT_DESCRIPTION", "   "),
        ]));
        assert_eq!(config, Config::default());
    }
}
