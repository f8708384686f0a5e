use serde_derive::Deserialize;

use crate::document::Format;
use crate::error::{ErrorCode, Result};

pub const ENV_VERBOSE: &str = "JSONDB_VERBOSE";
pub const ENV_PRETTY: &str = "JSONDB_PRETTY";
pub const ENV_CREATE_DIR: &str = "JSONDB_CREATE_DIR";

/// Options fixed at construction time of a [`crate::Store`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// log successful mutations
    pub verbose: bool,
    /// indent the document when writing it back
    pub pretty: bool,
    /// create the containing directory instead of failing when it is missing
    pub create_dir: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            verbose: true,
            pretty: false,
            create_dir: false,
        }
    }
}

impl StoreConfig {
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn create_dir(mut self, create_dir: bool) -> Self {
        self.create_dir = create_dir;
        self
    }

    pub fn format(&self) -> Format {
        Format::from_pretty(self.pretty)
    }

    /// Defaults overridden by `JSONDB_VERBOSE`, `JSONDB_PRETTY` and
    /// `JSONDB_CREATE_DIR` when they are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| match std::env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(e) => Err(e.into()),
        })
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Result<Option<String>>,
    {
        let mut config = Self::default();
        for (name, field) in [
            (ENV_VERBOSE, &mut config.verbose),
            (ENV_PRETTY, &mut config.pretty),
            (ENV_CREATE_DIR, &mut config.create_dir),
        ] {
            if let Some(raw) = lookup(name)? {
                *field = parse_flag(name, &raw)?;
            }
        }
        Ok(config)
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => {
            let msg = format!("{} expects a boolean, got {:?}", name, other);
            Err(ErrorCode::Config(msg).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> Result<StoreConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        StoreConfig::from_lookup(|name| Ok(vars.get(name).cloned()))
    }

    #[test]
    fn defaults() {
        let config = StoreConfig::default();
        assert!(config.verbose);
        assert!(!config.pretty);
        assert!(!config.create_dir);
        assert_eq!(config.format(), Format::Compact);
    }

    #[test]
    fn unset_vars_keep_defaults() {
        assert_eq!(lookup(&[]).unwrap(), StoreConfig::default());
    }

    #[test]
    fn env_flags_override() {
        let config = lookup(&[
            (ENV_VERBOSE, "off"),
            (ENV_PRETTY, "TRUE"),
            (ENV_CREATE_DIR, " 1 "),
        ])
        .unwrap();
        assert_eq!(
            config,
            StoreConfig::default()
                .verbose(false)
                .pretty(true)
                .create_dir(true)
        );
        assert_eq!(config.format(), Format::Pretty);
    }

    #[test]
    fn bad_flag_is_config_error() {
        let err = lookup(&[(ENV_PRETTY, "sometimes")]).unwrap_err();
        assert!(matches!(*err, ErrorCode::Config(_)));
    }

    #[test]
    fn deserialize_partial() {
        let config: StoreConfig = serde_json::from_str(r#"{"pretty": true}"#).unwrap();
        assert_eq!(config, StoreConfig::default().pretty(true));
    }
}
