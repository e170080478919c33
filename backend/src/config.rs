//! Environment-driven server configuration.
//!
//! Every setting has a working default so the binary runs with no setup;
//! invalid values fall back to the default with a logged warning instead of
//! aborting. Nothing here is hard-coded into the source beyond the defaults.

use log::warn;
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

pub struct Config {
    pub host: String,
    pub port: u16,
    /// Path of the SQLite file backing the popup table.
    pub database_path: PathBuf,
    /// Directory where saved `{image, buttons}` assets are written.
    pub data_dir: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self {
            host: load_or("POPUP_ADMIN_HOST", "127.0.0.1"),
            port: load_or("POPUP_ADMIN_PORT", "8080"),
            database_path: PathBuf::from(load_or::<String>("POPUP_ADMIN_DB", "popups.sqlite")),
            data_dir: PathBuf::from(load_or::<String>("POPUP_ADMIN_DATA_DIR", "data")),
        }
    }
}

/// Reads `key` from the environment, parsing into `T`; an unset or invalid
/// value yields the (always parseable) default.
fn load_or<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    parse_or(key, env::var(key).ok(), default)
}

/// Parsing half of `load_or`, separated from the environment lookup so tests
/// can feed raw values without mutating process state.
fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: &str) -> T
where
    T::Err: Display,
{
    let raw = raw.unwrap_or_else(|| default.to_string());
    match raw.parse() {
        Ok(value) => value,
        Err(e) => {
            warn!("Invalid {} value {:?}: {}. Using default {:?}", key, raw, e, default);
            default.parse().unwrap_or_else(|_| unreachable!("default for {} must parse", key))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let port: u16 = parse_or("POPUP_ADMIN_PORT", None, "8080");
        assert_eq!(port, 8080);
    }

    #[test]
    fn invalid_value_falls_back_to_default() {
        let port: u16 = parse_or("POPUP_ADMIN_PORT", Some("not-a-port".to_string()), "9090");
        assert_eq!(port, 9090);
    }

    #[test]
    fn valid_value_overrides_the_default() {
        let port: u16 = parse_or("POPUP_ADMIN_PORT", Some("9191".to_string()), "8080");
        assert_eq!(port, 9191);
    }
}
