use crate::catalog::CatalogSource;
use crate::store::{CopyMode, HistoryOrder, LikeMode, Policy, DEFAULT_COPY_REWARD};
use std::{env, str::FromStr, time::Duration};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CATALOG_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub catalog: CatalogSource,
    pub catalog_timeout: Duration,
    pub policy: Policy,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: expected {expected}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = parse_number(get("PORT"), "PORT", DEFAULT_PORT)?;
        let catalog = get("HELPLINE_CATALOG")
            .map(|value| CatalogSource::parse(&value))
            .unwrap_or(CatalogSource::Embedded);
        let catalog_timeout = Duration::from_secs(parse_number(
            get("HELPLINE_CATALOG_TIMEOUT_SECS"),
            "HELPLINE_CATALOG_TIMEOUT_SECS",
            DEFAULT_CATALOG_TIMEOUT_SECS,
        )?);

        let defaults = Policy::default();
        let like_mode = match get("HELPLINE_LIKE_MODE").as_deref().map(str::trim) {
            None | Some("toggle") => LikeMode::Toggle,
            Some("count") => LikeMode::CountEvery,
            Some(other) => return Err(invalid("HELPLINE_LIKE_MODE", other, "toggle or count")),
        };
        let copy_mode = match get("HELPLINE_COPY_MODE").as_deref().map(str::trim) {
            None | Some("counted") => CopyMode::Counted,
            Some("gated") => CopyMode::Gated {
                reward: parse_number(get("HELPLINE_COPY_REWARD"), "HELPLINE_COPY_REWARD", DEFAULT_COPY_REWARD)?,
            },
            Some(other) => return Err(invalid("HELPLINE_COPY_MODE", other, "counted or gated")),
        };
        let history_order = match get("HELPLINE_HISTORY_ORDER").as_deref().map(str::trim) {
            None | Some("newest-first") => HistoryOrder::NewestFirst,
            Some("oldest-first") => HistoryOrder::OldestFirst,
            Some(other) => {
                return Err(invalid("HELPLINE_HISTORY_ORDER", other, "newest-first or oldest-first"));
            }
        };

        let policy = Policy {
            like_mode,
            copy_mode,
            history_order,
            initial_coins: parse_number(get("HELPLINE_INITIAL_COINS"), "HELPLINE_INITIAL_COINS", defaults.initial_coins)?,
            call_cost: parse_number(get("HELPLINE_CALL_COST"), "HELPLINE_CALL_COST", defaults.call_cost)?,
            initial_copy_credits: parse_number(
                get("HELPLINE_COPY_CREDITS"),
                "HELPLINE_COPY_CREDITS",
                defaults.initial_copy_credits,
            )?,
        };

        Ok(Self {
            port,
            catalog,
            catalog_timeout,
            policy,
        })
    }
}

fn parse_number<T: FromStr>(value: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| invalid(key, &value, "a non-negative integer")),
    }
}

fn invalid(key: &'static str, value: &str, expected: &'static str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        expected,
    }
}
