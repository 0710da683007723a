//! Settings read from the process environment (a `.env` file is loaded first by
//! each binary).

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveDate;

use crate::domain::errors::DomainError;
use crate::domain::filter::DateWindow;

const DEFAULT_SOURCE_HOST: &str = "localhost";
const DEFAULT_SOURCE_PORT: u16 = 55432;
const DEFAULT_SOURCE_USER: &str = "postgres";
const DEFAULT_SOURCE_PASSWORD: &str = "postgres";
const DEFAULT_SOURCE_DB: &str = "northwind";
const DEFAULT_WAREHOUSE_SCHEMA: &str = "public";
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_CACHE_TTL_SECS: u64 = 600;
const DEFAULT_START_DATE: &str = "1996-11-10";
const DEFAULT_END_DATE: &str = "1997-12-27";

fn from_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T, DomainError>
where
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| DomainError::Config(format!("{name}={raw:?} is invalid: {e}"))),
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String, DomainError> {
    lookup(name)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DomainError::Config(format!("{name} must be set")))
}

fn or_default(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: &str) -> String {
    lookup(name).unwrap_or_else(|| default.to_string())
}

/// Where the operational database lives.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceConfig {
    pub database_url: String,
}

impl SourceConfig {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(from_env)
    }

    /// `SOURCE_DATABASE_URL` wins; otherwise the URL is assembled from its parts.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DomainError> {
        if let Some(url) = lookup("SOURCE_DATABASE_URL").filter(|v| !v.is_empty()) {
            return Ok(Self { database_url: url });
        }
        let host = or_default(&lookup, "SOURCE_HOST", DEFAULT_SOURCE_HOST);
        let port: u16 = parsed(&lookup, "SOURCE_PORT", DEFAULT_SOURCE_PORT)?;
        let user = or_default(&lookup, "SOURCE_USER", DEFAULT_SOURCE_USER);
        let password = or_default(&lookup, "SOURCE_PASSWORD", DEFAULT_SOURCE_PASSWORD);
        let db = or_default(&lookup, "SOURCE_DB", DEFAULT_SOURCE_DB);
        Ok(Self {
            database_url: format!("postgres://{user}:{password}@{host}:{port}/{db}"),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WarehouseConfig {
    pub database_url: String,
    pub schema: String,
}

impl WarehouseConfig {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(from_env)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DomainError> {
        Ok(Self {
            database_url: required(&lookup, "WAREHOUSE_DATABASE_URL")?,
            schema: or_default(&lookup, "WAREHOUSE_SCHEMA", DEFAULT_WAREHOUSE_SCHEMA),
        })
    }
}

/// Directory holding the intermediate CSV files.
pub fn data_dir() -> PathBuf {
    data_dir_from(from_env)
}

pub fn data_dir_from(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    PathBuf::from(or_default(&lookup, "DATA_DIR", DEFAULT_DATA_DIR))
}

/// Default inclusive order-date window for the date filter and verification.
pub fn default_window() -> Result<DateWindow, DomainError> {
    default_window_from(from_env)
}

pub fn default_window_from(lookup: impl Fn(&str) -> Option<String>) -> Result<DateWindow, DomainError> {
    let start = parsed(&lookup, "DEFAULT_START_DATE", date(DEFAULT_START_DATE)?)?;
    let end = parsed(&lookup, "DEFAULT_END_DATE", date(DEFAULT_END_DATE)?)?;
    DateWindow::new(start, end).map_err(|e| DomainError::Config(e.to_string()))
}

fn date(s: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| DomainError::Config(e.to_string()))
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub warehouse: WarehouseConfig,
    pub host: String,
    pub port: u16,
    pub cache_ttl: Duration,
    pub default_window: DateWindow,
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(from_env)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DomainError> {
        Ok(Self {
            warehouse: WarehouseConfig::from_lookup(&lookup)?,
            host: or_default(&lookup, "HOST", "0.0.0.0"),
            port: parsed(&lookup, "PORT", 8080)?,
            cache_ttl: Duration::from_secs(parsed(&lookup, "CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?),
            default_window: default_window_from(&lookup)?,
        })
    }
}
