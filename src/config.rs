//! Runtime configuration resolved from environment variables. Every value
//! has a default; a value that is present but malformed is an error rather
//! than being silently replaced.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;

use crate::catalog::SortKey;
use crate::rating::{DEFAULT_STAR_COUNT, MAX_STAR_COUNT};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".my-places";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "places.sqlite";
/// Log file written next to the database while the TUI owns the terminal.
const LOG_FILE_NAME: &str = "my-places.log";

pub const HOME_VAR: &str = "MY_PLACES_HOME";
pub const DB_VAR: &str = "MY_PLACES_DB";
pub const STARS_VAR: &str = "MY_PLACES_STARS";
pub const SORT_VAR: &str = "MY_PLACES_SORT";
pub const ORDER_VAR: &str = "MY_PLACES_ORDER";
pub const SEED_VAR: &str = "MY_PLACES_SEED";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub log_path: PathBuf,
    /// Stars offered by the rating control.
    pub star_count: u32,
    /// Initial catalog ordering.
    pub sort_key: SortKey,
    pub ascending: bool,
    /// Seed the demo restaurants into an empty database.
    pub seed_demo: bool,
}

impl Config {
    /// Resolve the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match non_empty(lookup(HOME_VAR)) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };
        let db_path = non_empty(lookup(DB_VAR))
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(DB_FILE_NAME));
        let log_path = data_dir.join(LOG_FILE_NAME);

        let star_count = match non_empty(lookup(STARS_VAR)) {
            Some(raw) => parse_star_count(&raw)?,
            None => DEFAULT_STAR_COUNT,
        };
        let sort_key = match non_empty(lookup(SORT_VAR)) {
            Some(raw) => raw
                .parse::<SortKey>()
                .with_context(|| format!("invalid {SORT_VAR}"))?,
            None => SortKey::default(),
        };
        let ascending = match non_empty(lookup(ORDER_VAR)) {
            Some(raw) => parse_order(&raw)?,
            None => true,
        };
        let seed_demo = match non_empty(lookup(SEED_VAR)) {
            Some(raw) => parse_flag(SEED_VAR, &raw)?,
            None => true,
        };

        Ok(Self {
            data_dir,
            db_path,
            log_path,
            star_count,
            sort_key,
            ascending,
            seed_demo,
        })
    }
}

/// Resolve `~/.my-places`.
fn default_data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

fn parse_star_count(raw: &str) -> Result<u32> {
    let count = raw
        .parse::<u32>()
        .with_context(|| format!("{STARS_VAR} must be a positive integer, got '{raw}'"))?;
    if count == 0 {
        return Err(anyhow!("{STARS_VAR} must be at least 1"));
    }
    if count > MAX_STAR_COUNT {
        return Err(anyhow!("{STARS_VAR} must be at most {MAX_STAR_COUNT}, got {count}"));
    }
    Ok(count)
}

fn parse_order(raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "asc" | "ascending" => Ok(true),
        "desc" | "descending" => Ok(false),
        _ => Err(anyhow!("{ORDER_VAR} must be 'asc' or 'desc', got '{raw}'")),
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow!("{name} must be a boolean, got '{raw}'")),
    }
}
