//! Environment-backed configuration resolution.
//!
//! Every setting can come from a CLI flag or an environment variable, flag
//! winning. A `.env` file in the working directory is honoured once at
//! startup.

use std::{env, path::PathBuf};

use crate::error::EtlError;

pub const DEFAULT_TABLE_NAME: &str = "retail_transactions";
pub const DEFAULT_SQL_DIR: &str = "sql";

pub fn load_dotenv() {
    let _ = dotenv::dotenv();
}

fn env_value(var: &str) -> Option<String> {
    env::var(var).ok().filter(|value| !value.trim().is_empty())
}

/// Resolves a required setting, failing with a `Config` error naming the
/// variable when neither the flag nor the environment provides it.
pub fn required(flag: Option<String>, var: &str) -> Result<String, EtlError> {
    flag.filter(|value| !value.trim().is_empty())
        .or_else(|| env_value(var))
        .ok_or_else(|| EtlError::Config(var.to_string()))
}

pub fn required_path(flag: Option<PathBuf>, var: &str) -> Result<PathBuf, EtlError> {
    match flag {
        Some(path) => Ok(path),
        None => required(None, var).map(PathBuf::from),
    }
}

pub fn optional(flag: Option<String>, var: &str, default: &str) -> String {
    flag.filter(|value| !value.trim().is_empty())
        .or_else(|| env_value(var))
        .unwrap_or_else(|| default.to_string())
}

pub fn optional_path(flag: Option<PathBuf>, var: &str, default: &str) -> PathBuf {
    match flag {
        Some(path) => path,
        None => PathBuf::from(optional(None, var, default)),
    }
}
