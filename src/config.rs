use anyhow::{Context, Result};
use std::path::PathBuf;

/// Default per-value quota, matching what browser storage allowed the
/// first builds.
pub const DEFAULT_MAX_VALUE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `None` when no data directory could be determined; the session then
    /// runs without storage.
    pub db_path: Option<PathBuf>,
    /// Zero disables the quota.
    pub max_value_bytes: usize,
}

impl Config {
    /// Resolve the configuration, consuming `--db <path>` from `args`.
    ///
    /// Precedence for the database path: `--db`, then `BUDGETKEEP_DB`, then
    /// the platform data directory.
    pub fn resolve(args: &mut Vec<String>) -> Result<Self> {
        let flag = take_flag(args, "--db")?;
        let env_path = std::env::var_os("BUDGETKEEP_DB").map(PathBuf::from);
        let db_path = flag.map(PathBuf::from).or(env_path).or_else(default_db_path);

        let max_value_bytes = match std::env::var("BUDGETKEEP_MAX_VALUE_BYTES") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid BUDGETKEEP_MAX_VALUE_BYTES: {raw}"))?,
            Err(_) => DEFAULT_MAX_VALUE_BYTES,
        };

        Ok(Self {
            db_path,
            max_value_bytes,
        })
    }
}

/// Remove `name <value>` from `args` and return the value.
pub fn take_flag(args: &mut Vec<String>, name: &str) -> Result<Option<String>> {
    let Some(pos) = args.iter().position(|a| a == name) else {
        return Ok(None);
    };
    if pos + 1 >= args.len() {
        anyhow::bail!("{name} requires a value");
    }
    let value = args.remove(pos + 1);
    args.remove(pos);
    Ok(Some(value))
}

/// Remove a bare `name` switch from `args`, reporting whether it was there.
pub fn take_switch(args: &mut Vec<String>, name: &str) -> bool {
    match args.iter().position(|a| a == name) {
        Some(pos) => {
            args.remove(pos);
            true
        }
        None => false,
    }
}

fn default_db_path() -> Option<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "budgetkeep", "budgetkeep")?;
    Some(proj_dirs.data_dir().join("budgetkeep.db"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
