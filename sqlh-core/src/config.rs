use crate::{Context, DEFAULT_NUM_ROWS, Error, Paginator, Result};
use std::env::{self, VarError};

/// Environment variable overriding [`Config::num_rows`].
pub const NUM_ROWS_VAR: &str = "SQLH_NUM_ROWS";

/// Settings of the listing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Page size used by `list` and as the limit of pages requested without one.
    pub num_rows: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_rows: DEFAULT_NUM_ROWS,
        }
    }
}

impl Config {
    pub fn new(num_rows: i64) -> Self {
        Self { num_rows }
    }

    /// Default configuration, `SQLH_NUM_ROWS` overrides the page size when set.
    pub fn from_env() -> Result<Self> {
        match env::var(NUM_ROWS_VAR) {
            Ok(v) => Ok(Self::new(parse_num_rows(&v)?)),
            Err(VarError::NotPresent) => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("While reading `{}`", NUM_ROWS_VAR)),
        }
    }

    pub fn paginator(&self, offset: i64, limit: i64) -> Paginator {
        Paginator::new(offset, limit).with_default_limit(self.num_rows)
    }
}

fn parse_num_rows(value: &str) -> Result<i64> {
    let context = || format!("`{}` must be a positive integer, found `{}`", NUM_ROWS_VAR, value);
    let result = value.trim().parse::<i64>().with_context(context)?;
    if result <= 0 {
        return Err(Error::msg(context()));
    }
    Ok(result)
}
