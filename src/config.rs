//! Evaluator limits.
//!
//! Queries can come from untrusted callers (an HTTP filter parameter, for
//! instance), so decoding and evaluation are bounded explicitly instead of
//! relying on the native stack. Limits load from TOML:
//!
//! ```toml
//! max_depth = 32
//! max_path_len = 16
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_MAX_DEPTH: usize = 64;
pub const DEFAULT_MAX_PATH_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvalLimits {
    /// Maximum nesting depth of a query expression
    pub max_depth: usize,
    /// Maximum number of segments in one resolve path
    pub max_path_len: usize,
}

impl Default for EvalLimits {
    fn default() -> Self {
        EvalLimits {
            max_depth: DEFAULT_MAX_DEPTH,
            max_path_len: DEFAULT_MAX_PATH_LEN,
        }
    }
}

impl EvalLimits {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_path_len(mut self, max_path_len: usize) -> Self {
        self.max_path_len = max_path_len;
        self
    }

    /// Parses limits from TOML text. Missing keys keep their defaults.
    ///
    /// ```
    /// use schema_query::EvalLimits;
    ///
    /// let limits = EvalLimits::from_toml_str("max_depth = 8").unwrap();
    /// assert_eq!(limits.max_depth, 8);
    /// assert_eq!(limits.max_path_len, EvalLimits::default().max_path_len);
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let limits: EvalLimits = toml::from_str(text)?;
        limits.validated()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Rejects limits that would refuse every query.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidLimit("max_depth must be at least 1".into()));
        }
        Ok(self)
    }
}
