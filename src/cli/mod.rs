//! CLI support for schema-query
//!
//! Provides programmatic access to sq CLI functionality for embedding
//! in other tools.

mod check;
mod docs;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Query error: {0}")]
    Query(#[from] crate::QueryError),

    #[error("Schema error: {0}")]
    Schema(#[from] crate::SchemaError),

    #[error("Config error: {0}")]
    Config(#[from] crate::ConfigError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,

    #[error("No schema provided. Use --schema unless --syntax-only is given.")]
    MissingSchema,

    #[error("Unknown category: '{0}'\nRun 'sq docs' to see available categories.")]
    UnknownCategory(String),
}
