//! Common types and utilities for provider-codegen
//!
//! This crate contains shared error types and the provider listing types
//! used across the normalizer, generator, and CLI components.

mod output;

pub use output::write_atomic;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Import path prefix of the upstream DNS provider packages
pub const LEGO_DNS_IMPORT_PREFIX: &str = "github.com/go-acme/lego/v4/providers/dns/";

/// Errors that can occur during schema normalization or code generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unexpected document shape, with the JSON pointer of the offending node
    #[error("Schema error at {path}: {message}")]
    Schema { path: String, message: String },

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GeneratorError {
    /// Build a schema error for the node at `path`
    pub fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        GeneratorError::Schema {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Kind of an entry in a repository directory listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Dir,
    File,
    Symlink,
    Submodule,
    #[serde(other)]
    Other,
}

/// One entry of a repository contents listing
///
/// Unknown fields of the listing (sha, size, urls, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

/// A DNS provider package selected for generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEntry {
    /// Package name, also used as the provider key (e.g., "cloudflare")
    pub name: String,
    /// Full Go import path of the package
    pub import_path: String,
}

impl ProviderEntry {
    /// Create an entry for an upstream lego DNS provider package
    pub fn lego(name: &str) -> Self {
        Self {
            name: name.to_string(),
            import_path: format!("{}{}", LEGO_DNS_IMPORT_PREFIX, name),
        }
    }
}
