//! Common types and utilities for the Lex provider
//!
//! This crate contains the error taxonomy, the remote API data types and the
//! provider configuration shared by the schema, resources and CLI crates.

pub mod api;
pub mod config;
pub mod constants;

pub use config::{ProviderConfig, ResourceTimeouts, RetryConfig};

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while translating or managing Lex resources
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Expected exactly one {field} block, found {found}")]
    Cardinality { field: String, found: usize },

    #[error("error {operation} {kind} {id}: {source}")]
    Service {
        operation: Operation,
        kind: ResourceKind,
        id: String,
        #[source]
        source: ServiceError,
    },

    #[error("error {operation} {kind} {id}: {source}")]
    Response {
        operation: Operation,
        kind: ResourceKind,
        id: String,
        #[source]
        source: Box<ProviderError>,
    },

    #[error(
        "timeout while {operation} {kind} {id} after {elapsed:?} ({attempts} attempts): {last}"
    )]
    Timeout {
        operation: Operation,
        kind: ResourceKind,
        id: String,
        elapsed: Duration,
        attempts: u32,
        #[source]
        last: ServiceError,
    },

    #[error("invalid Lex Bot Alias resource id {0:?}, expected BOT_NAME.BOT_ALIAS_NAME")]
    Import(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Errors returned by the remote model building service, classified by kind
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("NotFoundException: {0}")]
    NotFound(String),

    #[error("ConflictException: {0}")]
    Conflict(String),

    #[error("{code}: {message}")]
    Other { code: String, message: String },
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ServiceError::Conflict(_))
    }
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Dotted path to the offending field (e.g. `abort_statement.0.message`)
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Every validation failure found in one resource configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Convert into a `Result`, failing when any error was collected
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ProviderError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Resource lifecycle operation, used to annotate errors and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    Import,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Operation::Create => "creating",
            Operation::Read => "getting",
            Operation::Update => "updating",
            Operation::Delete => "deleting",
            Operation::Import => "importing",
        };
        write!(f, "{}", verb)
    }
}

/// The resource kinds managed by this provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Bot,
    BotAlias,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Bot => write!(f, "bot"),
            ResourceKind::BotAlias => write!(f, "bot alias"),
        }
    }
}
