//! CLI-specific error types
//!
//! Errors that reach `main` are fatal for the command; inside the session
//! loop they become error responses and the loop continues.

use std::fmt;
use std::io;

use crate::catalog::CatalogError;
use crate::directive::{DirectiveError, DirectiveErrorCode};

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// Catalog file error
    CatalogError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Malformed session request
    BadRequest,
    /// Configuration update rejected by the directive parser
    Directive(DirectiveErrorCode),
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "PLANFIX_CLI_CONFIG_ERROR",
            Self::CatalogError => "PLANFIX_CLI_CATALOG_ERROR",
            Self::IoError => "PLANFIX_CLI_IO_ERROR",
            Self::BadRequest => "PLANFIX_CLI_BAD_REQUEST",
            Self::Directive(code) => code.code(),
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Bad session request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BadRequest, msg)
    }

    /// Get the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<CatalogError> for CliError {
    fn from(e: CatalogError) -> Self {
        Self::new(CliErrorCode::CatalogError, format!("{} ({})", e, e.code()))
    }
}

impl From<DirectiveError> for CliError {
    fn from(e: DirectiveError) -> Self {
        Self::new(
            CliErrorCode::Directive(e.code()),
            format!("{} (clause {}, token '{}')", e.message(), e.clause(), e.token()),
        )
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
