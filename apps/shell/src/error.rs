//! # Application Error Type
//!
//! Unified error type for shell commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront Shell                   │
//! │                                                                         │
//! │  Terminal                    Commands                                   │
//! │  ────────                    ────────                                   │
//! │                                                                         │
//! │  > open 42                                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, AppError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Config Error? ──── ConfigError::Parse(...) ───────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Lookup Error? ──── CoreError::ProductNotFound ── AppError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄────────────────────────────────────────────────────────────────────  │
//! │                                                                         │
//! │  error [NOT_FOUND] Product not found: 42                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors carry a machine-readable `code` and a human-readable `message`,
//! and serialize to JSON for anything scripting the shell.

use serde::Serialize;
use storefront_core::CoreError;

use crate::state::ConfigError;

/// Error returned from shell commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product, variant or cart line not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Catalog could not be read or is malformed
    CatalogError,

    /// Configuration could not be loaded
    ConfigError,

    /// Command not valid on the current screen
    NavigationError,

    /// Checkout pressed with an empty cart
    CheckoutDisabled,

    /// Anything else (terminal I/O, runtime)
    Internal,
}

impl ErrorCode {
    /// The wire name, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::CatalogError => "CATALOG_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::NavigationError => "NAVIGATION_ERROR",
            ErrorCode::CheckoutDisabled => "CHECKOUT_DISABLED",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl AppError {
    /// Creates a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a navigation error.
    pub fn navigation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::NavigationError, message)
    }

    /// Creates a catalog error.
    pub fn catalog(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::CatalogError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to application errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => AppError::not_found("Product", &id),
            CoreError::InvalidCatalog(reason) => AppError::catalog(format!("Invalid catalog: {}", reason)),
            CoreError::Json(e) => {
                // Log the decoder detail but keep the message short
                tracing::error!("Catalog JSON error: {}", e);
                AppError::catalog("Catalog is not valid JSON")
            }
            CoreError::Validation(e) => AppError::validation(e.to_string()),
        }
    }
}

/// Converts configuration errors to application errors.
impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

/// Terminal and runtime I/O failures.
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("I/O error: {}", err);
        AppError::internal(err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {}

/// Convenience type alias for command results.
pub type AppResult<T> = Result<T, AppError>;
