//! # Floor Errors
//!
//! Error types for the floor layer and the shape screens receive on failure.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Barrio Floor                           │
//! │                                                                         │
//! │  Screen action             Rust                                         │
//! │  ─────────────             ────                                         │
//! │                                                                         │
//! │  floor.apply("99", ..)                                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  TableStore::apply ── CoreError::TableNotFound("99") ──┐         │  │
//! │  │                                                        ▼         │  │
//! │  │  FloorState::apply ── FloorError::Core(..) ────────► ApiError ──►│  │
//! │  │                                                                  │  │
//! │  │  FloorConfig::load ── FloorError::TomlParse(..) ───► ApiError ──►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "NOT_FOUND", "message": "Table not found: 99" }              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Engine corrections (no-op, clamped) are not errors; they travel as an
//! `Effect` on the transition.

use barrio_core::{CoreError, ValidationError};
use serde::Serialize;
use thiserror::Error;

use crate::state::Role;

/// Errors from the floor layer.
#[derive(Debug, Error)]
pub enum FloorError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// A config value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The config file exists but could not be read.
    #[error("Failed to read config: {0}")]
    ConfigRead(#[from] std::io::Error),

    /// The config file is not valid TOML for `FloorConfig`.
    #[error("Failed to parse config: {0}")]
    TomlParse(#[from] toml::de::Error),

    // =========================================================================
    // Domain Errors
    // =========================================================================
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The issuing screen may not send this command.
    #[error("The {role} screen may not {command}")]
    NotPermitted { role: Role, command: &'static str },
}

/// Result type for floor operations.
pub type FloorResult<T> = Result<T, FloorError>;

impl From<ValidationError> for FloorError {
    fn from(err: ValidationError) -> Self {
        FloorError::Core(CoreError::Validation(err))
    }
}

/// Error shape handed to a screen.
///
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Table not found: 99"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes screens switch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown table or product
    NotFound,

    /// Input validation failed
    ValidationError,

    /// A table broke one of its own rules
    InvariantViolation,

    /// Config file or override rejected
    InvalidConfig,

    /// Command not allowed for the issuing screen
    Forbidden,

    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::TableNotFound(id) => ApiError::not_found("Table", &id),
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::DuplicateTable(id) => {
                ApiError::validation(format!("Table '{}' already exists", id))
            }
            CoreError::InvariantViolation { table_id, reason } => {
                tracing::error!(%table_id, %reason, "Table invariant violated");
                ApiError::new(
                    ErrorCode::InvariantViolation,
                    format!("Table {} is inconsistent: {}", table_id, reason),
                )
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<FloorError> for ApiError {
    fn from(err: FloorError) -> Self {
        match err {
            FloorError::Core(e) => e.into(),
            FloorError::NotPermitted { role, command } => ApiError::new(
                ErrorCode::Forbidden,
                format!("The {} screen may not {}", role, command),
            ),
            FloorError::InvalidConfig(reason) => ApiError::new(ErrorCode::InvalidConfig, reason),
            FloorError::TomlParse(e) => ApiError::new(ErrorCode::InvalidConfig, e.to_string()),
            FloorError::ConfigRead(e) => {
                // Paths stay in the log, not on screen.
                tracing::error!("Config read failed: {}", e);
                ApiError::internal("Failed to read configuration")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_not_found_maps_to_not_found() {
        let api: ApiError = CoreError::TableNotFound("99".into()).into();
        assert_eq!(api.code, ErrorCode::NotFound);
        assert_eq!(api.message, "Table not found: 99");
    }

    #[test]
    fn test_floor_error_unwraps_core() {
        let err = FloorError::from(CoreError::ProductNotFound("x9".into()));
        let api = ApiError::from(err);
        assert_eq!(api, ApiError::not_found("Product", "x9"));
    }

    #[test]
    fn test_validation_error_converts() {
        let err: FloorError = ValidationError::Required {
            field: "venue.name".into(),
        }
        .into();
        assert!(matches!(
            err,
            FloorError::Core(CoreError::Validation(ValidationError::Required { .. }))
        ));
        assert_eq!(ApiError::from(err).code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_not_permitted_is_forbidden() {
        let err = FloorError::NotPermitted {
            role: Role::Kitchen,
            command: "set_status",
        };
        assert_eq!(err.to_string(), "The kitchen screen may not set_status");

        let api = ApiError::from(err);
        assert_eq!(api.code, ErrorCode::Forbidden);
        assert_eq!(api.message, "The kitchen screen may not set_status");
    }

    #[test]
    fn test_config_errors() {
        let api = ApiError::from(FloorError::InvalidConfig("bad".into()));
        assert_eq!(api.code, ErrorCode::InvalidConfig);

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "/etc/floor.toml");
        let api = ApiError::from(FloorError::from(io));
        assert_eq!(api.code, ErrorCode::Internal);
        assert!(!api.message.contains("/etc"));
    }

    #[test]
    fn test_api_error_serialization() {
        let json = serde_json::to_string(&ApiError::not_found("Table", "99")).unwrap();
        assert_eq!(json, r#"{"code":"NOT_FOUND","message":"Table not found: 99"}"#);
    }
}
