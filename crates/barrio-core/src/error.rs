//! # Error Types
//!
//! Domain-specific error types for barrio-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  barrio-core errors (this file)                                        │
//! │  ├── CoreError        - Lookup and layout errors                       │
//! │  └── ValidationError  - Catalog / layout input failures                │
//! │                                                                         │
//! │  barrio-floor errors (separate crate)                                  │
//! │  ├── FloorError       - Config + core failures                         │
//! │  └── ApiError         - What the screens see (serialized)              │
//! │                                                                         │
//! │  NOTE: the table engine itself never fails. Removing a missing item,   │
//! │  re-marking a ready item or shrinking a party below zero are           │
//! │  corrections (see `engine::Effect`), not errors.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised when addressing tables or products by id, or when building
/// a store from a layout that breaks the table invariants.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No table with this id in the store.
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// No product with this id in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Two tables in a layout share an id.
    #[error("Duplicate table id: {0}")]
    DuplicateTable(String),

    /// A table snapshot violates a table invariant.
    ///
    /// ## When This Occurs
    /// - A seeded or restored table whose `total` does not match its orders
    /// - A FREE table that still carries orders
    #[error("Table {table_id} is inconsistent: {reason}")]
    InvariantViolation { table_id: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for catalog entries and table layouts.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Duplicate value (e.g., duplicate product id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
