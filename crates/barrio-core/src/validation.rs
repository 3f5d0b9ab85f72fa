//! # Validation Module
//!
//! Checks applied when a catalog or a floor layout enters the system.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Checks Happen                                │
//! │                                                                         │
//! │  Startup                                                               │
//! │  ├── Catalog::new      → validate_catalog  (ids, names, prices)        │
//! │  └── TableStore::new   → validate_layout   (unique ids, invariants)    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Service (engine operations)                                           │
//! │  └── NO checks: every operation yields a consistent table by           │
//! │      construction, so nothing is re-validated per click               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Product, Table};
use crate::MAX_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a display name (product or table).
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most `MAX_NAME_LEN` characters
///
/// ```rust
/// use barrio_core::validation::validate_name;
///
/// assert!(validate_name("table name", "Vereda 1").is_ok());
/// assert!(validate_name("table name", "  ").is_err());
/// ```
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates an identifier (product or table id).
pub fn validate_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Catalog
// =============================================================================

/// Validates a product list.
///
/// ## Rules
/// - Ids are present and unique
/// - Names are present
/// - Prices are strictly positive
pub fn validate_catalog(products: &[Product]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(products.len());

    for product in products {
        validate_id("product id", &product.id)?;
        validate_name("product name", &product.name)?;

        if !product.price.is_positive() {
            return Err(ValidationError::MustBePositive {
                field: format!("price of {}", product.id),
            });
        }

        if !seen.insert(product.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: product.id.clone(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Tables
// =============================================================================

/// Checks a single table snapshot against the table invariants.
///
/// ## Rules
/// - `total` matches the sum of the order lines
/// - A FREE table has no orders and a zero total
/// - `people_count` is not checked on FREE tables: guests may be seated before
///   ordering, and removing the last line keeps the party. Only
///   `set_status(FREE)` resets it to zero
/// - Order line ids are unique within the table
pub fn check_table(table: &Table) -> CoreResult<()> {
    validate_id("table id", table.id())?;
    validate_name("table name", table.name())?;

    let violation = |reason: String| CoreError::InvariantViolation {
        table_id: table.id().to_string(),
        reason,
    };

    let computed = table.computed_total();
    if table.total() != computed {
        return Err(violation(format!(
            "total {} does not match orders {}",
            table.total(),
            computed
        )));
    }

    if table.is_free() && !table.orders().is_empty() {
        return Err(violation(format!(
            "FREE table carries {} order lines",
            table.orders().len()
        )));
    }

    let mut item_ids = HashSet::with_capacity(table.orders().len());
    for item in table.orders() {
        if !item_ids.insert(item.id()) {
            return Err(violation(format!("order line {} appears twice", item.id())));
        }
    }

    Ok(())
}

/// Checks a whole floor layout: unique table ids plus `check_table` on each.
pub fn validate_layout(tables: &[Table]) -> CoreResult<()> {
    let mut seen = HashSet::with_capacity(tables.len());

    for table in tables {
        if !seen.insert(table.id()) {
            return Err(CoreError::DuplicateTable(table.id().to_string()));
        }
        check_table(table)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OrderItem, ProductCategory, TableStatus, Zone};
    use chrono::Utc;

    fn espresso() -> Product {
        Product::new("c1", "Espresso", 1800, ProductCategory::Cafe)
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Mesa 1").is_ok());
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", &"A".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_catalog_rejects_free_products() {
        let result = validate_catalog(&[Product::new("x", "Gratis", 0, ProductCategory::Cafe)]);
        assert!(matches!(result, Err(ValidationError::MustBePositive { .. })));
    }

    #[test]
    fn test_validate_catalog_rejects_blank_id() {
        let result = validate_catalog(&[Product::new(" ", "Espresso", 1800, ProductCategory::Cafe)]);
        assert!(matches!(result, Err(ValidationError::Required { .. })));
    }

    #[test]
    fn test_check_table_rejects_free_with_orders() {
        let table = Table::in_service(
            "1",
            "Mesa 1",
            Zone::Salon,
            TableStatus::Free,
            vec![OrderItem::new(&espresso(), Utc::now())],
            0,
        );
        assert!(matches!(
            check_table(&table),
            Err(CoreError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_check_table_accepts_free_table_with_seated_party() {
        let table = Table::in_service("2", "Mesa 2", Zone::Salon, TableStatus::Free, vec![], 2);
        assert!(check_table(&table).is_ok());
    }

    #[test]
    fn test_check_table_rejects_tampered_total() {
        let mut table = Table::in_service(
            "3",
            "Mesa 3",
            Zone::Salon,
            TableStatus::Occupied,
            vec![OrderItem::new(&espresso(), Utc::now())],
            1,
        );
        table.total = crate::Money::from_units(1);
        assert!(check_table(&table).is_err());
    }

    #[test]
    fn test_check_table_rejects_duplicate_lines() {
        let now = Utc::now();
        let table = Table::in_service(
            "3",
            "Mesa 3",
            Zone::Salon,
            TableStatus::Occupied,
            vec![
                OrderItem::new(&espresso(), now).with_id("o1"),
                OrderItem::new(&espresso(), now).with_id("o1"),
            ],
            1,
        );
        assert!(check_table(&table).is_err());
    }

    #[test]
    fn test_validate_layout_rejects_duplicate_ids() {
        let tables = vec![
            Table::new("1", "Mesa 1", Zone::Salon),
            Table::new("1", "Barra 1", Zone::Barra),
        ];
        assert!(matches!(
            validate_layout(&tables),
            Err(CoreError::DuplicateTable(id)) if id == "1"
        ));
    }
}
