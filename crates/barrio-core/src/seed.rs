//! # Opening Floor Layout
//!
//! The tables the café opens with, including two tables already in service
//! so every screen has something to show on first launch.
//!
//! ```text
//! ┌───────────── SALON ─────────────┐ ┌──── VEREDA ────┐ ┌── BARRA ──┐
//! │ Mesa 1  Mesa 2  Mesa 3*  Mesa 4 │ │ V1  V2$  V3    │ │ B1   B2   │
//! └─────────────────────────────────┘ └────────────────┘ └───────────┘
//!   * OCCUPIED: 2 Latte (ready) + 2 Medialuna (pending), 2 people
//!   $ WAITING_PAYMENT: 1 Espresso (ready), 1 person
//! ```

use chrono::{DateTime, Utc};

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::types::{OrderItem, OrderStatus, Product, Table, TableStatus, Zone};

fn product<'a>(catalog: &'a Catalog, id: &str) -> CoreResult<&'a Product> {
    catalog
        .find(id)
        .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
}

/// Builds the opening layout. In-service orders are stamped with `now`.
///
/// Fails only if `catalog` lacks one of the products the layout pre-orders
/// (c1 Espresso, c3 Latte, p1 Medialuna).
pub fn initial_tables(catalog: &Catalog, now: DateTime<Utc>) -> CoreResult<Vec<Table>> {
    let latte = product(catalog, "c3")?;
    let medialuna = product(catalog, "p1")?;
    let espresso = product(catalog, "c1")?;

    let mesa_3 = Table::in_service(
        "3",
        "Mesa 3",
        Zone::Salon,
        TableStatus::Occupied,
        vec![
            OrderItem::new(latte, now)
                .with_id("o1")
                .with_quantity(2)
                .with_status(OrderStatus::Ready),
            OrderItem::new(medialuna, now).with_id("o2").with_quantity(2),
        ],
        2,
    );

    let vereda_2 = Table::in_service(
        "6",
        "Vereda 2",
        Zone::Vereda,
        TableStatus::WaitingPayment,
        vec![OrderItem::new(espresso, now)
            .with_id("o3")
            .with_status(OrderStatus::Ready)],
        1,
    );

    Ok(vec![
        Table::new("1", "Mesa 1", Zone::Salon),
        Table::new("2", "Mesa 2", Zone::Salon),
        mesa_3,
        Table::new("4", "Mesa 4", Zone::Salon),
        Table::new("5", "Vereda 1", Zone::Vereda),
        vereda_2,
        Table::new("7", "Vereda 3", Zone::Vereda),
        Table::new("8", "Barra 1", Zone::Barra),
        Table::new("9", "Barra 2", Zone::Barra),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_layout;

    #[test]
    fn test_layout_is_valid() {
        let tables = initial_tables(&Catalog::standard(), Utc::now()).unwrap();
        assert_eq!(tables.len(), 9);
        validate_layout(&tables).unwrap();
    }

    #[test]
    fn test_in_service_tables() {
        let tables = initial_tables(&Catalog::standard(), Utc::now()).unwrap();

        let mesa_3 = tables.iter().find(|t| t.id() == "3").unwrap();
        assert_eq!(mesa_3.total().units(), 7400);
        assert_eq!(mesa_3.people_count(), 2);
        assert_eq!(mesa_3.pending_items().count(), 1);

        let vereda_2 = tables.iter().find(|t| t.id() == "6").unwrap();
        assert_eq!(vereda_2.status(), TableStatus::WaitingPayment);
        assert_eq!(vereda_2.total().units(), 1800);
        assert!(!vereda_2.has_pending());
    }

    #[test]
    fn test_missing_product_is_reported() {
        let catalog = Catalog::new(vec![Product::new(
            "c1",
            "Espresso",
            1800,
            crate::types::ProductCategory::Cafe,
        )])
        .unwrap();

        assert!(matches!(
            initial_tables(&catalog, Utc::now()),
            Err(CoreError::ProductNotFound(id)) if id == "c3"
        ));
    }
}
