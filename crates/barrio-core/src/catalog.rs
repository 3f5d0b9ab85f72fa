//! # Catalog
//!
//! The fixed menu. Built once at startup, read by the order screen (grouped
//! by category) and by the table store (lookup by id). Never mutated.

use serde::Serialize;

use crate::error::CoreResult;
use crate::types::{Product, ProductCategory};
use crate::validation;

/// Immutable, ordered set of products.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog after checking ids, names and prices.
    pub fn new(products: Vec<Product>) -> CoreResult<Self> {
        validation::validate_catalog(&products)?;
        Ok(Catalog { products })
    }

    /// The house menu.
    pub fn standard() -> Self {
        use ProductCategory::*;

        let products = vec![
            Product::new("c1", "Espresso", 1800, Cafe),
            Product::new("c2", "Flat White", 2600, Cafe),
            Product::new("c3", "Latte", 2800, Cafe),
            Product::new("c4", "Cappuccino", 2600, Cafe),
            Product::new("c5", "Magic", 2900, Cafe),
            Product::new("p1", "Medialuna", 900, Pastry),
            Product::new("p2", "Alfajor de Nuez", 2200, Pastry),
            Product::new("p3", "Carrot Cake (Porción)", 4500, Pastry),
            Product::new("p4", "Cookie Choco", 2000, Pastry),
            Product::new("l1", "Tostado Jamón y Queso", 5500, Lunch),
            Product::new("l2", "Avocado Toast", 6500, Lunch),
            Product::new("l3", "Sandwich de Bondiola", 8500, Lunch),
            Product::new("b1", "Limonada Menta Jengibre", 3000, Drinks),
            Product::new("b2", "Agua s/gas", 1500, Drinks),
            Product::new("b3", "Coca Cola", 1800, Drinks),
        ];

        Catalog { products }
    }

    /// All products in menu order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products of one category, in menu order.
    pub fn by_category(&self, category: ProductCategory) -> impl Iterator<Item = &Product> {
        self.products
            .iter()
            .filter(move |product| product.category == category)
    }

    pub fn find(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == product_id)
    }

    /// Categories that have at least one product, in fixed enumeration order.
    pub fn categories(&self) -> Vec<ProductCategory> {
        ProductCategory::ALL
            .into_iter()
            .filter(|category| self.by_category(*category).next().is_some())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};

    #[test]
    fn test_standard_menu_is_valid() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.len(), 15);
        assert!(validation::validate_catalog(catalog.products()).is_ok());
    }

    #[test]
    fn test_find() {
        let catalog = Catalog::standard();
        let espresso = catalog.find("c1").unwrap();
        assert_eq!(espresso.name, "Espresso");
        assert_eq!(espresso.price.units(), 1800);
        assert!(catalog.find("zz").is_none());
    }

    #[test]
    fn test_by_category_keeps_menu_order() {
        let catalog = Catalog::standard();
        let lunch: Vec<&str> = catalog
            .by_category(ProductCategory::Lunch)
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(lunch, vec!["l1", "l2", "l3"]);
    }

    #[test]
    fn test_categories() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.categories(), ProductCategory::ALL.to_vec());

        let coffee_only = Catalog::new(vec![Product::new(
            "c1",
            "Espresso",
            1800,
            ProductCategory::Cafe,
        )])
        .unwrap();
        assert_eq!(coffee_only.categories(), vec![ProductCategory::Cafe]);
    }

    #[test]
    fn test_new_rejects_duplicate_ids() {
        let result = Catalog::new(vec![
            Product::new("c1", "Espresso", 1800, ProductCategory::Cafe),
            Product::new("c1", "Doble", 2400, ProductCategory::Cafe),
        ]);
        assert!(matches!(
            result,
            Err(CoreError::Validation(ValidationError::Duplicate { .. }))
        ));
    }
}
