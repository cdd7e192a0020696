//! # Product Registry
//!
//! Owns every [`Product`], keyed by case-insensitive name, in insertion order.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Registry Operations                                  │
//! │                                                                         │
//! │  register([..])  ──► same name exists? ── yes ──► units += candidate    │
//! │                                       └── no ───► push (new entry)      │
//! │                                                                         │
//! │  restock(n, u)   ──► u <= 0 → InvalidArgument, miss → NotFound          │
//! │  adjust_stock_for_sale(n, u)                                            │
//! │                  ──► u <= 0 → InvalidArgument, miss → NotFound          │
//! │                  ──► u > available or available == 0 → InsufficientStock│
//! │                  ──► available -= u   (single &mut step)                │
//! │                                                                         │
//! │  remove / find / find_mut / update / is_empty                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookups are linear scans; the registry is sized for a single shop
//! counter, and iteration order must stay the insertion order.

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{names_match, Product, ProductField};
use crate::validation::validate_product_name;

/// Ordered set of products with at most one entry per case-insensitive name.
#[derive(Debug, Clone, Default)]
pub struct ProductRegistry {
    products: Vec<Product>,
}

impl ProductRegistry {
    pub fn new() -> Self {
        ProductRegistry::default()
    }

    /// Registers candidates, merging units into existing entries by name.
    ///
    /// Returns how many candidates were appended as new entries.
    ///
    /// ```rust
    /// use stockbook_core::{Money, Product, ProductRegistry, TaxRate};
    ///
    /// let make = |name: &str, units| {
    ///     Product::new(name, "", Money::from_cents(100), TaxRate::zero(), "", units, 0).unwrap()
    /// };
    /// let mut registry = ProductRegistry::new();
    /// registry.register(vec![make("Widget", 5), make("WIDGET", 3)]).unwrap();
    ///
    /// assert_eq!(registry.len(), 1);
    /// assert_eq!(registry.find("widget").unwrap().available_units(), 8);
    /// ```
    ///
    /// ## Errors
    /// `InvalidArgument` if a merge would overflow the unit counter. The
    /// candidates before the failing one stay registered.
    pub fn register<I>(&mut self, products: I) -> CoreResult<usize>
    where
        I: IntoIterator<Item = Product>,
    {
        let mut added = 0;

        for candidate in products {
            match self.position(candidate.name()) {
                Some(index) => {
                    let existing = &mut self.products[index];
                    let merged = existing
                        .available_units()
                        .checked_add(candidate.available_units())
                        .ok_or_else(|| CoreError::invalid("units", "stock would overflow"))?;
                    existing.set_available_units(merged);
                }
                None => {
                    self.products.push(candidate);
                    added += 1;
                }
            }
        }

        Ok(added)
    }

    /// Removes the product with this name. Returns whether one was found.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) => {
                self.products.remove(index);
                true
            }
            None => false,
        }
    }

    /// Like [`remove`](Self::remove), returning the removed product or
    /// `NotFound`.
    pub fn take(&mut self, name: &str) -> CoreResult<Product> {
        let index = self.require(name)?;
        Ok(self.products.remove(index))
    }

    pub fn find(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.is_named(name))
    }

    /// Mutable handle to a product; changes are visible in the registry.
    ///
    /// Name and stock cannot be changed through the handle; use
    /// [`update`](Self::update), [`restock`](Self::restock) and
    /// [`adjust_stock_for_sale`](Self::adjust_stock_for_sale).
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.is_named(name))
    }

    /// Adds `units` to an existing product's stock.
    pub fn restock(&mut self, name: &str, units: i64) -> CoreResult<&Product> {
        if units <= 0 {
            return Err(CoreError::invalid("units", "restock quantity must be positive"));
        }

        let index = self.require(name)?;
        let product = &mut self.products[index];
        let restocked = product
            .available_units()
            .checked_add(units)
            .ok_or_else(|| CoreError::invalid("units", "stock would overflow"))?;
        product.set_available_units(restocked);

        Ok(product)
    }

    /// Checks availability and takes `units` out of stock in one step.
    ///
    /// On any error the stock is untouched. On success returns the product
    /// with its decremented stock, ready for pricing the sale.
    pub fn adjust_stock_for_sale(&mut self, name: &str, units: i64) -> CoreResult<&Product> {
        let index = self.sellable_index(name, units)?;
        let product = &mut self.products[index];
        product.set_available_units(product.available_units() - units);
        Ok(product)
    }

    /// Runs every check of [`adjust_stock_for_sale`](Self::adjust_stock_for_sale)
    /// without changing stock.
    pub fn ensure_sellable(&self, name: &str, units: i64) -> CoreResult<&Product> {
        let index = self.sellable_index(name, units)?;
        Ok(&self.products[index])
    }

    /// Overwrites a single field of the named product.
    ///
    /// A rename onto another product's name (case-insensitive) fails with
    /// `Duplicate`; changing only the casing of the product's own name is
    /// allowed.
    pub fn update(&mut self, name: &str, field: ProductField) -> CoreResult<&Product> {
        let index = self.require(name)?;

        if let ProductField::Name(new_name) = &field {
            validate_product_name(new_name)?;
            let new_name = new_name.trim();
            let clash = self
                .products
                .iter()
                .enumerate()
                .any(|(i, p)| i != index && names_match(p.name(), new_name));
            if clash {
                return Err(ValidationError::Duplicate {
                    field: "name".to_string(),
                    value: new_name.to_string(),
                }
                .into());
            }
        }

        let product = &mut self.products[index];
        match field {
            ProductField::Name(new_name) => product.rename(&new_name),
            ProductField::Category(category) => product.set_category(&category),
            ProductField::Code(code) => product.set_code(&code),
            ProductField::Price(price) => product.set_sale_price(price)?,
            ProductField::Vat(vat) => product.set_vat(vat),
            ProductField::MinimumThreshold(threshold) => product.set_minimum_threshold(threshold)?,
        }

        Ok(product)
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Products in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Sum of units on hand across all products.
    /// Units on hand across all products, saturating at `i64::MAX`.
    pub fn total_units(&self) -> i64 {
        self.products
            .iter()
            .map(Product::available_units)
            .fold(0, i64::saturating_add)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.products.iter().position(|p| p.is_named(name))
    }

    fn sellable_index(&self, name: &str, units: i64) -> CoreResult<usize> {
        if units <= 0 {
            return Err(CoreError::invalid("units", "sale quantity must be positive"));
        }

        let index = self.require(name)?;
        let product = &self.products[index];
        let available = product.available_units();

        if available == 0 || units > available {
            return Err(CoreError::InsufficientStock {
                name: product.name().to_string(),
                available,
                requested: units,
            });
        }

        Ok(index)
    }

    fn require(&self, name: &str) -> CoreResult<usize> {
        self.position(name)
            .ok_or_else(|| CoreError::NotFound(name.trim().to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
