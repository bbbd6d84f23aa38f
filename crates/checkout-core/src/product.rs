//! # Product Types
//!
//! Product and price shapes returned by the listing endpoint, plus the
//! built-in demo catalog served when no provider credential is configured.

use serde::{Deserialize, Serialize};

/// Price id of the single-item, non-recurring demo product.
///
/// Mock checkouts for this price always resolve to the success URL.
pub const DEMO_EBOOK_PRICE_ID: &str = "price_tutorial_ebook";

/// Convert a provider amount in minor units (cents) to major units (dollars)
pub fn minor_to_major(amount: i64) -> f64 {
    amount as f64 / 100.0
}

/// A purchasable price of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// Provider price id (e.g. "price_1Nx...")
    pub id: String,

    /// ISO 4217 code, lowercase
    pub currency: String,

    /// Amount in major currency units
    pub unit_amount: f64,

    /// Whether this price bills on a schedule
    pub recurring: bool,
}

impl Price {
    /// Create a one-time price
    pub fn one_time(id: impl Into<String>, currency: impl Into<String>, unit_amount: f64) -> Self {
        Self {
            id: id.into(),
            currency: currency.into(),
            unit_amount,
            recurring: false,
        }
    }

    /// Create a recurring price
    pub fn recurring(id: impl Into<String>, currency: impl Into<String>, unit_amount: f64) -> Self {
        Self {
            recurring: true,
            ..Self::one_time(id, currency, unit_amount)
        }
    }

    /// Build from a provider amount expressed in minor units
    pub fn from_minor_units(
        id: impl Into<String>,
        currency: impl Into<String>,
        amount: i64,
        recurring: bool,
    ) -> Self {
        Self {
            id: id.into(),
            currency: currency.into().to_lowercase(),
            unit_amount: minor_to_major(amount),
            recurring,
        }
    }
}

/// A product in a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Provider product id
    pub id: String,

    /// Display name
    pub name: String,

    /// Short description
    pub description: String,

    /// Optional image URL
    pub image: Option<String>,

    /// Active prices, in provider order
    pub prices: Vec<Price>,
}

impl Product {
    /// Create a product with no image and no prices
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            image: None,
            prices: Vec::new(),
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Builder: set image URL
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    /// Builder: append a price
    pub fn with_price(mut self, price: Price) -> Self {
        self.prices.push(price);
        self
    }

    /// Products without a price cannot be bought and are never listed
    pub fn is_purchasable(&self) -> bool {
        !self.prices.is_empty()
    }
}

/// Ordered product listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductCatalog {
    pub products: Vec<Product>,
}

impl ProductCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Add a product, dropping it if it has no prices
    pub fn add(&mut self, product: Product) {
        if product.is_purchasable() {
            self.products.push(product);
        }
    }

    /// Find a product by ID
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Number of listed products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Consume into the product list
    pub fn into_products(self) -> Vec<Product> {
        self.products
    }

    /// Fixed catalog used in mock mode: two subscription plans and an e-book.
    pub fn demo() -> Self {
        let mut catalog = Self::new();

        catalog.add(
            Product::new("prod_tutorial_basic", "Basic Plan")
                .with_description("Entry-level plan with essential features")
                .with_image("https://images.unsplash.com/photo-1579621970563-ebec7560ff3e?w=500&auto=format&fit=crop&q=60&ixlib=rb-4.0.3")
                .with_price(Price::recurring("price_tutorial_basic_monthly", "usd", 9.99))
                .with_price(Price::recurring("price_tutorial_basic_yearly", "usd", 99.99)),
        );

        catalog.add(
            Product::new("prod_tutorial_premium", "Premium Plan")
                .with_description("Advanced features for professionals")
                .with_image("https://images.unsplash.com/photo-1553729459-efe14ef6055d?w=500&auto=format&fit=crop&q=60&ixlib=rb-4.0.3")
                .with_price(Price::recurring("price_tutorial_premium_monthly", "usd", 29.99))
                .with_price(Price::recurring("price_tutorial_premium_yearly", "usd", 299.99)),
        );

        catalog.add(
            Product::new("prod_tutorial_ebook", "Programming E-Book")
                .with_description("Comprehensive guide to modern programming")
                .with_image("https://images.unsplash.com/photo-1544716278-ca5e3f4abd8c?w=500&auto=format&fit=crop&q=60&ixlib=rb-4.0.3")
                .with_price(Price::one_time(DEMO_EBOOK_PRICE_ID, "usd", 19.99)),
        );

        catalog
    }
}
