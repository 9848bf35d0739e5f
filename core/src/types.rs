//! Domain DTOs for the products API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently,
//! so the FFI surface is never coupled to Axum internals. Integration tests
//! catch any schema drift between the two crates.
//!
//! `price` stays a string end to end: the remote resource stores it as text
//! and the client never interprets it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier assigned by the remote resource on creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A product record as owned by the remote resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: String,
    pub description: String,
}

/// Editable fields of a product, without an id.
///
/// Used both as local form state and as the request body for create and
/// update: the server receives every field on every write.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub price: String,
    pub description: String,
}

impl Draft {
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            description: description.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.price.is_empty() && self.description.is_empty()
    }
}

impl From<&Product> for Draft {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.clone(),
            description: product.description.clone(),
        }
    }
}
