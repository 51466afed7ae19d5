//! Catalog products.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product listed by a vendor.
///
/// `vendor_name` is a cache of the vendor's display name at creation time
/// and is not kept in sync with later renames.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    /// Image references, possibly empty; consumers handle the fallback.
    pub images: Vec<String>,
    pub category: String,
    pub vendor_id: String,
    pub vendor_name: String,
    /// Authoritative availability count.
    pub stock: u32,
    pub rating: Decimal,
    pub reviews: u32,
}

/// Create payload; the catalog assigns the id and vendor attribution.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub images: Vec<String>,
    pub category: String,
    pub stock: u32,
    #[serde(default)]
    pub rating: Decimal,
    #[serde(default)]
    pub reviews: u32,
}
