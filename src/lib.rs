//! Vendora, a multi-vendor marketplace storefront engine.
//!
//! The in-memory state engine behind a marketplace storefront: a shared
//! product catalog, the shopper's cart, and the order book, plus the
//! consistency rules between them (stock bounds, vendor scoping, frozen
//! order snapshots).
//!
//! ## Features
//! - Product catalog with vendor-scoped listing and text/category filtering
//! - Shopping cart with stock-bounded quantities and session persistence
//! - Immutable order snapshots with forward-only status transitions
//! - Vendor sales and revenue aggregates derived on demand
//! - Synchronous change notifications on every store
//!
//! Page rendering, routing, payment processing and other user-facing
//! concerns belong to the embedding application; this crate only exposes
//! the store operations. All state lives for one session and is owned by a
//! [`Marketplace`] the embedder constructs at session start.

pub mod analytics;
pub mod domain;
pub mod marketplace;
pub mod session;
pub mod store;

pub use domain::{
    CartItem, Email, Order, OrderLine, OrderStatus, Product, ProductDraft, Role,
    ShippingAddress, User,
};
pub use marketplace::Marketplace;
pub use session::{MemorySession, SessionStore, SharedSession};
pub use store::{CartStore, CatalogStore, IdentityStore, OrderStore, ProductFilter, SubscriptionId};

use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

/// Failures surfaced by the store operations.
///
/// Every failing operation leaves all stores untouched; there are no
/// partial writes.
#[derive(Error, Debug)]
pub enum MarketplaceError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("product not found: {0}")]
    ProductNotFound(String),

    #[error("order not found: {0}")]
    OrderNotFound(String),

    #[error("invalid quantity: {0}")]
    InvalidQuantity(u32),

    #[error("order must contain at least one item")]
    EmptyOrder,

    #[error("cannot move order from {from} to {to}")]
    InvalidStatusTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("email already in use: {0}")]
    EmailInUse(String),

    #[error("no user is signed in")]
    NotAuthenticated,

    #[error("a vendor account is required")]
    VendorRequired,
}

pub type Result<T> = std::result::Result<T, MarketplaceError>;
