//! The stores owning engine state.
//!
//! Dependency order is strictly Catalog → Cart → Order: the cart reads the
//! catalog to bound quantities, the order store reads cart-supplied
//! snapshots, and no store ever writes another.

pub mod cart;
pub mod catalog;
pub mod identity;
pub mod observer;
pub mod orders;

pub use cart::CartStore;
pub use catalog::{CatalogStore, ProductFilter};
pub use identity::IdentityStore;
pub use observer::{Subscribers, SubscriptionId};
pub use orders::OrderStore;
