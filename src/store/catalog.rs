//! Product catalog store.
//!
//! Exclusively owns the product collection. Products are kept in insertion
//! order; the distinct category list is recomputed after every mutation so
//! readers always see it in first-seen order.

use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::analytics;
use crate::domain::{CatalogEvent, Product, ProductDraft};
use crate::store::observer::{Subscribers, SubscriptionId};
use crate::{MarketplaceError, Result};

/// Search criteria for [`CatalogStore::filter`].
///
/// `category` narrows by exact match, `text` by case-insensitive substring
/// against name or description; both are optional and AND-compose.
#[derive(Clone, Debug, Default)]
pub struct ProductFilter {
    pub text: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Default)]
pub struct CatalogStore {
    products: Vec<Product>,
    categories: Vec<String>,
    subscribers: Subscribers<CatalogEvent>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from existing records, e.g. demo data or a restored
    /// snapshot. Records are trusted as-is.
    pub fn with_products(products: Vec<Product>) -> Self {
        let categories = analytics::extract_categories(&products);
        Self {
            products,
            categories,
            subscribers: Subscribers::default(),
        }
    }

    /// All products, in insertion order.
    pub fn list_all(&self) -> &[Product] {
        &self.products
    }

    pub fn list_by_vendor(&self, vendor_id: &str) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| p.vendor_id == vendor_id)
            .cloned()
            .collect()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Adds a product on behalf of a vendor and returns its fresh id.
    /// Rating and review counts default to zero unless the draft supplies
    /// them.
    pub fn create(
        &mut self,
        vendor_id: &str,
        vendor_name: &str,
        draft: ProductDraft,
    ) -> Result<String> {
        validate(draft.price, draft.rating)?;
        let id = Uuid::new_v4().to_string();
        self.products.push(Product {
            id: id.clone(),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            images: draft.images,
            category: draft.category,
            vendor_id: vendor_id.to_owned(),
            vendor_name: vendor_name.to_owned(),
            stock: draft.stock,
            rating: draft.rating,
            reviews: draft.reviews,
        });
        self.refresh_categories();
        info!(product_id = %id, vendor_id, "product created");
        self.subscribers
            .notify(&CatalogEvent::Created { product_id: id.clone() });
        Ok(id)
    }

    /// Replaces the record matching `product.id` in full.
    pub fn update(&mut self, product: Product) -> Result<()> {
        validate(product.price, product.rating)?;
        let slot = self
            .products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or_else(|| MarketplaceError::ProductNotFound(product.id.clone()))?;
        let product_id = product.id.clone();
        *slot = product;
        self.refresh_categories();
        debug!(product_id = %product_id, "product updated");
        self.subscribers
            .notify(&CatalogEvent::Updated { product_id });
        Ok(())
    }

    /// Removes the record. Returns `false` if no such product exists;
    /// deleting an absent id is not an error.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        if self.products.len() == before {
            return false;
        }
        self.refresh_categories();
        info!(product_id = id, "product deleted");
        self.subscribers.notify(&CatalogEvent::Deleted {
            product_id: id.to_owned(),
        });
        true
    }

    /// Narrows the catalog by category first, then by search text.
    pub fn filter(&self, filter: &ProductFilter) -> Vec<Product> {
        let text = filter.text.as_deref().map(str::to_lowercase);
        self.products
            .iter()
            .filter(|p| {
                filter
                    .category
                    .as_deref()
                    .map_or(true, |category| p.category == category)
            })
            .filter(|p| {
                text.as_deref().map_or(true, |needle| {
                    p.name.to_lowercase().contains(needle)
                        || p.description.to_lowercase().contains(needle)
                })
            })
            .cloned()
            .collect()
    }

    pub fn subscribe(&mut self, listener: impl Fn(&CatalogEvent) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    fn refresh_categories(&mut self) {
        self.categories = analytics::extract_categories(&self.products);
    }
}

fn validate(price: Decimal, rating: Decimal) -> Result<()> {
    if price < Decimal::ZERO {
        return Err(MarketplaceError::Validation(
            "price must not be negative".into(),
        ));
    }
    if rating < Decimal::ZERO || rating > Decimal::from(5) {
        return Err(MarketplaceError::Validation(
            "rating must be between 0 and 5".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn draft(name: &str, category: &str, price: Decimal, stock: u32) -> ProductDraft {
        ProductDraft {
            name: name.into(),
            description: format!("A fine {name}"),
            price,
            images: vec!["/img/1.jpg".into()],
            category: category.into(),
            stock,
            rating: Decimal::ZERO,
            reviews: 0,
        }
    }

    #[test]
    fn create_assigns_unique_ids_and_keeps_the_draft_stock() {
        let mut catalog = CatalogStore::new();
        let a = catalog
            .create("v1", "Acme", draft("Lamp", "Home", Decimal::new(2500, 2), 7))
            .unwrap();
        let b = catalog
            .create("v1", "Acme", draft("Desk", "Home", Decimal::new(9900, 2), 3))
            .unwrap();

        assert_ne!(a, b);
        assert_eq!(catalog.get_by_id(&a).unwrap().stock, 7);
        assert_eq!(catalog.get_by_id(&a).unwrap().vendor_name, "Acme");
        assert_eq!(catalog.list_all().len(), 2);
    }

    #[test]
    fn create_rejects_negative_price() {
        let mut catalog = CatalogStore::new();
        let err = catalog
            .create("v1", "Acme", draft("Lamp", "Home", Decimal::new(-1, 2), 1))
            .unwrap_err();
        assert!(matches!(err, MarketplaceError::Validation(_)));
        assert!(catalog.list_all().is_empty());
    }

    #[test]
    fn create_rejects_out_of_range_rating() {
        let mut catalog = CatalogStore::new();
        let mut bad = draft("Lamp", "Home", Decimal::ONE, 1);
        bad.rating = Decimal::from(6);
        assert!(catalog.create("v1", "Acme", bad).is_err());
    }

    #[test]
    fn update_replaces_the_whole_record() {
        let mut catalog = CatalogStore::new();
        let id = catalog
            .create("v1", "Acme", draft("Lamp", "Home", Decimal::new(2500, 2), 7))
            .unwrap();

        let mut edited = catalog.get_by_id(&id).unwrap().clone();
        edited.name = "Desk Lamp".into();
        edited.stock = 2;
        catalog.update(edited).unwrap();

        let stored = catalog.get_by_id(&id).unwrap();
        assert_eq!(stored.name, "Desk Lamp");
        assert_eq!(stored.stock, 2);
    }

    #[test]
    fn update_of_unknown_id_fails() {
        let mut catalog = CatalogStore::new();
        let id = catalog
            .create("v1", "Acme", draft("Lamp", "Home", Decimal::ONE, 1))
            .unwrap();
        let mut ghost = catalog.get_by_id(&id).unwrap().clone();
        ghost.id = "missing".into();
        assert!(matches!(
            catalog.update(ghost),
            Err(MarketplaceError::ProductNotFound(_))
        ));
    }

    #[test]
    fn delete_is_silent_on_absent_ids() {
        let mut catalog = CatalogStore::new();
        let id = catalog
            .create("v1", "Acme", draft("Lamp", "Home", Decimal::ONE, 1))
            .unwrap();
        assert!(catalog.delete(&id));
        assert!(!catalog.delete(&id));
        assert!(catalog.get_by_id(&id).is_none());
    }

    #[test]
    fn vendor_listing_partitions_the_catalog() {
        let mut catalog = CatalogStore::new();
        catalog
            .create("v1", "Acme", draft("Lamp", "Home", Decimal::ONE, 1))
            .unwrap();
        catalog
            .create("v2", "Bolt", draft("Desk", "Home", Decimal::ONE, 1))
            .unwrap();
        catalog
            .create("v1", "Acme", draft("Mug", "Kitchen", Decimal::ONE, 1))
            .unwrap();

        let v1 = catalog.list_by_vendor("v1");
        let v2 = catalog.list_by_vendor("v2");
        assert_eq!(v1.len(), 2);
        assert_eq!(v2.len(), 1);
        assert_eq!(v1.len() + v2.len(), catalog.list_all().len());
        assert!(v1.iter().all(|p| p.vendor_id == "v1"));
    }

    #[test]
    fn categories_are_first_seen_distinct_and_track_mutations() {
        let mut catalog = CatalogStore::new();
        catalog
            .create("v1", "Acme", draft("Lamp", "Home", Decimal::ONE, 1))
            .unwrap();
        let mug = catalog
            .create("v1", "Acme", draft("Mug", "Kitchen", Decimal::ONE, 1))
            .unwrap();
        catalog
            .create("v1", "Acme", draft("Desk", "Home", Decimal::ONE, 1))
            .unwrap();

        assert_eq!(catalog.categories(), ["Home", "Kitchen"]);

        catalog.delete(&mug);
        assert_eq!(catalog.categories(), ["Home"]);
    }

    #[test]
    fn filter_composes_category_and_text() {
        let mut catalog = CatalogStore::new();
        catalog
            .create("v1", "Acme", draft("Desk Lamp", "Home", Decimal::ONE, 1))
            .unwrap();
        catalog
            .create("v1", "Acme", draft("Floor Lamp", "Lighting", Decimal::ONE, 1))
            .unwrap();
        catalog
            .create("v1", "Acme", draft("Mug", "Home", Decimal::ONE, 1))
            .unwrap();

        let by_text = catalog.filter(&ProductFilter {
            text: Some("LAMP".into()),
            category: None,
        });
        assert_eq!(by_text.len(), 2);

        let by_category = catalog.filter(&ProductFilter {
            text: None,
            category: Some("Home".into()),
        });
        assert_eq!(by_category.len(), 2);

        let both = catalog.filter(&ProductFilter {
            text: Some("lamp".into()),
            category: Some("Home".into()),
        });
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].name, "Desk Lamp");

        // description matches count too
        let by_description = catalog.filter(&ProductFilter {
            text: Some("fine mug".into()),
            category: None,
        });
        assert_eq!(by_description.len(), 1);
    }

    #[test]
    fn mutations_notify_subscribers() {
        let mut catalog = CatalogStore::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = catalog.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        let product_id = catalog
            .create("v1", "Acme", draft("Lamp", "Home", Decimal::ONE, 1))
            .unwrap();
        catalog.delete(&product_id);

        assert_eq!(
            *seen.borrow(),
            vec![
                CatalogEvent::Created {
                    product_id: product_id.clone()
                },
                CatalogEvent::Deleted { product_id }
            ]
        );

        assert!(catalog.unsubscribe(id));
        catalog
            .create("v1", "Acme", draft("Desk", "Home", Decimal::ONE, 1))
            .unwrap();
        assert_eq!(seen.borrow().len(), 2);
    }
}
