//! Session-scoped engine context.
//!
//! Owns one instance of each store, created at application-session start and
//! threaded by reference to whichever layer needs it; there are no ambient
//! singletons. Flows that span stores (vendor-attributed product creation,
//! checkout) live here, so the stores themselves never write each other.

use std::rc::Rc;

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::domain::{
    Order, OrderLine, OrderStatus, Product, ProductDraft, Role, ShippingAddress, User,
};
use crate::domain::user::Email;
use crate::session::{MemorySession, SharedSession};
use crate::store::{CartStore, CatalogStore, IdentityStore, OrderStore};
use crate::{MarketplaceError, Result};

pub struct Marketplace {
    pub identity: IdentityStore,
    pub catalog: CatalogStore,
    pub cart: CartStore,
    pub orders: OrderStore,
}

impl Marketplace {
    /// Fresh, empty engine over the given session snapshot. The identity and
    /// cart stores restore their persisted entries from it.
    pub fn new(session: SharedSession) -> Self {
        Self {
            identity: IdentityStore::new(Rc::clone(&session)),
            catalog: CatalogStore::new(),
            cart: CartStore::new(Rc::clone(&session)),
            orders: OrderStore::new(),
        }
    }

    /// Engine seeded with the demo catalog, order history, and the two demo
    /// accounts (`vendor@example.com` / `customer@example.com`, credential
    /// `password`).
    pub fn with_demo_data(session: SharedSession) -> Self {
        Self {
            identity: IdentityStore::with_accounts(Rc::clone(&session), demo_accounts()),
            catalog: CatalogStore::with_products(demo_products()),
            cart: CartStore::new(Rc::clone(&session)),
            orders: OrderStore::with_orders(demo_orders()),
        }
    }

    /// Adds a product to the catalog on behalf of the signed-in vendor, who
    /// becomes its owner and lends it their display name.
    pub fn add_product(&mut self, draft: ProductDraft) -> Result<String> {
        let vendor = self
            .identity
            .current_user()
            .ok_or(MarketplaceError::NotAuthenticated)?;
        if vendor.role != Role::Vendor {
            return Err(MarketplaceError::VendorRequired);
        }
        let (vendor_id, vendor_name) = (vendor.id.clone(), vendor.name.clone());
        self.catalog.create(&vendor_id, &vendor_name, draft)
    }

    /// Places an order for the signed-in user from the current cart
    /// contents, then empties the cart. The cart is only cleared once the
    /// order exists.
    pub fn checkout(&mut self, shipping_address: ShippingAddress) -> Result<String> {
        let customer = self
            .identity
            .current_user()
            .ok_or(MarketplaceError::NotAuthenticated)?
            .clone();
        let order_id = self
            .orders
            .create(&customer, self.cart.items(), shipping_address)?;
        self.cart.clear();
        Ok(order_id)
    }
}

impl Default for Marketplace {
    fn default() -> Self {
        Self::new(MemorySession::shared())
    }
}

// =============================================================================
// Demo data
// =============================================================================

fn demo_accounts() -> Vec<(User, String)> {
    vec![
        (
            User {
                id: "1".into(),
                name: "Vendor User".into(),
                email: Email::trusted("vendor@example.com"),
                role: Role::Vendor,
            },
            "password".into(),
        ),
        (
            User {
                id: "2".into(),
                name: "Customer User".into(),
                email: Email::trusted("customer@example.com"),
                role: Role::Customer,
            },
            "password".into(),
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn demo_product(
    id: &str,
    name: &str,
    description: &str,
    price: Decimal,
    category: &str,
    vendor_id: &str,
    vendor_name: &str,
    stock: u32,
    rating: Decimal,
    reviews: u32,
) -> Product {
    Product {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        price,
        images: vec!["/placeholder.svg".into()],
        category: category.into(),
        vendor_id: vendor_id.into(),
        vendor_name: vendor_name.into(),
        stock,
        rating,
        reviews,
    }
}

fn demo_products() -> Vec<Product> {
    vec![
        demo_product(
            "1",
            "Wireless Bluetooth Headphones",
            "High-quality wireless headphones with noise cancellation technology. \
             Perfect for music lovers and professionals working from home.",
            Decimal::new(12999, 2),
            "Electronics",
            "1",
            "Tech Solutions Inc",
            25,
            Decimal::new(45, 1),
            127,
        ),
        demo_product(
            "2",
            "Organic Cotton T-Shirt",
            "Comfortable and eco-friendly t-shirt made from 100% organic cotton. \
             Available in multiple colors and sizes.",
            Decimal::new(2499, 2),
            "Clothing",
            "3",
            "Green Apparel Co",
            150,
            Decimal::new(42, 1),
            89,
        ),
        demo_product(
            "3",
            "Smart Fitness Watch",
            "Track your health and fitness goals with this advanced smartwatch. \
             Features heart rate monitoring, sleep tracking, and exercise detection.",
            Decimal::new(19999, 2),
            "Electronics",
            "1",
            "Tech Solutions Inc",
            42,
            Decimal::new(47, 1),
            203,
        ),
        demo_product(
            "4",
            "Artisanal Ceramic Coffee Mug",
            "Handcrafted ceramic mug made by local artisans. Each piece is unique \
             and perfect for your morning coffee or tea.",
            Decimal::new(1999, 2),
            "Home & Kitchen",
            "4",
            "Artisan Crafts",
            75,
            Decimal::new(48, 1),
            56,
        ),
        demo_product(
            "5",
            "Professional Chef's Knife",
            "High-carbon stainless steel chef's knife with ergonomic handle. \
             Essential tool for professional chefs and home cooking enthusiasts.",
            Decimal::new(8999, 2),
            "Home & Kitchen",
            "5",
            "Culinary Essentials",
            30,
            Decimal::new(49, 1),
            112,
        ),
        demo_product(
            "6",
            "Vintage Leather Backpack",
            "Stylish and durable leather backpack with multiple compartments. \
             Perfect for work, school, or travel.",
            Decimal::new(7999, 2),
            "Accessories",
            "6",
            "Urban Outfitters",
            60,
            Decimal::new(43, 1),
            78,
        ),
    ]
}

fn demo_orders() -> Vec<Order> {
    let address = ShippingAddress {
        street: "123 Main St".into(),
        city: "Springfield".into(),
        state: "IL".into(),
        zip_code: "62701".into(),
        country: "USA".into(),
    };
    vec![
        Order {
            id: "1".into(),
            customer_id: "2".into(),
            customer_name: "Customer User".into(),
            customer_email: "customer@example.com".into(),
            items: vec![
                OrderLine {
                    product_id: "1".into(),
                    product_name: "Wireless Bluetooth Headphones".into(),
                    quantity: 1,
                    unit_price: Decimal::new(12999, 2),
                    vendor_id: "1".into(),
                },
                OrderLine {
                    product_id: "2".into(),
                    product_name: "Organic Cotton T-Shirt".into(),
                    quantity: 2,
                    unit_price: Decimal::new(2499, 2),
                    vendor_id: "3".into(),
                },
            ],
            status: OrderStatus::Shipped,
            total_amount: Decimal::new(17997, 2),
            date: demo_date(2023, 3, 15, 10, 30),
            shipping_address: address.clone(),
        },
        Order {
            id: "2".into(),
            customer_id: "2".into(),
            customer_name: "Customer User".into(),
            customer_email: "customer@example.com".into(),
            items: vec![OrderLine {
                product_id: "3".into(),
                product_name: "Smart Fitness Watch".into(),
                quantity: 1,
                unit_price: Decimal::new(19999, 2),
                vendor_id: "1".into(),
            }],
            status: OrderStatus::Pending,
            total_amount: Decimal::new(19999, 2),
            date: demo_date(2023, 4, 5, 14, 45),
            shipping_address: address,
        },
    ]
}

fn demo_date(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_else(Utc::now)
}
