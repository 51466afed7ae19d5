//! Aggregates derived on demand from the catalog and the order book.
//!
//! Nothing here is cached: the data set is a single session's worth of
//! in-memory records, so every call recomputes from the slices it is given.
//! Vendor dashboards pass vendor-scoped product and order listings in.

use rust_decimal::Decimal;

use crate::domain::{Order, OrderStatus, Product};

/// Distinct categories across `products`, in first-seen order.
pub fn extract_categories(products: &[Product]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for product in products {
        if !seen.contains(&product.category) {
            seen.push(product.category.clone());
        }
    }
    seen
}

/// Units sold for one product.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductSales {
    pub product_id: String,
    pub name: String,
    pub units: u32,
}

/// Units sold per product, sorted best-selling first. Products with no sales
/// are included with zero units; callers slice a top-N for display.
pub fn sales_by_product(products: &[Product], orders: &[Order]) -> Vec<ProductSales> {
    let mut sales: Vec<ProductSales> = products
        .iter()
        .map(|product| {
            let units = orders
                .iter()
                .flat_map(|order| &order.items)
                .filter(|line| line.product_id == product.id)
                .map(|line| line.quantity)
                .sum();
            ProductSales {
                product_id: product.id.clone(),
                name: product.name.clone(),
                units,
            }
        })
        .collect();
    sales.sort_by(|a, b| b.units.cmp(&a.units));
    sales
}

/// Revenue attributed to one category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryRevenue {
    pub category: String,
    pub revenue: Decimal,
}

/// Revenue per category for one vendor's lines. The category comes from the
/// current product record; lines whose product has since been deleted are
/// skipped.
pub fn revenue_by_category(
    vendor_id: &str,
    products: &[Product],
    orders: &[Order],
) -> Vec<CategoryRevenue> {
    let mut buckets: Vec<CategoryRevenue> = Vec::new();
    for line in orders.iter().flat_map(|order| &order.items) {
        if line.vendor_id != vendor_id {
            continue;
        }
        let Some(product) = products.iter().find(|p| p.id == line.product_id) else {
            continue;
        };
        let revenue = line.subtotal();
        match buckets.iter_mut().find(|b| b.category == product.category) {
            Some(bucket) => bucket.revenue += revenue,
            None => buckets.push(CategoryRevenue {
                category: product.category.clone(),
                revenue,
            }),
        }
    }
    buckets
}

/// Sum of the vendor's own line subtotals across `orders`, never whole-order
/// totals: a multi-vendor order contributes only this vendor's share.
pub fn vendor_revenue(vendor_id: &str, orders: &[Order]) -> Decimal {
    orders
        .iter()
        .flat_map(|order| &order.items)
        .filter(|line| line.vendor_id == vendor_id)
        .map(|line| line.subtotal())
        .sum()
}

/// Total units across the vendor's lines.
pub fn vendor_units_sold(vendor_id: &str, orders: &[Order]) -> u32 {
    orders
        .iter()
        .flat_map(|order| &order.items)
        .filter(|line| line.vendor_id == vendor_id)
        .map(|line| line.quantity)
        .sum()
}

/// Orders still awaiting processing.
pub fn pending_order_count(orders: &[Order]) -> usize {
    orders
        .iter()
        .filter(|order| order.status == OrderStatus::Pending)
        .count()
}
