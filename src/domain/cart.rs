//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Product;

/// One line in the shopping cart.
///
/// Holds a value-copy of the product taken when the line was added, so the
/// displayed price and name may lag behind later catalog edits. The copy is
/// what gets frozen into an order at checkout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(price: Decimal) -> Product {
        Product {
            id: "p1".into(),
            name: "Widget".into(),
            description: String::new(),
            price,
            images: vec![],
            category: "Tools".into(),
            vendor_id: "v1".into(),
            vendor_name: "Widget Co".into(),
            stock: 10,
            rating: Decimal::ZERO,
            reviews: 0,
        }
    }

    #[test]
    fn line_total_multiplies_snapshot_price() {
        let item = CartItem {
            product: widget(Decimal::new(1999, 2)),
            quantity: 3,
        };
        assert_eq!(item.line_total(), Decimal::new(5997, 2));
    }
}
