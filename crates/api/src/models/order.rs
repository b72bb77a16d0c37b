//! Order domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use storegraph_core::{CustomerId, OrderId, OrderItemId, ProductId};

/// An order placed by a customer.
///
/// `total_amount` is fixed at creation time as the sum of the line items'
/// unit prices; later product price changes do not affect it.
#[derive(Debug, Clone)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// The customer who placed the order.
    pub customer_id: CustomerId,
    /// Sum of the line items' unit prices at creation time.
    pub total_amount: Decimal,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
}

/// A line item owned by exactly one order.
#[derive(Debug, Clone)]
pub struct OrderItem {
    /// Unique line item ID.
    pub id: OrderItemId,
    /// The owning order.
    pub order_id: OrderId,
    /// The product this line refers to.
    pub product_id: ProductId,
    /// Number of units.
    pub quantity: i32,
    /// Product price snapshot taken when the order was created.
    pub unit_price: Decimal,
}

/// A line item to insert alongside a new order.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    /// The product this line refers to.
    pub product_id: ProductId,
    /// Number of units.
    pub quantity: i32,
    /// Product price snapshot.
    pub unit_price: Decimal,
}
