//! GraphQL wire types: entity objects, mutation inputs, and envelopes.

use async_graphql::{Context, Error, ID, InputObject, Object, Result, SimpleObject};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::db::{CustomerRepository, OrderRepository, ProductRepository};
use crate::models::{Customer, Order, OrderItem, Product};

#[Object]
impl Customer {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.name
    }

    async fn email(&self) -> &str {
        self.email.as_str()
    }

    async fn phone(&self) -> Option<&str> {
        self.phone.as_ref().map(storegraph_core::Phone::as_str)
    }
}

#[Object]
impl Product {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.name
    }

    async fn price(&self) -> Decimal {
        self.price
    }

    async fn stock(&self) -> i32 {
        self.stock
    }
}

#[Object]
impl Order {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    /// The customer who placed this order.
    async fn customer(&self, ctx: &Context<'_>) -> Result<Customer> {
        let pool = ctx.data::<PgPool>()?;
        CustomerRepository::new(pool)
            .get(self.customer_id)
            .await?
            .ok_or_else(|| Error::new("Customer not found"))
    }

    async fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The line items of this order, in insertion order.
    async fn items(&self, ctx: &Context<'_>) -> Result<Vec<OrderItem>> {
        let pool = ctx.data::<PgPool>()?;
        Ok(OrderRepository::new(pool).items(self.id).await?)
    }
}

#[Object]
impl OrderItem {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    /// The product this line refers to.
    async fn product(&self, ctx: &Context<'_>) -> Result<Product> {
        let pool = ctx.data::<PgPool>()?;
        ProductRepository::new(pool)
            .get(self.product_id)
            .await?
            .ok_or_else(|| Error::new("Product not found"))
    }

    async fn quantity(&self) -> i32 {
        self.quantity
    }

    /// Product price snapshot taken when the order was created.
    async fn unit_price(&self) -> Decimal {
        self.unit_price
    }
}

/// Input for `createCustomer` and `bulkCreateCustomers`.
#[derive(InputObject, Debug, Clone)]
pub struct CustomerInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Input for `createProduct`.
#[derive(InputObject, Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub price: Decimal,
    pub stock: Option<i32>,
}

/// Input for `createOrder`. `order_date` is accepted for API
/// compatibility and ignored; `created_at` is set by the store.
#[derive(InputObject, Debug, Clone)]
pub struct OrderInput {
    pub customer_id: ID,
    pub product_ids: Vec<ID>,
    pub order_date: Option<DateTime<Utc>>,
}

/// Envelope returned by `createCustomer`.
#[derive(SimpleObject, Debug)]
pub struct CreateCustomerPayload {
    pub customer: Option<Customer>,
    pub message: String,
    pub success: bool,
}

impl CreateCustomerPayload {
    pub(crate) fn created(customer: Customer) -> Self {
        Self {
            customer: Some(customer),
            message: "Customer created successfully".to_owned(),
            success: true,
        }
    }

    pub(crate) fn failed(message: String) -> Self {
        Self {
            customer: None,
            message,
            success: false,
        }
    }
}

/// Envelope returned by `bulkCreateCustomers`.
///
/// `success` is true iff at least one customer was created; per-row
/// failures are advisory strings in input order.
#[derive(SimpleObject, Debug)]
pub struct BulkCreateCustomersPayload {
    pub customers: Vec<Customer>,
    pub errors: Vec<String>,
    pub success: bool,
}

/// Envelope returned by `createProduct`.
#[derive(SimpleObject, Debug)]
pub struct CreateProductPayload {
    pub product: Option<Product>,
    pub message: String,
    pub success: bool,
}

impl CreateProductPayload {
    pub(crate) fn created(product: Product) -> Self {
        Self {
            product: Some(product),
            message: "Product created successfully".to_owned(),
            success: true,
        }
    }

    pub(crate) fn failed(message: String) -> Self {
        Self {
            product: None,
            message,
            success: false,
        }
    }
}

/// Envelope returned by `createOrder`.
#[derive(SimpleObject, Debug)]
pub struct CreateOrderPayload {
    pub order: Option<Order>,
    pub message: String,
    pub success: bool,
}

impl CreateOrderPayload {
    pub(crate) fn created(order: Order) -> Self {
        Self {
            order: Some(order),
            message: "Order created successfully".to_owned(),
            success: true,
        }
    }

    pub(crate) fn failed(message: String) -> Self {
        Self {
            order: None,
            message,
            success: false,
        }
    }
}
