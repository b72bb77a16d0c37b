//! Mutation root: validated writes returning result envelopes.
//!
//! Every failure is caught here and converted into the envelope; the
//! transport layer only ever sees a GraphQL error for malformed requests,
//! never for business outcomes.

use async_graphql::{Context, Object, Result};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

use storegraph_core::{CustomerId, Email, Phone, ProductId};

use crate::db::{self, CustomerRepository, OrderRepository, ProductRepository, RepositoryError};
use crate::error::MutationError;
use crate::graphql::types::{
    BulkCreateCustomersPayload, CreateCustomerPayload, CreateOrderPayload, CreateProductPayload,
    CustomerInput, OrderInput, ProductInput,
};
use crate::models::{Customer, InvalidCustomer, NewCustomer, NewOrderItem, NewProduct, Order, Product};

/// The GraphQL mutation root.
pub struct Mutation;

#[Object]
impl Mutation {
    /// Create a customer after validating email uniqueness and phone format.
    async fn create_customer(
        &self,
        ctx: &Context<'_>,
        input: CustomerInput,
    ) -> Result<CreateCustomerPayload> {
        let pool = ctx.data::<PgPool>()?;
        Ok(match create_customer_inner(pool, input).await {
            Ok(customer) => CreateCustomerPayload::created(customer),
            Err(err) => CreateCustomerPayload::failed(err.into_message("creating customer")),
        })
    }

    /// Create a batch of customers in one transaction.
    ///
    /// Rows are processed independently: a failing row is skipped and
    /// reported, previously inserted rows of the same call still commit.
    async fn bulk_create_customers(
        &self,
        ctx: &Context<'_>,
        inputs: Vec<CustomerInput>,
    ) -> Result<BulkCreateCustomersPayload> {
        let pool = ctx.data::<PgPool>()?;
        Ok(match bulk_create_customers_inner(pool, inputs).await {
            Ok((customers, errors)) => BulkCreateCustomersPayload {
                success: !customers.is_empty(),
                customers,
                errors,
            },
            Err(err) => BulkCreateCustomersPayload {
                customers: Vec::new(),
                errors: vec![err.into_message("creating customers")],
                success: false,
            },
        })
    }

    /// Create a product after validating price and stock.
    async fn create_product(
        &self,
        ctx: &Context<'_>,
        input: ProductInput,
    ) -> Result<CreateProductPayload> {
        let pool = ctx.data::<PgPool>()?;
        Ok(match create_product_inner(pool, input).await {
            Ok(product) => CreateProductPayload::created(product),
            Err(err) => CreateProductPayload::failed(err.into_message("creating product")),
        })
    }

    /// Create an order for an existing customer over existing products.
    ///
    /// The order row and one line item per product (quantity 1, unit price
    /// snapshotted) are written in a single transaction.
    async fn create_order(
        &self,
        ctx: &Context<'_>,
        input: OrderInput,
    ) -> Result<CreateOrderPayload> {
        let pool = ctx.data::<PgPool>()?;
        Ok(match create_order_inner(pool, input).await {
            Ok(order) => CreateOrderPayload::created(order),
            Err(err) => CreateOrderPayload::failed(err.into_message("creating order")),
        })
    }
}

async fn create_customer_inner(
    pool: &PgPool,
    input: CustomerInput,
) -> Result<Customer, MutationError> {
    let repo = CustomerRepository::new(pool);

    // Uniqueness is checked before the phone format.
    let email = Email::parse(&input.email).map_err(InvalidCustomer::from)?;
    if repo.email_exists(&email).await? {
        return Err(MutationError::validation("Email already exists"));
    }

    let phone = input
        .phone
        .as_deref()
        .map(Phone::parse)
        .transpose()
        .map_err(InvalidCustomer::from)?;

    let new = NewCustomer {
        name: input.name,
        email,
        phone,
    };
    Ok(repo.create(&new).await?)
}

/// Why a single batch row was skipped.
enum BulkRowError {
    DuplicateEmail,
    Validation(String),
    Other(RepositoryError),
}

async fn bulk_create_customers_inner(
    pool: &PgPool,
    inputs: Vec<CustomerInput>,
) -> Result<(Vec<Customer>, Vec<String>), MutationError> {
    let mut customers = Vec::new();
    let mut errors = Vec::new();

    let mut tx = pool.begin().await.map_err(RepositoryError::from)?;

    for input in inputs {
        let email_raw = input.email.clone();
        match bulk_insert_one(&mut tx, input).await {
            Ok(customer) => customers.push(customer),
            Err(BulkRowError::DuplicateEmail) => {
                errors.push(format!("Email {email_raw} already exists"));
            }
            Err(BulkRowError::Validation(message)) => {
                errors.push(format!("Validation error for {email_raw}: {message}"));
            }
            Err(BulkRowError::Other(err)) => {
                errors.push(format!("Error creating customer {email_raw}: {err}"));
            }
        }
    }

    tx.commit().await.map_err(RepositoryError::from)?;

    Ok((customers, errors))
}

/// Validate and insert one batch row inside the shared transaction.
///
/// The uniqueness check runs against the transaction, so duplicates of
/// rows inserted earlier in the same batch are caught as well.
async fn bulk_insert_one(
    tx: &mut Transaction<'_, Postgres>,
    input: CustomerInput,
) -> Result<Customer, BulkRowError> {
    let email =
        Email::parse(&input.email).map_err(|e| BulkRowError::Validation(e.to_string()))?;

    if db::customers::email_exists(&mut **tx, &email)
        .await
        .map_err(BulkRowError::Other)?
    {
        return Err(BulkRowError::DuplicateEmail);
    }

    let phone = input
        .phone
        .as_deref()
        .map(Phone::parse)
        .transpose()
        .map_err(|e| BulkRowError::Validation(e.to_string()))?;

    let new = NewCustomer {
        name: input.name,
        email,
        phone,
    };
    db::customers::insert(&mut **tx, &new)
        .await
        .map_err(BulkRowError::Other)
}

async fn create_product_inner(
    pool: &PgPool,
    input: ProductInput,
) -> Result<Product, MutationError> {
    let new = NewProduct::parse(input.name, input.price, input.stock)?;
    Ok(ProductRepository::new(pool).create(&new).await?)
}

async fn create_order_inner(pool: &PgPool, input: OrderInput) -> Result<Order, MutationError> {
    let OrderInput {
        customer_id,
        product_ids,
        // Accepted for API compatibility; created_at is set by the store.
        order_date: _,
    } = input;

    let customer_id: CustomerId = customer_id.as_str().parse().map_err(|_| {
        MutationError::validation(format!("Invalid customer ID: {}", customer_id.as_str()))
    })?;
    let customer = CustomerRepository::new(pool)
        .get(customer_id)
        .await?
        .ok_or_else(|| MutationError::validation("Customer does not exist"))?;

    let product_repo = ProductRepository::new(pool);
    let mut products = Vec::new();
    for raw_id in &product_ids {
        let product_id: ProductId = raw_id.as_str().parse().map_err(|_| {
            MutationError::validation(format!("Invalid product ID: {}", raw_id.as_str()))
        })?;
        let product = product_repo.get(product_id).await?.ok_or_else(|| {
            MutationError::validation(format!(
                "Product with ID {} does not exist",
                raw_id.as_str()
            ))
        })?;
        products.push(product);
    }

    if products.is_empty() {
        return Err(MutationError::validation("At least one product is required"));
    }

    let total_amount: Decimal = products.iter().map(|p| p.price).sum();

    let items: Vec<NewOrderItem> = products
        .iter()
        .map(|p| NewOrderItem {
            product_id: p.id,
            quantity: 1,
            unit_price: p.price,
        })
        .collect();

    Ok(OrderRepository::new(pool)
        .create_with_items(customer.id, total_amount, &items)
        .await?)
}
