//! Query root: point lookups and filterable, cursor-paginated collections.
//!
//! Point lookups propagate a missing id as a GraphQL error entry; this is
//! deliberately asymmetric with the mutation envelopes, matching the wire
//! contract clients depend on.

use async_graphql::connection::{Connection, Edge, OpaqueCursor, query};
use async_graphql::{Context, Error, ID, Object, OutputType, Result};
use sqlx::PgPool;

use storegraph_core::{CustomerId, OrderId, ProductId};

use crate::db::orders::OrderListFilter;
use crate::db::{CustomerRepository, OrderRepository, Page, ProductRepository, RepositoryError};
use crate::graphql::filters::{CustomerFilter, OrderFilter, ProductFilter};
use crate::models::{Customer, Order, Product};

/// A connection keyed by opaque row-id cursors.
type IdConnection<Node> = Connection<OpaqueCursor<i32>, Node>;

/// The GraphQL query root.
pub struct Query;

#[Object]
impl Query {
    async fn hello(&self) -> &'static str {
        "Hello, GraphQL!"
    }

    /// Look up a customer by id.
    async fn customer(&self, ctx: &Context<'_>, id: ID) -> Result<Customer> {
        let pool = ctx.data::<PgPool>()?;
        let id: CustomerId = parse_id(&id)?;
        CustomerRepository::new(pool)
            .get(id)
            .await?
            .ok_or_else(|| Error::new("Customer not found"))
    }

    /// Look up a product by id.
    async fn product(&self, ctx: &Context<'_>, id: ID) -> Result<Product> {
        let pool = ctx.data::<PgPool>()?;
        let id: ProductId = parse_id(&id)?;
        ProductRepository::new(pool)
            .get(id)
            .await?
            .ok_or_else(|| Error::new("Product not found"))
    }

    /// Look up an order by id.
    async fn order(&self, ctx: &Context<'_>, id: ID) -> Result<Order> {
        let pool = ctx.data::<PgPool>()?;
        let id: OrderId = parse_id(&id)?;
        OrderRepository::new(pool)
            .get(id)
            .await?
            .ok_or_else(|| Error::new("Order not found"))
    }

    /// Customers matching the filter, in stable ascending-id order.
    async fn all_customers(
        &self,
        ctx: &Context<'_>,
        after: Option<String>,
        before: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
        filter: Option<CustomerFilter>,
    ) -> Result<IdConnection<Customer>> {
        let pool = ctx.data::<PgPool>()?;
        let filter = filter.unwrap_or_default().into();
        connect(after, before, first, last, |page| async move {
            let rows = CustomerRepository::new(pool).list(&filter, &page).await?;
            Ok(rows.into_iter().map(|c| (c.id.as_i32(), c)).collect())
        })
        .await
    }

    /// Products matching the filter, in stable ascending-id order.
    async fn all_products(
        &self,
        ctx: &Context<'_>,
        after: Option<String>,
        before: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
        filter: Option<ProductFilter>,
    ) -> Result<IdConnection<Product>> {
        let pool = ctx.data::<PgPool>()?;
        let filter = filter.unwrap_or_default().into();
        connect(after, before, first, last, |page| async move {
            let rows = ProductRepository::new(pool).list(&filter, &page).await?;
            Ok(rows.into_iter().map(|p| (p.id.as_i32(), p)).collect())
        })
        .await
    }

    /// Orders matching the filter, in stable ascending-id order.
    async fn all_orders(
        &self,
        ctx: &Context<'_>,
        after: Option<String>,
        before: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
        filter: Option<OrderFilter>,
    ) -> Result<IdConnection<Order>> {
        let pool = ctx.data::<PgPool>()?;
        let filter = OrderListFilter::try_from(filter.unwrap_or_default())?;
        connect(after, before, first, last, |page| async move {
            let rows = OrderRepository::new(pool).list(&filter, &page).await?;
            Ok(rows.into_iter().map(|o| (o.id.as_i32(), o)).collect())
        })
        .await
    }
}

/// Parse a GraphQL `ID` into a numeric entity id.
fn parse_id<T: std::str::FromStr>(id: &ID) -> Result<T> {
    id.as_str()
        .parse::<T>()
        .map_err(|_| Error::new(format!("Invalid ID: {}", id.as_str())))
}

/// Drive relay-style pagination over an id-ordered fetch.
///
/// The fetch callback receives the resolved [`Page`] window (bounds from
/// the cursors, limit of one more row than requested so a further page can
/// be detected) and returns `(id, node)` pairs in fetch order.
async fn connect<Node, F, Fut>(
    after: Option<String>,
    before: Option<String>,
    first: Option<i32>,
    last: Option<i32>,
    fetch: F,
) -> Result<IdConnection<Node>>
where
    Node: OutputType,
    F: FnOnce(Page) -> Fut,
    Fut: Future<Output = Result<Vec<(i32, Node)>, RepositoryError>>,
{
    query(
        after,
        before,
        first,
        last,
        |after: Option<OpaqueCursor<i32>>, before: Option<OpaqueCursor<i32>>, first, last| async move {
            let descending = last.is_some() && first.is_none();
            let take = first.or(last);
            let page = Page {
                after: after.map(|cursor| cursor.0),
                before: before.map(|cursor| cursor.0),
                limit: take.map(|n| i64::try_from(n).unwrap_or(i64::MAX).saturating_add(1)),
                descending,
            };
            let bounded_below = page.after.is_some();
            let bounded_above = page.before.is_some();

            let mut rows = fetch(page)
                .await
                .map_err(|e| Error::new(e.to_string()))?;

            let mut has_more = false;
            if let Some(n) = take
                && rows.len() > n
            {
                rows.truncate(n);
                has_more = true;
            }
            if descending {
                rows.reverse();
            }

            let (has_previous, has_next) = if descending {
                (has_more, bounded_above)
            } else {
                (bounded_below, has_more)
            };

            let mut connection = Connection::new(has_previous, has_next);
            connection.edges.extend(
                rows.into_iter()
                    .map(|(id, node)| Edge::new(OpaqueCursor(id), node)),
            );
            Ok::<_, Error>(connection)
        },
    )
    .await
}
