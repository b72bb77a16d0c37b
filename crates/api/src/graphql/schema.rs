//! GraphQL schema assembly.

use async_graphql::{EmptySubscription, Schema};
use sqlx::PgPool;

use super::mutation::Mutation;
use super::query::Query;

/// The executable Storegraph schema.
pub type ApiSchema = Schema<Query, Mutation, EmptySubscription>;

/// Build the GraphQL schema, attaching the connection pool to the context.
#[must_use]
pub fn build_schema(pool: PgPool) -> ApiSchema {
    Schema::build(Query, Mutation, EmptySubscription)
        .data(pool)
        .finish()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use async_graphql::value;
    use sqlx::postgres::PgPoolOptions;

    use super::*;

    /// A pool that never connects; resolvers that reach the store fail,
    /// everything else runs normally.
    fn lazy_pool() -> PgPool {
        PgPoolOptions::new()
            .connect_lazy("postgres://storegraph@localhost/storegraph_test")
            .unwrap()
    }

    #[tokio::test]
    async fn test_hello() {
        let schema = build_schema(lazy_pool());
        let response = schema.execute("{ hello }").await;
        assert!(response.errors.is_empty());
        assert_eq!(response.data, value!({ "hello": "Hello, GraphQL!" }));
    }

    #[tokio::test]
    async fn test_sdl_query_surface() {
        let sdl = build_schema(lazy_pool()).sdl();

        assert!(sdl.contains("hello: String!"));
        assert!(sdl.contains("allCustomers"));
        assert!(sdl.contains("allProducts"));
        assert!(sdl.contains("allOrders"));
        assert!(sdl.contains("customer(id: ID!): Customer!"));
        assert!(sdl.contains("product(id: ID!): Product!"));
        assert!(sdl.contains("order(id: ID!): Order!"));
    }

    #[tokio::test]
    async fn test_sdl_mutation_surface() {
        let sdl = build_schema(lazy_pool()).sdl();

        assert!(sdl.contains("createCustomer(input: CustomerInput!): CreateCustomerPayload!"));
        assert!(
            sdl.contains("bulkCreateCustomers(inputs: [CustomerInput!]!): BulkCreateCustomersPayload!")
        );
        assert!(sdl.contains("createProduct(input: ProductInput!): CreateProductPayload!"));
        assert!(sdl.contains("createOrder(input: OrderInput!): CreateOrderPayload!"));
    }

    #[tokio::test]
    async fn test_sdl_input_shapes() {
        let sdl = build_schema(lazy_pool()).sdl();

        assert!(sdl.contains("input CustomerInput"));
        assert!(sdl.contains("input ProductInput"));
        assert!(sdl.contains("input OrderInput"));
        assert!(sdl.contains("customerId: ID!"));
        assert!(sdl.contains("productIds: [ID!]!"));
        assert!(sdl.contains("orderDate: DateTime"));
    }

    #[tokio::test]
    async fn test_create_product_rejects_zero_price_without_store_access() {
        let schema = build_schema(lazy_pool());
        let response = schema
            .execute(
                r#"mutation {
                    createProduct(input: { name: "Free", price: "0" }) {
                        product { id }
                        message
                        success
                    }
                }"#,
            )
            .await;

        assert!(response.errors.is_empty());
        assert_eq!(
            response.data,
            value!({
                "createProduct": {
                    "product": null,
                    "message": "Price must be positive",
                    "success": false
                }
            })
        );
    }

    #[tokio::test]
    async fn test_create_product_rejects_negative_stock_without_store_access() {
        let schema = build_schema(lazy_pool());
        let response = schema
            .execute(
                r#"mutation {
                    createProduct(input: { name: "Mouse", price: "29.99", stock: -1 }) {
                        message
                        success
                    }
                }"#,
            )
            .await;

        assert!(response.errors.is_empty());
        assert_eq!(
            response.data,
            value!({
                "createProduct": {
                    "message": "Stock cannot be negative",
                    "success": false
                }
            })
        );
    }

    #[tokio::test]
    async fn test_create_order_rejects_malformed_customer_id() {
        let schema = build_schema(lazy_pool());
        let response = schema
            .execute(
                r#"mutation {
                    createOrder(input: { customerId: "not-a-number", productIds: ["1"] }) {
                        order { id }
                        message
                        success
                    }
                }"#,
            )
            .await;

        assert!(response.errors.is_empty());
        assert_eq!(
            response.data,
            value!({
                "createOrder": {
                    "order": null,
                    "message": "Invalid customer ID: not-a-number",
                    "success": false
                }
            })
        );
    }
}
