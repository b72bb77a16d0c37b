//! Integration test for the destructive seed routine.
//!
//! Seeding truncates every entity table, so this test must not share a
//! database with the other integration tests while they run.

use storegraph_integration_tests::{TestContext, as_decimal};

#[tokio::test]
#[ignore = "Requires exclusive access to a running PostgreSQL database"]
async fn test_seed_resets_to_the_fixture_set() {
    let ctx = TestContext::new().await;

    let summary = storegraph_api::seed::run(&ctx.pool)
        .await
        .expect("seeding failed");
    assert_eq!(summary.customers, 3);
    assert_eq!(summary.products, 4);
    assert_eq!(summary.orders, 2);

    // Seeding is idempotent: a second run replaces the first
    let summary = storegraph_api::seed::run(&ctx.pool)
        .await
        .expect("re-seeding failed");
    assert_eq!(summary.customers, 3);

    let data = ctx
        .execute_ok(r"{ allCustomers { edges { node { name email phone } } } }")
        .await;
    let edges = data["allCustomers"]["edges"].as_array().expect("edges");
    assert_eq!(edges.len(), 3);
    assert_eq!(edges[0]["node"]["name"], "Alice Johnson");
    assert_eq!(edges[0]["node"]["email"], "alice@example.com");
    assert_eq!(edges[0]["node"]["phone"], "+1234567890");

    let data = ctx
        .execute_ok(r"{ allProducts { edges { node { name price stock } } } }")
        .await;
    let edges = data["allProducts"]["edges"].as_array().expect("edges");
    assert_eq!(edges.len(), 4);
    assert_eq!(edges[0]["node"]["name"], "Laptop");
    assert_eq!(
        as_decimal(&edges[0]["node"]["price"]),
        "999.99".parse().expect("decimal")
    );
    assert_eq!(edges[0]["node"]["stock"], 10);

    let data = ctx
        .execute_ok(
            r"{ allOrders { edges { node { totalAmount customer { email } items { quantity } } } } }",
        )
        .await;
    let edges = data["allOrders"]["edges"].as_array().expect("edges");
    assert_eq!(edges.len(), 2);
    assert_eq!(edges[0]["node"]["customer"]["email"], "alice@example.com");
    assert_eq!(
        as_decimal(&edges[0]["node"]["totalAmount"]),
        "1029.98".parse().expect("decimal")
    );
    assert_eq!(
        edges[0]["node"]["items"].as_array().expect("items").len(),
        2
    );
    assert_eq!(edges[1]["node"]["customer"]["email"], "bob@example.com");
    assert_eq!(
        as_decimal(&edges[1]["node"]["totalAmount"]),
        "379.98".parse().expect("decimal")
    );
}
