//! GraphQL layer: schema assembly, query/mutation roots, wire types.

pub mod filters;
pub mod mutation;
pub mod query;
pub mod schema;
pub mod types;

pub use mutation::Mutation;
pub use query::Query;
pub use schema::{ApiSchema, build_schema};
