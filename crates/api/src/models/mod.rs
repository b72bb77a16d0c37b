//! Domain types for the Storegraph entities.
//!
//! Plain records with explicit foreign-key fields; nothing here persists
//! itself. The `New*` types are the validated inputs the repositories
//! accept for inserts.

pub mod customer;
pub mod order;
pub mod product;

pub use customer::{Customer, InvalidCustomer, NewCustomer};
pub use order::{NewOrderItem, Order, OrderItem};
pub use product::{InvalidProduct, NewProduct, Product};
