//! Customer domain types.

use storegraph_core::{CustomerId, Email, EmailError, Phone, PhoneError};

/// A customer account.
#[derive(Debug, Clone)]
pub struct Customer {
    /// Unique customer ID.
    pub id: CustomerId,
    /// Display name.
    pub name: String,
    /// Email address (unique across customers).
    pub email: Email,
    /// Optional phone number.
    pub phone: Option<Phone>,
}

/// Errors that can occur when validating customer input.
#[derive(thiserror::Error, Debug)]
pub enum InvalidCustomer {
    /// The email address is malformed.
    #[error(transparent)]
    Email(#[from] EmailError),
    /// The phone number does not match an accepted format.
    #[error(transparent)]
    Phone(#[from] PhoneError),
}

/// A validated customer record ready for insertion.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: Email,
    /// Optional phone number.
    pub phone: Option<Phone>,
}
