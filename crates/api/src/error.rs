//! Error handling at the mutation boundary.
//!
//! Mutations never surface a transport-level GraphQL error for business
//! outcomes; every failure is converted into the `{entity, message,
//! success}` envelope. Two kinds of failure exist and differ only in
//! message wording:
//!
//! - business validation faults carry their message verbatim
//! - anything else is wrapped as `Error <doing X>: <detail>`

use thiserror::Error;

use crate::db::RepositoryError;
use crate::models::{InvalidCustomer, InvalidProduct};

/// A failure reported inside a mutation envelope.
#[derive(Debug, Error)]
pub enum MutationError {
    /// A business-rule violation with a client-facing message.
    #[error("{0}")]
    Validation(String),

    /// An unexpected fault from the data layer.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl MutationError {
    /// A business validation failure with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// The envelope message for this failure.
    ///
    /// `action` names the attempted operation ("creating customer", ...)
    /// and is only used for the unexpected-fault wording.
    #[must_use]
    pub fn into_message(self, action: &str) -> String {
        match self {
            Self::Validation(message) => message,
            Self::Repository(err) => format!("Error {action}: {err}"),
        }
    }
}

impl From<InvalidCustomer> for MutationError {
    fn from(err: InvalidCustomer) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<InvalidProduct> for MutationError {
    fn from(err: InvalidProduct) -> Self {
        Self::Validation(err.to_string())
    }
}
