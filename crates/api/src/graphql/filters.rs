//! Filter inputs for the collection queries.
//!
//! Equality/contains-style predicates translated onto the repository
//! listing filters.

use async_graphql::{Error, ID, InputObject};
use rust_decimal::Decimal;

use storegraph_core::CustomerId;

use crate::db::customers::CustomerListFilter;
use crate::db::orders::OrderListFilter;
use crate::db::products::ProductListFilter;

/// Filter for `allCustomers`.
#[derive(InputObject, Debug, Clone, Default)]
pub struct CustomerFilter {
    /// Case-insensitive substring match on the name.
    pub name: Option<String>,
    /// Case-insensitive substring match on the email.
    pub email: Option<String>,
}

impl From<CustomerFilter> for CustomerListFilter {
    fn from(filter: CustomerFilter) -> Self {
        Self {
            name_contains: filter.name,
            email_contains: filter.email,
        }
    }
}

/// Filter for `allProducts`.
#[derive(InputObject, Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring match on the name.
    pub name: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
}

impl From<ProductFilter> for ProductListFilter {
    fn from(filter: ProductFilter) -> Self {
        Self {
            name_contains: filter.name,
            min_price: filter.min_price,
            max_price: filter.max_price,
        }
    }
}

/// Filter for `allOrders`.
#[derive(InputObject, Debug, Clone, Default)]
pub struct OrderFilter {
    /// Only orders placed by this customer.
    pub customer_id: Option<ID>,
    /// Inclusive lower bound on the total amount.
    pub min_total: Option<Decimal>,
    /// Inclusive upper bound on the total amount.
    pub max_total: Option<Decimal>,
}

impl TryFrom<OrderFilter> for OrderListFilter {
    type Error = Error;

    fn try_from(filter: OrderFilter) -> Result<Self, Self::Error> {
        let customer_id = filter
            .customer_id
            .map(|id| {
                id.as_str()
                    .parse::<CustomerId>()
                    .map_err(|_| Error::new(format!("Invalid ID: {}", id.as_str())))
            })
            .transpose()?;

        Ok(Self {
            customer_id,
            min_total: filter.min_total,
            max_total: filter.max_total,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_filter_maps_to_contains() {
        let filter = CustomerFilter {
            name: Some("ali".to_owned()),
            email: None,
        };
        let db: CustomerListFilter = filter.into();
        assert_eq!(db.name_contains.as_deref(), Some("ali"));
        assert!(db.email_contains.is_none());
    }

    #[test]
    fn test_order_filter_parses_customer_id() {
        let filter = OrderFilter {
            customer_id: Some(ID("7".to_owned())),
            min_total: None,
            max_total: None,
        };
        let db = OrderListFilter::try_from(filter).unwrap();
        assert_eq!(db.customer_id, Some(CustomerId::new(7)));
    }

    #[test]
    fn test_order_filter_rejects_bad_customer_id() {
        let filter = OrderFilter {
            customer_id: Some(ID("not-a-number".to_owned())),
            min_total: None,
            max_total: None,
        };
        assert!(OrderListFilter::try_from(filter).is_err());
    }
}
