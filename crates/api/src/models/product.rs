//! Product domain types.

use rust_decimal::Decimal;

use storegraph_core::ProductId;

/// A catalog product.
#[derive(Debug, Clone)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Current unit price (strictly positive).
    pub price: Decimal,
    /// Units in stock (non-negative).
    pub stock: i32,
}

/// Errors that can occur when validating product input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidProduct {
    /// The price is zero or negative.
    #[error("Price must be positive")]
    NonPositivePrice,
    /// The stock count is negative.
    #[error("Stock cannot be negative")]
    NegativeStock,
}

/// A validated product record ready for insertion.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Units in stock.
    pub stock: i32,
}

impl NewProduct {
    /// Validate raw input fields into an insertable record.
    ///
    /// A missing stock count defaults to zero.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidProduct`] if the price is not strictly positive or
    /// the stock count is negative.
    pub fn parse(
        name: String,
        price: Decimal,
        stock: Option<i32>,
    ) -> Result<Self, InvalidProduct> {
        if price <= Decimal::ZERO {
            return Err(InvalidProduct::NonPositivePrice);
        }

        let stock = stock.unwrap_or(0);
        if stock < 0 {
            return Err(InvalidProduct::NegativeStock);
        }

        Ok(Self { name, price, stock })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let new = NewProduct::parse("Mouse".to_owned(), Decimal::new(2999, 2), Some(50)).unwrap();
        assert_eq!(new.price, Decimal::new(2999, 2));
        assert_eq!(new.stock, 50);
    }

    #[test]
    fn test_parse_stock_defaults_to_zero() {
        let new = NewProduct::parse("Mouse".to_owned(), Decimal::new(2999, 2), None).unwrap();
        assert_eq!(new.stock, 0);
    }

    #[test]
    fn test_parse_zero_price() {
        let err = NewProduct::parse("Free".to_owned(), Decimal::ZERO, None).unwrap_err();
        assert_eq!(err, InvalidProduct::NonPositivePrice);
        assert_eq!(err.to_string(), "Price must be positive");
    }

    #[test]
    fn test_parse_negative_price() {
        let err = NewProduct::parse("Refund".to_owned(), Decimal::new(-5, 0), None).unwrap_err();
        assert_eq!(err, InvalidProduct::NonPositivePrice);
    }

    #[test]
    fn test_parse_negative_stock() {
        let err =
            NewProduct::parse("Mouse".to_owned(), Decimal::new(2999, 2), Some(-1)).unwrap_err();
        assert_eq!(err, InvalidProduct::NegativeStock);
        assert_eq!(err.to_string(), "Stock cannot be negative");
    }
}
