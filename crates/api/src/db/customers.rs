//! Customer repository for database operations.
//!
//! The insert and existence-check helpers are free functions generic over
//! the executor so the bulk-creation path can run them inside a single
//! transaction; [`CustomerRepository`] wraps them for pool-bound callers.

use sqlx::{PgPool, Postgres, QueryBuilder};

use storegraph_core::{CustomerId, Email};

use super::{Page, RepositoryError, contains_pattern};
use crate::models::customer::{Customer, NewCustomer};

/// Internal row type for `PostgreSQL` customer queries.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: i32,
    name: String,
    email: String,
    phone: Option<String>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: CustomerId::new(row.id),
            name: row.name,
            email,
            // Stored values are trusted; rows may predate format validation
            phone: row.phone.map(storegraph_core::Phone::from_db_value),
        })
    }
}

/// Optional predicates for customer listings.
#[derive(Debug, Default, Clone)]
pub struct CustomerListFilter {
    /// Case-insensitive substring match on the name.
    pub name_contains: Option<String>,
    /// Case-insensitive substring match on the email.
    pub email_contains: Option<String>,
}

/// Check whether a customer with the given email already exists.
///
/// Generic over the executor so the check can observe rows inserted
/// earlier in the same transaction.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn email_exists<'e, E>(executor: E, email: &Email) -> Result<bool, RepositoryError>
where
    E: sqlx::PgExecutor<'e>,
{
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM customers WHERE email = $1)")
            .bind(email.as_str())
            .fetch_one(executor)
            .await?;

    Ok(exists)
}

/// Insert a validated customer record.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` if the email already exists.
/// Returns `RepositoryError::Database` for other database errors.
pub async fn insert<'e, E>(executor: E, new: &NewCustomer) -> Result<Customer, RepositoryError>
where
    E: sqlx::PgExecutor<'e>,
{
    let row: CustomerRow = sqlx::query_as(
        r"
        INSERT INTO customers (name, email, phone)
        VALUES ($1, $2, $3)
        RETURNING id, name, email, phone
        ",
    )
    .bind(&new.name)
    .bind(new.email.as_str())
    .bind(new.phone.as_ref().map(storegraph_core::Phone::as_str))
    .fetch_one(executor)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return RepositoryError::Conflict("email already exists".to_owned());
        }
        RepositoryError::Database(e)
    })?;

    row.try_into()
}

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a customer by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let row: Option<CustomerRow> =
            sqlx::query_as("SELECT id, name, email, phone FROM customers WHERE id = $1")
                .bind(id.as_i32())
                .fetch_optional(self.pool)
                .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Check whether a customer with the given email already exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn email_exists(&self, email: &Email) -> Result<bool, RepositoryError> {
        email_exists(self.pool, email).await
    }

    /// Create a new customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewCustomer) -> Result<Customer, RepositoryError> {
        insert(self.pool, new).await
    }

    /// List customers matching the filter, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn list(
        &self,
        filter: &CustomerListFilter,
        page: &Page,
    ) -> Result<Vec<Customer>, RepositoryError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT id, name, email, phone FROM customers WHERE TRUE",
        );

        if let Some(name) = &filter.name_contains {
            qb.push(" AND name ILIKE ").push_bind(contains_pattern(name));
        }
        if let Some(email) = &filter.email_contains {
            qb.push(" AND email ILIKE ")
                .push_bind(contains_pattern(email));
        }
        if let Some(after) = page.after {
            qb.push(" AND id > ").push_bind(after);
        }
        if let Some(before) = page.before {
            qb.push(" AND id < ").push_bind(before);
        }
        qb.push(if page.descending {
            " ORDER BY id DESC"
        } else {
            " ORDER BY id ASC"
        });
        if let Some(limit) = page.limit {
            qb.push(" LIMIT ").push_bind(limit);
        }

        let rows: Vec<CustomerRow> = qb.build_query_as().fetch_all(self.pool).await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Count all customers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
