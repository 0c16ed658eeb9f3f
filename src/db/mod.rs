//! Database connection and operations

pub mod customers;
pub mod orders;
pub mod products;

use anyhow::Result;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub use customers::{
    CreateCustomer, CustomerFilter, CustomerRecord, CustomerRepository, is_unique_violation,
};
pub use orders::{CreateOrder, OrderFilter, OrderProductRow, OrderRecord, OrderRepository};
pub use products::{CreateProduct, ProductFilter, ProductRecord, ProductRepository};

/// Escape LIKE wildcards in user text bound into an ILIKE pattern
///
/// `%`, `_`, and the escape character itself must match literally when they
/// appear in a substring needle.
pub fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Database wrapper providing connection pool access
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Get the maximum connection pool size from environment or default
    fn get_max_connections() -> u32 {
        std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10)
    }

    /// Create a new database connection pool
    pub async fn connect(url: &str) -> Result<Self> {
        let max_connections = Self::get_max_connections();
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;

        Ok(Self { pool })
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get a customer repository
    pub fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(self.pool.clone())
    }

    /// Get a product repository
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Get an order repository
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.pool.clone())
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::escape_like;

    #[test]
    fn test_plain_text_is_unchanged() {
        assert_eq!(escape_like("alice"), "alice");
        assert_eq!(escape_like("O'Brien & Sons"), "O'Brien & Sons");
    }

    #[test]
    fn test_wildcards_match_literally() {
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("100%_off"), "100\\%\\_off");
    }

    #[test]
    fn test_escape_character_itself_is_escaped() {
        assert_eq!(escape_like(r"C:\temp"), r"C:\\temp");
        assert_eq!(escape_like(r"\%"), r"\\\%");
    }
}
