//! Customer database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// A customer record in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CustomerRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new customer
#[derive(Debug, Clone)]
pub struct CreateCustomer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Filter options for querying customers
#[derive(Debug, Clone, Default)]
pub struct CustomerFilter {
    pub name_eq: Option<String>,
    /// Substring match on name (case-insensitive)
    pub name_contains: Option<String>,
    pub name_starts_with: Option<String>,
    pub name_ends_with: Option<String>,
    pub email_eq: Option<String>,
    /// Substring match on email (case-insensitive)
    pub email_contains: Option<String>,
    pub email_starts_with: Option<String>,
    pub email_ends_with: Option<String>,
    /// Case-insensitive regex match against the stored phone (e.g. "^\\+1")
    pub phone_pattern: Option<String>,
    /// Bounds on the calendar year of created_at
    pub created_year_gte: Option<i32>,
    pub created_year_lte: Option<i32>,
    /// Bounds on the calendar month of created_at
    pub created_month_gte: Option<i32>,
    pub created_month_lte: Option<i32>,
}

/// Check whether an error is a unique-constraint violation from the database
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false)
}

/// Customer repository for database operations
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Check whether a customer with this email already exists
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM customers WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Insert a new customer
    pub async fn create(&self, customer: CreateCustomer) -> Result<CustomerRecord> {
        let record = sqlx::query_as::<_, CustomerRecord>(
            r#"
            INSERT INTO customers (name, email, phone)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(customer.phone.as_deref().unwrap_or(""))
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Get a single customer by ID
    pub async fn get_by_id(&self, id: i64) -> Result<Option<CustomerRecord>> {
        let record = sqlx::query_as::<_, CustomerRecord>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    /// Get customers matching a set of IDs
    pub async fn get_by_ids(&self, ids: &[i64]) -> Result<Vec<CustomerRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let records = sqlx::query_as::<_, CustomerRecord>(
            "SELECT * FROM customers WHERE id = ANY($1) ORDER BY id",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Get customers with filtering and pagination, plus the total match count
    pub async fn list(
        &self,
        mut filter: CustomerFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<CustomerRecord>, i64)> {
        // % and _ in substring needles must match literally, not as wildcards
        for needle in [
            &mut filter.name_contains,
            &mut filter.name_starts_with,
            &mut filter.name_ends_with,
            &mut filter.email_contains,
            &mut filter.email_starts_with,
            &mut filter.email_ends_with,
        ] {
            if let Some(v) = needle {
                *v = super::escape_like(v);
            }
        }

        // Build the WHERE clause dynamically
        let mut conditions = Vec::new();
        let mut params_count = 0;

        if filter.name_eq.is_some() {
            params_count += 1;
            conditions.push(format!("name = ${}", params_count));
        }
        if filter.name_contains.is_some() {
            params_count += 1;
            conditions.push(format!("name ILIKE '%' || ${} || '%'", params_count));
        }
        if filter.name_starts_with.is_some() {
            params_count += 1;
            conditions.push(format!("name ILIKE ${} || '%'", params_count));
        }
        if filter.name_ends_with.is_some() {
            params_count += 1;
            conditions.push(format!("name ILIKE '%' || ${}", params_count));
        }
        if filter.email_eq.is_some() {
            params_count += 1;
            conditions.push(format!("email = ${}", params_count));
        }
        if filter.email_contains.is_some() {
            params_count += 1;
            conditions.push(format!("email ILIKE '%' || ${} || '%'", params_count));
        }
        if filter.email_starts_with.is_some() {
            params_count += 1;
            conditions.push(format!("email ILIKE ${} || '%'", params_count));
        }
        if filter.email_ends_with.is_some() {
            params_count += 1;
            conditions.push(format!("email ILIKE '%' || ${}", params_count));
        }
        if filter.phone_pattern.is_some() {
            params_count += 1;
            conditions.push(format!("phone ~* ${}", params_count));
        }
        if filter.created_year_gte.is_some() {
            params_count += 1;
            conditions.push(format!("EXTRACT(YEAR FROM created_at) >= ${}", params_count));
        }
        if filter.created_year_lte.is_some() {
            params_count += 1;
            conditions.push(format!("EXTRACT(YEAR FROM created_at) <= ${}", params_count));
        }
        if filter.created_month_gte.is_some() {
            params_count += 1;
            conditions.push(format!("EXTRACT(MONTH FROM created_at) >= ${}", params_count));
        }
        if filter.created_month_lte.is_some() {
            params_count += 1;
            conditions.push(format!("EXTRACT(MONTH FROM created_at) <= ${}", params_count));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        // Count query
        let count_sql = format!("SELECT COUNT(*) as count FROM customers {}", where_clause);

        // Data query with limit/offset
        let data_sql = format!(
            "SELECT * FROM customers {} ORDER BY id LIMIT ${} OFFSET ${}",
            where_clause,
            params_count + 1,
            params_count + 2
        );

        // Execute count query
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);

        if let Some(ref v) = filter.name_eq {
            count_query = count_query.bind(v);
        }
        if let Some(ref v) = filter.name_contains {
            count_query = count_query.bind(v);
        }
        if let Some(ref v) = filter.name_starts_with {
            count_query = count_query.bind(v);
        }
        if let Some(ref v) = filter.name_ends_with {
            count_query = count_query.bind(v);
        }
        if let Some(ref v) = filter.email_eq {
            count_query = count_query.bind(v);
        }
        if let Some(ref v) = filter.email_contains {
            count_query = count_query.bind(v);
        }
        if let Some(ref v) = filter.email_starts_with {
            count_query = count_query.bind(v);
        }
        if let Some(ref v) = filter.email_ends_with {
            count_query = count_query.bind(v);
        }
        if let Some(ref v) = filter.phone_pattern {
            count_query = count_query.bind(v);
        }
        if let Some(v) = filter.created_year_gte {
            count_query = count_query.bind(v);
        }
        if let Some(v) = filter.created_year_lte {
            count_query = count_query.bind(v);
        }
        if let Some(v) = filter.created_month_gte {
            count_query = count_query.bind(v);
        }
        if let Some(v) = filter.created_month_lte {
            count_query = count_query.bind(v);
        }

        let total_count = count_query.fetch_one(&self.pool).await?;

        // Execute data query
        let mut data_query = sqlx::query_as::<_, CustomerRecord>(&data_sql);

        if let Some(ref v) = filter.name_eq {
            data_query = data_query.bind(v);
        }
        if let Some(ref v) = filter.name_contains {
            data_query = data_query.bind(v);
        }
        if let Some(ref v) = filter.name_starts_with {
            data_query = data_query.bind(v);
        }
        if let Some(ref v) = filter.name_ends_with {
            data_query = data_query.bind(v);
        }
        if let Some(ref v) = filter.email_eq {
            data_query = data_query.bind(v);
        }
        if let Some(ref v) = filter.email_contains {
            data_query = data_query.bind(v);
        }
        if let Some(ref v) = filter.email_starts_with {
            data_query = data_query.bind(v);
        }
        if let Some(ref v) = filter.email_ends_with {
            data_query = data_query.bind(v);
        }
        if let Some(ref v) = filter.phone_pattern {
            data_query = data_query.bind(v);
        }
        if let Some(v) = filter.created_year_gte {
            data_query = data_query.bind(v);
        }
        if let Some(v) = filter.created_year_lte {
            data_query = data_query.bind(v);
        }
        if let Some(v) = filter.created_month_gte {
            data_query = data_query.bind(v);
        }
        if let Some(v) = filter.created_month_lte {
            data_query = data_query.bind(v);
        }

        let records = data_query.bind(limit).bind(offset).fetch_all(&self.pool).await?;

        Ok((records, total_count))
    }
}
