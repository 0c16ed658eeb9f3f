//! Product database operations

use anyhow::Result;
use rust_decimal::Decimal;
use sqlx::PgPool;

/// A product record in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRecord {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
}

/// Input for creating a new product
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
}

/// Filter options for querying products
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub name_eq: Option<String>,
    /// Substring match on name (case-insensitive)
    pub name_contains: Option<String>,
    pub name_starts_with: Option<String>,
    pub name_ends_with: Option<String>,
    pub price_gte: Option<Decimal>,
    pub price_lte: Option<Decimal>,
    pub stock_gte: Option<i32>,
    pub stock_lte: Option<i32>,
}

/// Product repository for database operations
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new product
    pub async fn create(&self, product: CreateProduct) -> Result<ProductRecord> {
        let record = sqlx::query_as::<_, ProductRecord>(
            r#"
            INSERT INTO products (name, price, stock)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(product.stock)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Get products matching a set of IDs
    pub async fn get_by_ids(&self, ids: &[i64]) -> Result<Vec<ProductRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let records = sqlx::query_as::<_, ProductRecord>(
            "SELECT * FROM products WHERE id = ANY($1) ORDER BY id",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Get products with filtering and pagination, plus the total match count
    pub async fn list(
        &self,
        mut filter: ProductFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ProductRecord>, i64)> {
        // % and _ in substring needles must match literally, not as wildcards
        for needle in [
            &mut filter.name_contains,
            &mut filter.name_starts_with,
            &mut filter.name_ends_with,
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
        if filter.price_gte.is_some() {
            params_count += 1;
            conditions.push(format!("price >= ${}", params_count));
        }
        if filter.price_lte.is_some() {
            params_count += 1;
            conditions.push(format!("price <= ${}", params_count));
        }
        if filter.stock_gte.is_some() {
            params_count += 1;
            conditions.push(format!("stock >= ${}", params_count));
        }
        if filter.stock_lte.is_some() {
            params_count += 1;
            conditions.push(format!("stock <= ${}", params_count));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        // Count query
        let count_sql = format!("SELECT COUNT(*) as count FROM products {}", where_clause);

        // Data query with limit/offset
        let data_sql = format!(
            "SELECT * FROM products {} ORDER BY id LIMIT ${} OFFSET ${}",
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
        if let Some(v) = filter.price_gte {
            count_query = count_query.bind(v);
        }
        if let Some(v) = filter.price_lte {
            count_query = count_query.bind(v);
        }
        if let Some(v) = filter.stock_gte {
            count_query = count_query.bind(v);
        }
        if let Some(v) = filter.stock_lte {
            count_query = count_query.bind(v);
        }

        let total_count = count_query.fetch_one(&self.pool).await?;

        // Execute data query
        let mut data_query = sqlx::query_as::<_, ProductRecord>(&data_sql);

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
        if let Some(v) = filter.price_gte {
            data_query = data_query.bind(v);
        }
        if let Some(v) = filter.price_lte {
            data_query = data_query.bind(v);
        }
        if let Some(v) = filter.stock_gte {
            data_query = data_query.bind(v);
        }
        if let Some(v) = filter.stock_lte {
            data_query = data_query.bind(v);
        }

        let records = data_query.bind(limit).bind(offset).fetch_all(&self.pool).await?;

        Ok((records, total_count))
    }
}
