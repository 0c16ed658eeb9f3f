//! Order database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

/// An order record in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderRecord {
    pub id: i64,
    pub customer_id: i64,
    pub order_date: DateTime<Utc>,
    pub total_amount: Decimal,
}

/// Input for creating a new order with its product associations
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub customer_id: i64,
    pub product_ids: Vec<i64>,
    pub order_date: DateTime<Utc>,
    pub total_amount: Decimal,
}

/// A product row joined through the order/product association table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderProductRow {
    pub order_id: i64,
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
}

/// Filter options for querying orders
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub total_gte: Option<Decimal>,
    pub total_lte: Option<Decimal>,
    /// Bounds on the calendar year of order_date
    pub date_year_gte: Option<i32>,
    pub date_year_lte: Option<i32>,
    /// Bounds on the calendar month of order_date
    pub date_month_gte: Option<i32>,
    pub date_month_lte: Option<i32>,
    /// Matches against the owning customer's name
    pub customer_name_eq: Option<String>,
    pub customer_name_contains: Option<String>,
    pub customer_name_starts_with: Option<String>,
    pub customer_name_ends_with: Option<String>,
    /// Matches orders containing at least one product with a matching name
    pub product_name_eq: Option<String>,
    pub product_name_contains: Option<String>,
    pub product_name_starts_with: Option<String>,
    pub product_name_ends_with: Option<String>,
}

const PRODUCT_EXISTS: &str =
    "EXISTS (SELECT 1 FROM order_products op JOIN products p ON p.id = op.product_id \
     WHERE op.order_id = o.id AND";

/// Order repository for database operations
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an order and its product association rows in one transaction
    pub async fn create_with_products(&self, order: CreateOrder) -> Result<OrderRecord> {
        let mut tx = self.pool.begin().await?;

        let record = sqlx::query_as::<_, OrderRecord>(
            r#"
            INSERT INTO orders (customer_id, order_date, total_amount)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(order.customer_id)
        .bind(order.order_date)
        .bind(order.total_amount)
        .fetch_one(&mut *tx)
        .await?;

        // Repeated product ids collapse into a single association row
        for product_id in &order.product_ids {
            sqlx::query(
                r#"
                INSERT INTO order_products (order_id, product_id)
                VALUES ($1, $2)
                ON CONFLICT (order_id, product_id) DO NOTHING
                "#,
            )
            .bind(record.id)
            .bind(product_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(record)
    }

    /// Get the products associated with a set of orders in one query
    pub async fn products_for_orders(&self, order_ids: &[i64]) -> Result<Vec<OrderProductRow>> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, OrderProductRow>(
            r#"
            SELECT op.order_id, p.id, p.name, p.price, p.stock
            FROM order_products op
            JOIN products p ON p.id = op.product_id
            WHERE op.order_id = ANY($1)
            ORDER BY op.order_id, p.id
            "#,
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Get orders with filtering and pagination, plus the total match count
    ///
    /// Customer-name predicates traverse the owning customer; product-name
    /// predicates match orders containing at least one matching product.
    pub async fn list(
        &self,
        mut filter: OrderFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<OrderRecord>, i64)> {
        // % and _ in substring needles must match literally, not as wildcards
        for needle in [
            &mut filter.customer_name_contains,
            &mut filter.customer_name_starts_with,
            &mut filter.customer_name_ends_with,
            &mut filter.product_name_contains,
            &mut filter.product_name_starts_with,
            &mut filter.product_name_ends_with,
        ] {
            if let Some(v) = needle {
                *v = super::escape_like(v);
            }
        }

        // Build the WHERE clause dynamically
        let mut conditions = Vec::new();
        let mut params_count = 0;

        if filter.total_gte.is_some() {
            params_count += 1;
            conditions.push(format!("o.total_amount >= ${}", params_count));
        }
        if filter.total_lte.is_some() {
            params_count += 1;
            conditions.push(format!("o.total_amount <= ${}", params_count));
        }
        if filter.date_year_gte.is_some() {
            params_count += 1;
            conditions.push(format!("EXTRACT(YEAR FROM o.order_date) >= ${}", params_count));
        }
        if filter.date_year_lte.is_some() {
            params_count += 1;
            conditions.push(format!("EXTRACT(YEAR FROM o.order_date) <= ${}", params_count));
        }
        if filter.date_month_gte.is_some() {
            params_count += 1;
            conditions.push(format!("EXTRACT(MONTH FROM o.order_date) >= ${}", params_count));
        }
        if filter.date_month_lte.is_some() {
            params_count += 1;
            conditions.push(format!("EXTRACT(MONTH FROM o.order_date) <= ${}", params_count));
        }
        if filter.customer_name_eq.is_some() {
            params_count += 1;
            conditions.push(format!("c.name = ${}", params_count));
        }
        if filter.customer_name_contains.is_some() {
            params_count += 1;
            conditions.push(format!("c.name ILIKE '%' || ${} || '%'", params_count));
        }
        if filter.customer_name_starts_with.is_some() {
            params_count += 1;
            conditions.push(format!("c.name ILIKE ${} || '%'", params_count));
        }
        if filter.customer_name_ends_with.is_some() {
            params_count += 1;
            conditions.push(format!("c.name ILIKE '%' || ${}", params_count));
        }
        if filter.product_name_eq.is_some() {
            params_count += 1;
            conditions.push(format!("{} p.name = ${})", PRODUCT_EXISTS, params_count));
        }
        if filter.product_name_contains.is_some() {
            params_count += 1;
            conditions.push(format!(
                "{} p.name ILIKE '%' || ${} || '%')",
                PRODUCT_EXISTS, params_count
            ));
        }
        if filter.product_name_starts_with.is_some() {
            params_count += 1;
            conditions.push(format!("{} p.name ILIKE ${} || '%')", PRODUCT_EXISTS, params_count));
        }
        if filter.product_name_ends_with.is_some() {
            params_count += 1;
            conditions.push(format!("{} p.name ILIKE '%' || ${})", PRODUCT_EXISTS, params_count));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        // Count query
        let count_sql = format!(
            "SELECT COUNT(*) as count FROM orders o JOIN customers c ON c.id = o.customer_id {}",
            where_clause
        );

        // Data query with limit/offset
        let data_sql = format!(
            "SELECT o.* FROM orders o JOIN customers c ON c.id = o.customer_id {} \
             ORDER BY o.id LIMIT ${} OFFSET ${}",
            where_clause,
            params_count + 1,
            params_count + 2
        );

        // Execute count query
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);

        if let Some(v) = filter.total_gte {
            count_query = count_query.bind(v);
        }
        if let Some(v) = filter.total_lte {
            count_query = count_query.bind(v);
        }
        if let Some(v) = filter.date_year_gte {
            count_query = count_query.bind(v);
        }
        if let Some(v) = filter.date_year_lte {
            count_query = count_query.bind(v);
        }
        if let Some(v) = filter.date_month_gte {
            count_query = count_query.bind(v);
        }
        if let Some(v) = filter.date_month_lte {
            count_query = count_query.bind(v);
        }
        if let Some(ref v) = filter.customer_name_eq {
            count_query = count_query.bind(v);
        }
        if let Some(ref v) = filter.customer_name_contains {
            count_query = count_query.bind(v);
        }
        if let Some(ref v) = filter.customer_name_starts_with {
            count_query = count_query.bind(v);
        }
        if let Some(ref v) = filter.customer_name_ends_with {
            count_query = count_query.bind(v);
        }
        if let Some(ref v) = filter.product_name_eq {
            count_query = count_query.bind(v);
        }
        if let Some(ref v) = filter.product_name_contains {
            count_query = count_query.bind(v);
        }
        if let Some(ref v) = filter.product_name_starts_with {
            count_query = count_query.bind(v);
        }
        if let Some(ref v) = filter.product_name_ends_with {
            count_query = count_query.bind(v);
        }

        let total_count = count_query.fetch_one(&self.pool).await?;

        // Execute data query
        let mut data_query = sqlx::query_as::<_, OrderRecord>(&data_sql);

        if let Some(v) = filter.total_gte {
            data_query = data_query.bind(v);
        }
        if let Some(v) = filter.total_lte {
            data_query = data_query.bind(v);
        }
        if let Some(v) = filter.date_year_gte {
            data_query = data_query.bind(v);
        }
        if let Some(v) = filter.date_year_lte {
            data_query = data_query.bind(v);
        }
        if let Some(v) = filter.date_month_gte {
            data_query = data_query.bind(v);
        }
        if let Some(v) = filter.date_month_lte {
            data_query = data_query.bind(v);
        }
        if let Some(ref v) = filter.customer_name_eq {
            data_query = data_query.bind(v);
        }
        if let Some(ref v) = filter.customer_name_contains {
            data_query = data_query.bind(v);
        }
        if let Some(ref v) = filter.customer_name_starts_with {
            data_query = data_query.bind(v);
        }
        if let Some(ref v) = filter.customer_name_ends_with {
            data_query = data_query.bind(v);
        }
        if let Some(ref v) = filter.product_name_eq {
            data_query = data_query.bind(v);
        }
        if let Some(ref v) = filter.product_name_contains {
            data_query = data_query.bind(v);
        }
        if let Some(ref v) = filter.product_name_starts_with {
            data_query = data_query.bind(v);
        }
        if let Some(ref v) = filter.product_name_ends_with {
            data_query = data_query.bind(v);
        }

        let records = data_query.bind(limit).bind(offset).fetch_all(&self.pool).await?;

        Ok((records, total_count))
    }
}
