use super::prelude::*;

#[derive(Default)]
pub struct OrderQueries;

#[Object]
impl OrderQueries {
    /// Get all orders with optional filtering and cursor pagination
    ///
    /// The owning customer and the product list are batch-loaded for the
    /// whole page, one query each.
    async fn all_orders(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        r#where: Option<OrderWhereInput>,
    ) -> Result<OrderConnection> {
        let db = ctx.data_unchecked::<Database>();

        let (offset, limit) =
            parse_pagination_args(first, after).map_err(async_graphql::Error::new)?;

        let filter = r#where.map(OrderWhereInput::into_filter).unwrap_or_default();

        let (records, total) = db
            .orders()
            .list(filter, limit, offset)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        let order_ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        let mut customer_ids: Vec<i64> = records.iter().map(|r| r.customer_id).collect();
        customer_ids.sort_unstable();
        customer_ids.dedup();

        let customers = db
            .customers()
            .get_by_ids(&customer_ids)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        let customers_by_id: HashMap<i64, Customer> = customers
            .into_iter()
            .map(|c| (c.id, customer_record_to_graphql(c)))
            .collect();

        let product_rows = db
            .orders()
            .products_for_orders(&order_ids)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        let mut products_by_order = group_order_products(product_rows);

        let mut orders = Vec::with_capacity(records.len());
        for record in records {
            let customer = customers_by_id
                .get(&record.customer_id)
                .cloned()
                .ok_or_else(|| {
                    async_graphql::Error::new(format!(
                        "Order {} references missing customer {}",
                        record.id, record.customer_id
                    ))
                })?;
            let products = products_by_order.remove(&record.id).unwrap_or_default();
            orders.push(order_record_to_graphql(record, customer, products));
        }

        let connection = Connection::from_items(orders, offset, total);
        Ok(OrderConnection::from_connection(connection))
    }
}
