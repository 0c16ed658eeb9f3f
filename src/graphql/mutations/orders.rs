use super::prelude::*;

#[derive(Default)]
pub struct OrderMutations;

#[Object]
impl OrderMutations {
    /// Create an order for an existing customer and set of products
    ///
    /// The total amount is the sum of the referenced products' current
    /// prices; the order row and its product associations are written in
    /// one transaction.
    async fn create_order(
        &self,
        ctx: &Context<'_>,
        order_data: OrderInput,
    ) -> Result<CreateOrderPayload> {
        let db = ctx.data_unchecked::<Database>();

        let customer_id = order_data
            .customer_id
            .parse::<i64>()
            .map_err(|e| async_graphql::Error::new(format!("Invalid customer ID: {}", e)))?;

        let customer = db
            .customers()
            .get_by_id(customer_id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?
            .ok_or_else(|| ValidationError::CustomerNotFound(customer_id).into_graphql())?;

        if order_data.product_ids.is_empty() {
            return Err(ValidationError::EmptyProductList.into_graphql());
        }

        let mut product_ids = Vec::with_capacity(order_data.product_ids.len());
        for raw in &order_data.product_ids {
            let id = raw
                .parse::<i64>()
                .map_err(|e| async_graphql::Error::new(format!("Invalid product ID: {}", e)))?;
            product_ids.push(id);
        }

        let mut unique_ids = product_ids.clone();
        unique_ids.sort_unstable();
        unique_ids.dedup();

        let fetched = db
            .products()
            .get_by_ids(&unique_ids)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        let by_id: HashMap<i64, ProductRecord> =
            fetched.into_iter().map(|p| (p.id, p)).collect();

        // Every listed occurrence becomes a line item; the first missing id
        // aborts with its input position.
        let mut line_items = Vec::with_capacity(product_ids.len());
        for (idx, id) in product_ids.iter().enumerate() {
            match by_id.get(id) {
                Some(p) => line_items.push(p.clone()),
                None => {
                    return Err(ValidationError::ProductNotFound {
                        position: idx + 1,
                        id: *id,
                    }
                    .into_graphql());
                }
            }
        }

        let total_amount = order_total(&line_items);
        let order_date = order_data.order_date.unwrap_or_else(Utc::now);

        let record = db
            .orders()
            .create_with_products(CreateOrder {
                customer_id,
                product_ids,
                order_date,
                total_amount,
            })
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        tracing::info!(
            order_id = record.id,
            customer_id,
            total_amount = %record.total_amount,
            "Order created"
        );

        let mut seen = HashSet::new();
        let products: Vec<Product> = line_items
            .into_iter()
            .filter(|p| seen.insert(p.id))
            .map(product_record_to_graphql)
            .collect();

        let order = order_record_to_graphql(record, customer_record_to_graphql(customer), products);

        Ok(CreateOrderPayload {
            order: Some(order),
            message: "Order created successfully".to_string(),
        })
    }
}
