use super::prelude::*;

#[derive(Default)]
pub struct CustomerQueries;

#[Object]
impl CustomerQueries {
    /// Get all customers with optional filtering and cursor pagination
    async fn all_customers(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        r#where: Option<CustomerWhereInput>,
    ) -> Result<CustomerConnection> {
        let db = ctx.data_unchecked::<Database>();

        let (offset, limit) =
            parse_pagination_args(first, after).map_err(async_graphql::Error::new)?;

        let filter = r#where
            .map(CustomerWhereInput::into_filter)
            .unwrap_or_default();

        let (records, total) = db
            .customers()
            .list(filter, limit, offset)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        let customers: Vec<Customer> = records
            .into_iter()
            .map(customer_record_to_graphql)
            .collect();
        let connection = Connection::from_items(customers, offset, total);

        Ok(CustomerConnection::from_connection(connection))
    }
}
