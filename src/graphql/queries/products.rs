use super::prelude::*;

#[derive(Default)]
pub struct ProductQueries;

#[Object]
impl ProductQueries {
    /// Get all products with optional filtering and cursor pagination
    async fn all_products(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        r#where: Option<ProductWhereInput>,
    ) -> Result<ProductConnection> {
        let db = ctx.data_unchecked::<Database>();

        let (offset, limit) =
            parse_pagination_args(first, after).map_err(async_graphql::Error::new)?;

        let filter = r#where
            .map(ProductWhereInput::into_filter)
            .unwrap_or_default();

        let (records, total) = db
            .products()
            .list(filter, limit, offset)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        let products: Vec<Product> = records
            .into_iter()
            .map(product_record_to_graphql)
            .collect();
        let connection = Connection::from_items(products, offset, total);

        Ok(ProductConnection::from_connection(connection))
    }
}
