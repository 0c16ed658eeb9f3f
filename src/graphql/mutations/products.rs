use super::prelude::*;

#[derive(Default)]
pub struct ProductMutations;

#[Object]
impl ProductMutations {
    /// Create a product
    ///
    /// Price must be positive; stock defaults to 0 and cannot be negative.
    async fn create_product(
        &self,
        ctx: &Context<'_>,
        product_data: ProductInput,
    ) -> Result<CreateProductPayload> {
        let db = ctx.data_unchecked::<Database>();

        validate_price(product_data.price).map_err(ValidationError::into_graphql)?;
        let stock = validate_stock(product_data.stock).map_err(ValidationError::into_graphql)?;

        let record = db
            .products()
            .create(CreateProduct {
                name: product_data.name,
                price: product_data.price,
                stock,
            })
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        tracing::info!(product_id = record.id, price = %record.price, "Product created");

        Ok(CreateProductPayload {
            product: Some(product_record_to_graphql(record)),
            message: "Product created successfully".to_string(),
        })
    }
}
