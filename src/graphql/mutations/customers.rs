use super::prelude::*;

/// Outcome of one customer create attempt
enum CreateOutcome {
    Created(CustomerRecord),
    Rejected(ValidationError),
}

/// Run the validation rules for one record and insert it
///
/// Rule failures come back as `Rejected` so the bulk mutation can recover
/// them per record; infrastructure failures propagate. A unique-constraint
/// race on email is folded back into the duplicate-email rejection.
async fn try_create(
    repo: &CustomerRepository,
    input: &CustomerInput,
) -> anyhow::Result<CreateOutcome> {
    if let Err(e) = validate_name(&input.name) {
        return Ok(CreateOutcome::Rejected(e));
    }
    if repo.email_exists(&input.email).await? {
        return Ok(CreateOutcome::Rejected(ValidationError::DuplicateEmail(
            input.email.clone(),
        )));
    }
    if let Err(e) = validate_phone(input.phone.as_deref()) {
        return Ok(CreateOutcome::Rejected(e));
    }

    let create = CreateCustomer {
        name: input.name.clone(),
        email: input.email.clone(),
        phone: input.phone.clone(),
    };
    match repo.create(create).await {
        Ok(record) => Ok(CreateOutcome::Created(record)),
        Err(e) if is_unique_violation(&e) => Ok(CreateOutcome::Rejected(
            ValidationError::DuplicateEmail(input.email.clone()),
        )),
        Err(e) => Err(e),
    }
}

#[derive(Default)]
pub struct CustomerMutations;

#[Object]
impl CustomerMutations {
    /// Create a customer
    ///
    /// Fails if the email is already taken or the phone format is invalid.
    async fn create_customer(
        &self,
        ctx: &Context<'_>,
        customer_data: CustomerInput,
    ) -> Result<CreateCustomerPayload> {
        let db = ctx.data_unchecked::<Database>();
        let repo = db.customers();

        match try_create(&repo, &customer_data)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?
        {
            CreateOutcome::Created(record) => {
                tracing::info!(customer_id = record.id, email = %record.email, "Customer created");
                Ok(CreateCustomerPayload {
                    customer: Some(customer_record_to_graphql(record)),
                    message: "Customer created successfully".to_string(),
                })
            }
            CreateOutcome::Rejected(err) => Err(err.into_graphql()),
        }
    }

    /// Create a batch of customers, skipping records that fail validation
    ///
    /// Each valid record commits on its own, so customers reported as
    /// created stay created even when later records fail. Failed records
    /// are returned in `errors` with their 1-based position.
    async fn bulk_create_customers(
        &self,
        ctx: &Context<'_>,
        customer_list: Vec<CustomerInput>,
    ) -> Result<BulkCreateCustomersPayload> {
        let db = ctx.data_unchecked::<Database>();
        let repo = db.customers();

        let mut customers = Vec::new();
        let mut errors = Vec::new();

        for (idx, input) in customer_list.iter().enumerate() {
            match try_create(&repo, input)
                .await
                .map_err(|e| async_graphql::Error::new(e.to_string()))?
            {
                CreateOutcome::Created(record) => {
                    customers.push(customer_record_to_graphql(record));
                }
                CreateOutcome::Rejected(err) => {
                    errors.push(format!("record {}: {}", idx + 1, err));
                }
            }
        }

        tracing::info!(
            created = customers.len(),
            failed = errors.len(),
            "Bulk customer import finished"
        );

        Ok(BulkCreateCustomersPayload {
            customers,
            errors,
            message: "Bulk customer creation completed".to_string(),
        })
    }
}
