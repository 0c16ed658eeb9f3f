//! GraphQL schema definition with queries and mutations
//!
//! This is the single API surface for the CRM backend. Resolvers live in
//! domain-specific modules under `queries/` and `mutations/`; this file
//! only merges them into the two root objects and wires in shared state.

use async_graphql::{EmptySubscription, MergedObject, Schema};

use crate::db::Database;

use super::mutations::{CustomerMutations, OrderMutations, ProductMutations};
use super::queries::{CustomerQueries, OrderQueries, ProductQueries, SystemQueries};

/// The GraphQL schema type
pub type CrmSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Root query object, merged from the per-domain query structs.
#[derive(MergedObject, Default)]
pub struct QueryRoot(
    SystemQueries,
    CustomerQueries,
    ProductQueries,
    OrderQueries,
);

/// Root mutation object, merged from the per-domain mutation structs.
#[derive(MergedObject, Default)]
pub struct MutationRoot(CustomerMutations, ProductMutations, OrderMutations);

/// Build the GraphQL schema with all resolvers
pub fn build_schema(db: Database) -> CrmSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(db)
    .finish()
}
