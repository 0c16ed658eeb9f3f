//! GraphQL API for the CRM backend
//!
//! This module provides a GraphQL API using async-graphql. It is the single
//! API surface of the service: connection-style queries over customers,
//! products and orders, and the mutations that create them.
//!
//! ## Architecture
//!
//! Resolvers are split into domain-specific modules:
//!
//! 1. `queries/` and `mutations/` hold one file per domain (e.g.
//!    `queries/customers.rs`, `mutations/orders.rs`)
//! 2. Each file defines a struct with `#[derive(Default)]` and an `#[Object]`
//!    impl carrying its resolvers
//! 3. `schema.rs` combines them into `QueryRoot`/`MutationRoot` via
//!    `#[derive(MergedObject)]`
//!
//! Shared plumbing lives beside them: `filters` (the `where` input types and
//! their translation to repository filters), `pagination` (cursor codec and
//! connection wrappers), `types` (output objects and inputs), `validation`
//! (input checks shared by the mutations) and `helpers` (record-to-GraphQL
//! conversions).

pub mod filters;
pub mod helpers;
pub mod mutations;
pub mod pagination;
pub mod queries;
mod schema;
pub mod types;
pub mod validation;

pub use schema::{CrmSchema, build_schema};
