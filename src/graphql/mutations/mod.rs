pub mod customers;
pub mod orders;
pub mod products;

pub use customers::CustomerMutations;
pub use orders::OrderMutations;
pub use products::ProductMutations;

pub(crate) mod prelude {
    pub(crate) use std::collections::{HashMap, HashSet};

    pub(crate) use async_graphql::{Context, Object, Result};
    pub(crate) use chrono::Utc;

    pub(crate) use crate::db::*;
    pub(crate) use crate::graphql::helpers::*;
    pub(crate) use crate::graphql::types::*;
    pub(crate) use crate::graphql::validation::*;
}
