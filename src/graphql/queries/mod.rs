pub mod customers;
pub mod orders;
pub mod products;
pub mod system;

pub use customers::CustomerQueries;
pub use orders::OrderQueries;
pub use products::ProductQueries;
pub use system::SystemQueries;

pub(crate) mod prelude {
    pub(crate) use std::collections::HashMap;

    pub(crate) use async_graphql::{Context, Object, Result};

    pub(crate) use crate::db::*;
    pub(crate) use crate::graphql::filters::*;
    pub(crate) use crate::graphql::helpers::*;
    pub(crate) use crate::graphql::pagination::{Connection, parse_pagination_args};
    pub(crate) use crate::graphql::types::*;
}
