use super::prelude::*;

#[derive(Default)]
pub struct SystemQueries;

#[Object]
impl SystemQueries {
    /// Fixed greeting, doubles as a liveness probe
    async fn hello(&self) -> Result<String> {
        Ok("Hello, GraphQL!".to_string())
    }

    /// Server version
    async fn version(&self) -> Result<String> {
        Ok(env!("CARGO_PKG_VERSION").to_string())
    }
}
