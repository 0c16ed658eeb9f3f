//! API route definitions
//!
//! The primary API is GraphQL at /graphql. The only REST surface is the
//! pair of health endpoints used by deploy probes.

pub mod health;
