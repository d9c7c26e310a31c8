//! talawa-graphql - Talawa backend over the GraphQL API.

mod backend;
mod client;
mod queries;

pub use backend::GraphqlBackend;
pub use client::{DEFAULT_TIMEOUT, GraphqlClient};
