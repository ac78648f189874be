//! GraphQL API with subscriptions for real-time updates
//!
//! This module provides a GraphQL API using async-graphql with support for
//! queries, mutations, and subscriptions over WebSocket.
//!
//! This is the single API surface for the Alexandria backend. Per-domain
//! resolver modules live under `queries/` and `mutations/` and are combined
//! into the roots in `schema.rs` with `MergedObject`.

pub mod auth;
pub mod helpers;
pub mod mutations;
pub mod queries;
mod schema;
mod subscriptions;
pub mod types;

pub use auth::CurrentUser;
pub use schema::{CatalogSchema, MutationRoot, QueryRoot, build_schema};
pub use types::{Author, Book, Token, User};
