//! API route definitions
//!
//! The primary API is GraphQL at /graphql; the only REST surface is the
//! unauthenticated health endpoints.

pub mod health;
