//! Backend services shared across resolvers and transport handlers

pub mod auth;
pub mod events;

pub use auth::{AuthConfig, AuthError, AuthService, TokenClaims};
pub use events::{CatalogEvent, EventBus};
