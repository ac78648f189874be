//! GraphQL authentication context
//!
//! The HTTP and WebSocket handlers derive a [CurrentUser] once per request
//! (see [AuthService::authenticate](crate::services::AuthService::authenticate))
//! and attach it to the request data; resolvers read it back through
//! [AuthExt] and never re-derive or mutate it.

use async_graphql::{Context, ErrorExtensions, Result};
use serde::{Deserialize, Serialize};

/// Snapshot of the authenticated user for one request, or absent for
/// anonymous callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub favorite_genre: String,
}

/// Extension trait to get the authenticated user from the GraphQL context
pub trait AuthExt {
    /// Get the authenticated user, or return an error if not authenticated
    fn current_user(&self) -> Result<&CurrentUser>;

    /// Get the authenticated user if present, or None
    fn try_current_user(&self) -> Option<&CurrentUser>;
}

impl<'a> AuthExt for Context<'a> {
    fn current_user(&self) -> Result<&CurrentUser> {
        self.data_opt::<CurrentUser>().ok_or_else(|| {
            async_graphql::Error::new("not authenticated")
                .extend_with(|_, e| e.set("code", "UNAUTHORIZED"))
        })
    }

    fn try_current_user(&self) -> Option<&CurrentUser> {
        self.data_opt::<CurrentUser>()
    }
}
