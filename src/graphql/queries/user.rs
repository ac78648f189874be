//! Identity queries

use super::prelude::*;

#[derive(Default)]
pub struct UserQueries;

#[Object]
impl UserQueries {
    /// The authenticated user for this request, or null for anonymous callers
    async fn me(&self, ctx: &Context<'_>) -> Option<User> {
        ctx.try_current_user().map(current_user_to_graphql)
    }
}
