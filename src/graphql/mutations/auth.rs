//! Account and login mutations
//!
//! Neither mutation requires authentication; login is how a caller obtains
//! the bearer token the protected mutations expect.

use crate::db::CreateUser;

use super::prelude::*;

#[derive(Default)]
pub struct AuthMutations;

#[Object]
impl AuthMutations {
    /// Create a new account.
    ///
    /// `password` is optional so existing two-argument callers keep working;
    /// accounts created without one get the configured initial password.
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        username: String,
        favorite_genre: String,
        password: Option<String>,
    ) -> Result<User> {
        let db = ctx.data_unchecked::<Database>();
        let auth = ctx.data_unchecked::<AuthService>();

        let taken = db
            .users()
            .get_by_username(&username)
            .await
            .map_err(internal_error)?
            .is_some();
        if taken {
            tracing::warn!(username = %username, "user creation rejected: username taken");
            return Err(bad_user_input_for("creating new user failed", &username));
        }

        let password_hash = auth
            .hash_password(password.as_deref().unwrap_or(auth.initial_password()))
            .map_err(|e| internal_error(anyhow::anyhow!(e)))?;

        let record = db
            .users()
            .create(CreateUser {
                username: username.clone(),
                favorite_genre,
                password_hash,
            })
            .await
            .map_err(|e| {
                tracing::warn!(username = %username, error = %e, "user creation failed");
                bad_user_input_for("creating new user failed", &username)
            })?;

        tracing::info!(user_id = %record.id, username = %record.username, "user created");
        Ok(user_record_to_graphql(record))
    }

    /// Authenticate with username and password, returning a bearer token.
    ///
    /// Unknown usernames and wrong passwords produce the same generic error.
    async fn login(&self, ctx: &Context<'_>, username: String, password: String) -> Result<Token> {
        let auth = ctx.data_unchecked::<AuthService>();

        match auth.login(&username, &password).await {
            Ok(value) => {
                tracing::info!(username = %username, "user logged in");
                Ok(Token { value })
            }
            Err(AuthError::InvalidCredentials) => {
                tracing::warn!(username = %username, "login failed");
                Err(bad_user_input("wrong credentials"))
            }
            Err(e) => Err(internal_error(anyhow::anyhow!(e))),
        }
    }
}
