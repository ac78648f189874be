//! Author mutations

use super::prelude::*;

#[derive(Default)]
pub struct AuthorMutations;

#[Object]
impl AuthorMutations {
    /// Set an author's birth year.
    ///
    /// Requires authentication. An unknown author name is a valid no-op and
    /// returns null rather than an error, so callers can tell "nothing to
    /// update" apart from an authorization failure.
    async fn edit_author(
        &self,
        ctx: &Context<'_>,
        name: String,
        set_born_to: i32,
    ) -> Result<Option<Author>> {
        let _user = ctx.current_user()?;
        let db = ctx.data_unchecked::<Database>();

        let Some(author) = db
            .authors()
            .get_by_name(&name)
            .await
            .map_err(internal_error)?
        else {
            return Ok(None);
        };

        let updated = db
            .authors()
            .set_born(&author.id, set_born_to)
            .await
            .map_err(internal_error)?;

        Ok(updated.map(author_record_to_graphql))
    }
}
