//! Author queries

use super::prelude::*;

#[derive(Default)]
pub struct AuthorQueries;

#[Object]
impl AuthorQueries {
    /// Total number of authors in the catalog
    async fn author_count(&self, ctx: &Context<'_>) -> Result<i64> {
        let db = ctx.data_unchecked::<Database>();
        db.authors().count().await.map_err(internal_error)
    }

    /// All authors, including those with no books yet.
    ///
    /// Each author's bookCount field is computed per read (see
    /// [Author](crate::graphql::types::Author)).
    async fn all_authors(&self, ctx: &Context<'_>) -> Result<Vec<Author>> {
        let db = ctx.data_unchecked::<Database>();
        let records = db.authors().list_all().await.map_err(internal_error)?;

        Ok(records.into_iter().map(author_record_to_graphql).collect())
    }
}
