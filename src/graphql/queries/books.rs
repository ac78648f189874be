//! Book queries

use super::prelude::*;

#[derive(Default)]
pub struct BookQueries;

#[Object]
impl BookQueries {
    /// Total number of books in the catalog
    async fn book_count(&self, ctx: &Context<'_>) -> Result<i64> {
        let db = ctx.data_unchecked::<Database>();
        db.books().count().await.map_err(internal_error)
    }

    /// All books, optionally filtered by author name and/or genre membership.
    ///
    /// An author name that matches nobody yields an empty list, not an error.
    async fn all_books(
        &self,
        ctx: &Context<'_>,
        author: Option<String>,
        genre: Option<String>,
    ) -> Result<Vec<Book>> {
        let db = ctx.data_unchecked::<Database>();

        let author_id = match author {
            Some(name) => {
                match db
                    .authors()
                    .get_by_name(&name)
                    .await
                    .map_err(internal_error)?
                {
                    Some(author) => Some(author.id),
                    None => return Ok(vec![]),
                }
            }
            None => None,
        };

        let records = db
            .books()
            .list_filtered(author_id.as_deref(), genre.as_deref())
            .await
            .map_err(internal_error)?;

        Ok(records.into_iter().map(book_record_to_graphql).collect())
    }
}
