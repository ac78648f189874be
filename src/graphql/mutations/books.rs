//! Book mutations

use crate::db::CreateBook;

use super::prelude::*;

#[derive(Default)]
pub struct BookMutations;

#[Object]
impl BookMutations {
    /// Add a book to the catalog, creating its author on first mention.
    ///
    /// Requires authentication. The author write is confirmed before the
    /// book write, so a crash in between can leave an author with zero books
    /// but never a book pointing at a missing author. The book-added event is
    /// published only after the book persist is confirmed.
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        title: String,
        author: String,
        published: i32,
        genres: Option<Vec<String>>,
    ) -> Result<Book> {
        let user = ctx.current_user()?;
        let db = ctx.data_unchecked::<Database>();
        let events = ctx.data_unchecked::<Arc<EventBus>>();

        let duplicate = db
            .books()
            .get_by_title(&title)
            .await
            .map_err(internal_error)?
            .is_some();
        if duplicate {
            tracing::warn!(title = %title, "add book rejected: duplicate title");
            return Err(existing_title_error(&title));
        }

        let author_record = match db
            .authors()
            .get_by_name(&author)
            .await
            .map_err(internal_error)?
        {
            Some(record) => record,
            None => db.authors().create(&author).await.map_err(|e| {
                tracing::warn!(author = %author, error = %e, "author creation failed");
                bad_user_input_for("cannot add author", &author)
            })?,
        };

        let record = db
            .books()
            .create(CreateBook {
                title: title.clone(),
                published,
                author_id: author_record.id,
                genres: genres.unwrap_or_default(),
            })
            .await
            .map_err(|e| {
                tracing::warn!(title = %title, error = %e, "saving book failed");
                bad_user_input_for("saving book failed", &title)
            })?;

        tracing::info!(
            book_id = %record.id,
            title = %record.title,
            author = %author,
            added_by = %user.username,
            "book added"
        );

        events.publish(CatalogEvent::BookAdded {
            book: record.clone(),
        });

        Ok(book_record_to_graphql(record))
    }
}
