//! GraphQL object types for the catalog schema
//!
//! `Author.bookCount` and `Book.author` are field resolvers rather than
//! stored values: the count is recomputed from the books collection on every
//! read, and the author reference is resolved to the full object whenever a
//! book is returned, including books delivered over the subscription.

use async_graphql::{ComplexObject, Context, Result, SimpleObject};

use crate::db::Database;
use crate::graphql::helpers::{author_record_to_graphql, internal_error};

/// A registered account
#[derive(Debug, Clone, SimpleObject)]
pub struct User {
    pub id: String,
    pub username: String,
    pub favorite_genre: String,
}

/// Bearer token issued by the login mutation
#[derive(Debug, Clone, SimpleObject)]
pub struct Token {
    pub value: String,
}

/// A catalog author
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Author {
    pub id: String,
    pub name: String,
    pub born: Option<i32>,
}

#[ComplexObject]
impl Author {
    /// Number of books referencing this author, counted fresh on every read
    async fn book_count(&self, ctx: &Context<'_>) -> Result<i64> {
        let db = ctx.data_unchecked::<Database>();
        db.books()
            .count_by_author(&self.id)
            .await
            .map_err(internal_error)
    }
}

/// A catalog book
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub published: i32,
    pub genres: Option<Vec<String>>,
    #[graphql(skip)]
    pub author_id: String,
}

#[ComplexObject]
impl Book {
    /// The book's author, resolved to the full object
    async fn author(&self, ctx: &Context<'_>) -> Result<Author> {
        let db = ctx.data_unchecked::<Database>();
        let record = db
            .authors()
            .get_by_id(&self.author_id)
            .await
            .map_err(internal_error)?
            .ok_or_else(|| internal_error(anyhow::anyhow!("author missing for book")))?;

        Ok(author_record_to_graphql(record))
    }
}
