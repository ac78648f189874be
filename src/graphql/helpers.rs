// Helper functions shared across GraphQL query/mutation modules.

use async_graphql::ErrorExtensions;

use crate::db::{AuthorRecord, BookRecord, UserRecord};
use crate::graphql::auth::CurrentUser;
use crate::graphql::types::{Author, Book, User};

/// Convert a BookRecord from the database to a GraphQL Book type
pub(crate) fn book_record_to_graphql(r: BookRecord) -> Book {
    Book {
        id: r.id,
        title: r.title,
        published: r.published,
        genres: Some(r.genres),
        author_id: r.author_id,
    }
}

/// Convert an AuthorRecord from the database to a GraphQL Author type
pub(crate) fn author_record_to_graphql(r: AuthorRecord) -> Author {
    Author {
        id: r.id,
        name: r.name,
        born: r.born,
    }
}

/// Convert a UserRecord from the database to a GraphQL User type
pub(crate) fn user_record_to_graphql(r: UserRecord) -> User {
    User {
        id: r.id,
        username: r.username,
        favorite_genre: r.favorite_genre,
    }
}

/// Convert the request's CurrentUser snapshot to a GraphQL User type
pub(crate) fn current_user_to_graphql(u: &CurrentUser) -> User {
    User {
        id: u.id.clone(),
        username: u.username.clone(),
        favorite_genre: u.favorite_genre.clone(),
    }
}

/// Input-validation error with a stable code
pub(crate) fn bad_user_input(message: impl Into<String>) -> async_graphql::Error {
    async_graphql::Error::new(message).extend_with(|_, e| e.set("code", "BAD_USER_INPUT"))
}

/// Input-validation error naming the offending input value
pub(crate) fn bad_user_input_for(
    message: impl Into<String>,
    invalid_args: &str,
) -> async_graphql::Error {
    let invalid_args = invalid_args.to_string();
    async_graphql::Error::new(message).extend_with(|_, e| {
        e.set("code", "BAD_USER_INPUT");
        e.set("invalidArgs", invalid_args);
    })
}

/// Duplicate-title error naming the conflicting title
pub(crate) fn existing_title_error(title: &str) -> async_graphql::Error {
    let invalid_args = title.to_string();
    async_graphql::Error::new(format!("a book titled '{}' already exists", title)).extend_with(
        |_, e| {
            e.set("code", "EXISTING_BOOK_TITLE");
            e.set("invalidArgs", invalid_args);
        },
    )
}

/// Log an unexpected error and return a generic one; storage error text never
/// reaches the client.
pub(crate) fn internal_error(err: anyhow::Error) -> async_graphql::Error {
    tracing::error!(error = %err, "internal error in resolver");
    async_graphql::Error::new("internal server error")
        .extend_with(|_, e| e.set("code", "INTERNAL_SERVER_ERROR"))
}
