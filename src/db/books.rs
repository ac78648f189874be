//! Books repository
//!
//! Titles are unique across the whole collection. Each book holds a one-way
//! reference to its author; reverse associations (per-author counts) are
//! computed here at query time, never stored. Genres are stored as a JSON
//! array column and filtered on membership with `json_each`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::sqlite_helpers::{json_to_vec, now_iso8601, vec_to_json};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: String,
    pub title: String,
    pub published: i32,
    pub author_id: String,
    pub genres: Vec<String>,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct CreateBook {
    pub title: String,
    pub published: i32,
    pub author_id: String,
    pub genres: Vec<String>,
}

pub struct BooksRepository {
    pool: SqlitePool,
}

type BookRow = (String, String, i32, String, String, String);

fn row_to_record(r: BookRow) -> BookRecord {
    BookRecord {
        id: r.0,
        title: r.1,
        published: r.2,
        author_id: r.3,
        genres: json_to_vec(&r.4),
        created_at: r.5,
    }
}

const BOOK_COLUMNS: &str = "id, title, published, author_id, genres, created_at";

impl BooksRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new book
    pub async fn create(&self, book: CreateBook) -> Result<BookRecord> {
        let id = Uuid::new_v4().to_string();
        let now = now_iso8601();

        sqlx::query(
            r#"
            INSERT INTO books (id, title, published, author_id, genres, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&book.title)
        .bind(book.published)
        .bind(&book.author_id)
        .bind(vec_to_json(&book.genres))
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get_by_id(&id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to create book"))
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: &str) -> Result<Option<BookRecord>> {
        let row = sqlx::query_as::<_, BookRow>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(row_to_record))
    }

    /// Get book by exact title
    pub async fn get_by_title(&self, title: &str) -> Result<Option<BookRecord>> {
        let row = sqlx::query_as::<_, BookRow>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE title = ?"
        ))
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(row_to_record))
    }

    /// List books, optionally filtered by author and/or genre membership
    pub async fn list_filtered(
        &self,
        author_id: Option<&str>,
        genre: Option<&str>,
    ) -> Result<Vec<BookRecord>> {
        let rows = match (author_id, genre) {
            (Some(author_id), Some(genre)) => {
                sqlx::query_as::<_, BookRow>(&format!(
                    "SELECT {BOOK_COLUMNS} FROM books \
                     WHERE author_id = ? \
                       AND EXISTS (SELECT 1 FROM json_each(books.genres) WHERE json_each.value = ?) \
                     ORDER BY created_at"
                ))
                .bind(author_id)
                .bind(genre)
                .fetch_all(&self.pool)
                .await?
            }
            (Some(author_id), None) => {
                sqlx::query_as::<_, BookRow>(&format!(
                    "SELECT {BOOK_COLUMNS} FROM books WHERE author_id = ? ORDER BY created_at"
                ))
                .bind(author_id)
                .fetch_all(&self.pool)
                .await?
            }
            (None, Some(genre)) => {
                sqlx::query_as::<_, BookRow>(&format!(
                    "SELECT {BOOK_COLUMNS} FROM books \
                     WHERE EXISTS (SELECT 1 FROM json_each(books.genres) WHERE json_each.value = ?) \
                     ORDER BY created_at"
                ))
                .bind(genre)
                .fetch_all(&self.pool)
                .await?
            }
            (None, None) => {
                sqlx::query_as::<_, BookRow>(&format!(
                    "SELECT {BOOK_COLUMNS} FROM books ORDER BY created_at"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(row_to_record).collect())
    }

    /// Count all books
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count books referencing a given author
    pub async fn count_by_author(&self, author_id: &str) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM books WHERE author_id = ?")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn test_db() -> Database {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let db = Database::new(pool);
        db.init_schema().await.unwrap();
        db
    }

    async fn seed(db: &Database) -> (String, String) {
        let tolkien = db.authors().create("Tolkien").await.unwrap();
        let herbert = db.authors().create("Herbert").await.unwrap();

        for (title, published, author_id, genres) in [
            ("The Hobbit", 1937, &tolkien.id, vec!["fantasy"]),
            ("Silmarillion", 1977, &tolkien.id, vec!["fantasy", "myth"]),
            ("Dune", 1965, &herbert.id, vec!["scifi"]),
        ] {
            db.books()
                .create(CreateBook {
                    title: title.to_string(),
                    published,
                    author_id: author_id.clone(),
                    genres: genres.into_iter().map(String::from).collect(),
                })
                .await
                .unwrap();
        }

        (tolkien.id, herbert.id)
    }

    #[tokio::test]
    async fn test_list_filtered_combinations() {
        let db = test_db().await;
        let (tolkien_id, herbert_id) = seed(&db).await;
        let books = db.books();

        assert_eq!(books.list_filtered(None, None).await.unwrap().len(), 3);

        let by_author = books.list_filtered(Some(&tolkien_id), None).await.unwrap();
        assert_eq!(by_author.len(), 2);
        assert!(by_author.iter().all(|b| b.author_id == tolkien_id));

        let by_genre = books.list_filtered(None, Some("fantasy")).await.unwrap();
        assert_eq!(by_genre.len(), 2);
        assert!(by_genre.iter().all(|b| b.genres.contains(&"fantasy".to_string())));

        let both = books
            .list_filtered(Some(&tolkien_id), Some("myth"))
            .await
            .unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].title, "Silmarillion");

        // an author/genre pair that intersects to nothing
        let none = books
            .list_filtered(Some(&herbert_id), Some("fantasy"))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_counts() {
        let db = test_db().await;
        let (tolkien_id, herbert_id) = seed(&db).await;
        let books = db.books();

        assert_eq!(books.count().await.unwrap(), 3);
        assert_eq!(books.count_by_author(&tolkien_id).await.unwrap(), 2);
        assert_eq!(books.count_by_author(&herbert_id).await.unwrap(), 1);
        assert_eq!(books.count_by_author("no-such-author").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_by_title() {
        let db = test_db().await;
        seed(&db).await;

        let found = db.books().get_by_title("Dune").await.unwrap();
        assert_eq!(found.unwrap().published, 1965);

        let missing = db.books().get_by_title("No Such Book").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_title_violates_unique_constraint() {
        let db = test_db().await;
        let (tolkien_id, _) = seed(&db).await;

        let result = db
            .books()
            .create(CreateBook {
                title: "Dune".to_string(),
                published: 1999,
                author_id: tolkien_id,
                genres: vec![],
            })
            .await;
        assert!(result.is_err());
        assert_eq!(db.books().count().await.unwrap(), 3);
    }
}
