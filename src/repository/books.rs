//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook},
};

/// Resolve the API sort field to a real column. Unknown fields fall back
/// to `created_at` so the dynamic ORDER BY can never inject SQL.
fn sort_column(sort_by: Option<&str>) -> &'static str {
    match sort_by {
        Some("title") => "title",
        Some("author") => "author",
        Some("genre") => "genre",
        Some("isbn") => "isbn",
        Some("copies") => "copies",
        Some("available") => "available",
        Some("updatedAt") => "updated_at",
        _ => "created_at",
    }
}

fn sort_order(sort: Option<&str>) -> &'static str {
    if sort.unwrap_or("asc") == "asc" {
        "ASC"
    } else {
        "DESC"
    }
}

/// Translate a unique-constraint violation on the ISBN index into the
/// duplicate-key error; everything else stays a database error.
fn map_unique_violation(err: sqlx::Error, isbn: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Duplicate {
            field: "isbn".to_string(),
            value: isbn.to_string(),
        },
        _ => AppError::Database(err),
    }
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a new book
    pub async fn create(&self, book: &CreateBook, available: bool) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, genre, isbn, description, copies, available)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.genre)
        .bind(&book.isbn)
        .bind(&book.description)
        .bind(book.copies)
        .bind(available)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &book.isbn))
    }

    /// List books with optional genre filter, sorting and limit
    pub async fn find(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let column = sort_column(query.sort_by.as_deref());
        let order = sort_order(query.sort.as_deref());
        let limit = query.limit.unwrap_or(10);

        let books = if let Some(ref genre) = query.filter {
            let sql = format!(
                "SELECT * FROM books WHERE genre::text = $1 ORDER BY {} {} LIMIT $2",
                column, order
            );
            sqlx::query_as::<_, Book>(&sql)
                .bind(genre)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
        } else {
            let sql = format!("SELECT * FROM books ORDER BY {} {} LIMIT $1", column, order);
            sqlx::query_as::<_, Book>(&sql)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
        };

        Ok(books)
    }

    /// Get book by ID, if it exists
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Persist the full book row
    pub async fn update(&self, id: i32, book: &Book) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $2, author = $3, genre = $4, isbn = $5, description = $6,
                copies = $7, available = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.genre)
        .bind(&book.isbn)
        .bind(&book.description)
        .bind(book.copies)
        .bind(book.available)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &book.isbn))?
        .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Persist the derived availability flag
    pub async fn set_available(&self, id: i32, available: bool) -> AppResult<()> {
        sqlx::query("UPDATE books SET available = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(available)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Conditionally decrement stock. Returns the updated book, or `None`
    /// when fewer copies remain than requested (no write occurs). The
    /// `copies >= $2` guard makes concurrent borrows safe against
    /// over-subscription.
    pub async fn decrement_copies(&self, id: i32, quantity: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET copies = copies - $2, updated_at = NOW()
            WHERE id = $1 AND copies >= $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(quantity)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    /// Delete a book, returning its last-known data
    pub async fn delete(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("DELETE FROM books WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_sort_fields_fall_back_to_created_at() {
        assert_eq!(sort_column(None), "created_at");
        assert_eq!(sort_column(Some("createdAt")), "created_at");
        assert_eq!(sort_column(Some("title")), "title");
        assert_eq!(sort_column(Some("updatedAt")), "updated_at");
        assert_eq!(sort_column(Some("id; DROP TABLE books")), "created_at");
    }

    #[test]
    fn sort_defaults_to_ascending() {
        assert_eq!(sort_order(None), "ASC");
        assert_eq!(sort_order(Some("asc")), "ASC");
        assert_eq!(sort_order(Some("desc")), "DESC");
        // Anything other than "asc" sorts descending
        assert_eq!(sort_order(Some("ascending")), "DESC");
    }
}
