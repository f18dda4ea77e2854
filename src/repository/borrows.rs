//! Borrows repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::AppResult,
    models::borrow::{Borrow, BorrowSummary, BorrowedBook},
};

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Postgres>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a new borrow record
    pub async fn create(
        &self,
        book_id: i32,
        quantity: i32,
        due_date: DateTime<Utc>,
    ) -> AppResult<Borrow> {
        let borrow = sqlx::query_as::<_, Borrow>(
            r#"
            INSERT INTO borrows (book_id, quantity, due_date)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(book_id)
        .bind(quantity)
        .bind(due_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(borrow)
    }

    /// Per-book borrow totals: group borrows by book, sum quantities,
    /// join each group to its book. Borrows whose book was deleted drop
    /// out of the join (weak reference, no cascade).
    pub async fn summary(&self) -> AppResult<Vec<BorrowSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT b.title, b.isbn, SUM(br.quantity)::bigint AS total_quantity
            FROM borrows br
            JOIN books b ON b.id = br.book_id
            GROUP BY b.id, b.title, b.isbn
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| BorrowSummary {
                book: BorrowedBook {
                    title: row.get("title"),
                    isbn: row.get("isbn"),
                },
                total_quantity: row.get("total_quantity"),
            })
            .collect())
    }
}
