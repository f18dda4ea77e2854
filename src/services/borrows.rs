//! Borrow management service

use std::collections::BTreeMap;

use crate::{
    error::{AppError, AppResult, FieldError},
    models::{
        book::derive_available,
        borrow::{Borrow, BorrowSummary, CreateBorrowRequest},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BorrowsService {
    repository: Repository,
}

impl BorrowsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow copies of a book: check the request, decrement stock,
    /// recompute availability, then record the loan. The decrement is
    /// conditional on remaining stock, so two concurrent borrows cannot
    /// drive the copy count negative.
    pub async fn create_borrow(&self, request: CreateBorrowRequest) -> AppResult<Borrow> {
        let (book_id, quantity, due_date) = request
            .required_fields()
            .ok_or_else(|| AppError::BadRequest("Please provide all required fields".to_string()))?;

        // Zero quantity is already rejected as a missing field above.
        if quantity < 0 {
            return Err(AppError::Validation(BTreeMap::from([(
                "quantity".to_string(),
                FieldError {
                    message: "quantity must be a positive integer".to_string(),
                    kind: "min".to_string(),
                    path: "quantity".to_string(),
                    value: Some(quantity.into()),
                },
            )])));
        }

        let book = self
            .repository
            .books
            .find_by_id(book_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not available".to_string()))?;

        if book.copies < quantity {
            return Err(AppError::BadRequest("Not enough books available".to_string()));
        }

        // A concurrent borrow may have taken the stock since the check;
        // the guarded update reports that the same way.
        let book = self
            .repository
            .books
            .decrement_copies(book_id, quantity)
            .await?
            .ok_or_else(|| AppError::BadRequest("Not enough books available".to_string()))?;

        self.repository
            .books
            .set_available(book.id, derive_available(book.copies))
            .await?;

        self.repository
            .borrows
            .create(book.id, quantity, due_date)
            .await
    }

    /// Per-book borrow totals
    pub async fn borrowed_books_summary(&self) -> AppResult<Vec<BorrowSummary>> {
        self.repository.borrows.summary().await
    }
}
