//! Borrow (loan) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Borrow record from database. Immutable after creation; there are no
/// update or delete operations on borrows.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Borrow {
    pub id: i32,
    #[serde(rename = "book")]
    pub book_id: i32,
    pub quantity: i32,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create borrow request. All fields optional so the handler can apply
/// the required-fields check itself (a zero quantity counts as missing,
/// matching the original falsy-check behavior).
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBorrowRequest {
    /// Book ID
    pub book: Option<i32>,
    /// Number of copies to borrow
    pub quantity: Option<i32>,
    /// Due date for the loan
    pub due_date: Option<DateTime<Utc>>,
}

impl CreateBorrowRequest {
    /// Returns `(book, quantity, due_date)` when every required field is
    /// present and truthy, `None` otherwise.
    pub fn required_fields(&self) -> Option<(i32, i32, DateTime<Utc>)> {
        match (self.book, self.quantity, self.due_date) {
            (Some(book), Some(quantity), Some(due_date)) if quantity != 0 => {
                Some((book, quantity, due_date))
            }
            _ => None,
        }
    }
}

/// Per-book borrow totals for the summary report
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowSummary {
    pub book: BorrowedBook,
    pub total_quantity: i64,
}

/// Book projection inside the borrow summary
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BorrowedBook {
    pub title: String,
    pub isbn: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(book: Option<i32>, quantity: Option<i32>, with_due: bool) -> CreateBorrowRequest {
        CreateBorrowRequest {
            book,
            quantity,
            due_date: with_due.then(Utc::now),
        }
    }

    #[test]
    fn all_fields_present_passes() {
        assert!(request(Some(1), Some(2), true).required_fields().is_some());
    }

    #[test]
    fn missing_any_field_fails() {
        assert!(request(None, Some(2), true).required_fields().is_none());
        assert!(request(Some(1), None, true).required_fields().is_none());
        assert!(request(Some(1), Some(2), false).required_fields().is_none());
    }

    #[test]
    fn zero_quantity_counts_as_missing() {
        assert!(request(Some(1), Some(0), true).required_fields().is_none());
    }
}
