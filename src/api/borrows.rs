//! Borrow endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::borrow::{Borrow, BorrowSummary, CreateBorrowRequest},
};

use super::ApiResponse;

/// Borrow a book
#[utoipa::path(
    post,
    path = "/borrows",
    tag = "borrows",
    request_body = CreateBorrowRequest,
    responses(
        (status = 201, description = "Book borrowed", body = Borrow),
        (status = 400, description = "Missing fields or not enough copies"),
        (status = 404, description = "Book not available")
    )
)]
pub async fn create_borrow(
    State(state): State<crate::AppState>,
    payload: Option<Json<CreateBorrowRequest>>,
) -> AppResult<(StatusCode, Json<ApiResponse<Borrow>>)> {
    // A missing or empty body fails the same required-fields check.
    let request = payload.map(|Json(r)| r).unwrap_or_default();
    let borrow = state.services.borrows.create_borrow(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Book borrowed successfully", borrow)),
    ))
}

/// Summary of borrowed books, grouped per book
#[utoipa::path(
    get,
    path = "/borrows/summary",
    tag = "borrows",
    responses(
        (status = 200, description = "Borrow totals per book", body = Vec<BorrowSummary>)
    )
)]
pub async fn get_borrowed_books_summary(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ApiResponse<Vec<BorrowSummary>>>> {
    let summary = state.services.borrows.borrowed_books_summary().await?;
    Ok(Json(ApiResponse::new(
        "Borrowed books summary retrieved successfully",
        summary,
    )))
}
