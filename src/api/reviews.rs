use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::auth::AuthSession;
use crate::domain::{CreateReviewInput, DomainError};
use crate::infrastructure::AppState;

#[utoipa::path(
    get,
    path = "/books/{id}/reviews",
    params(("id" = i32, Path, description = "Book id")),
    responses((status = 200, description = "Reviews of the book, possibly empty"))
)]
pub async fn list_book_reviews(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
) -> impl IntoResponse {
    // An unknown book yields an empty array, not a 404
    match state.review_repo.find_by_book_id(book_id).await {
        Ok(reviews) => (StatusCode::OK, Json(reviews)).into_response(),
        Err(e) => {
            tracing::error!("Failed to list reviews for book {}: {}", book_id, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/reviews",
    responses(
        (status = 201, description = "Review created"),
        (status = 400, description = "book_id references no book"),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn create_review(
    session: AuthSession,
    State(state): State<AppState>,
    Json(input): Json<CreateReviewInput>,
) -> impl IntoResponse {
    match state.review_repo.create(input).await {
        Ok(review) => {
            tracing::info!(
                "Review {} on book {} created by {}",
                review.id,
                review.book_id,
                session.username
            );
            (StatusCode::CREATED, Json(review)).into_response()
        }
        Err(DomainError::ForeignKeyViolation) => (
            StatusCode::BAD_REQUEST,
            "Invalid book_id: no such book.",
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to create review: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/reviews/{id}",
    params(("id" = i32, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review deleted"),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "No such review")
    )
)]
pub async fn delete_review(
    session: AuthSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.review_repo.delete(id).await {
        Ok(()) => {
            tracing::info!("Review {} deleted by {}", id, session.username);
            (StatusCode::OK, format!("Review with ID {} deleted.", id)).into_response()
        }
        Err(DomainError::NotFound) => {
            (StatusCode::NOT_FOUND, "Review not found").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to delete review {}: {}", id, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
