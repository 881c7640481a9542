use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::auth::AuthSession;
use crate::domain::{CreateBookInput, DomainError};
use crate::infrastructure::AppState;

#[utoipa::path(
    get,
    path = "/books",
    responses((status = 200, description = "All books in catalog order"))
)]
pub async fn list_books(State(state): State<AppState>) -> impl IntoResponse {
    match state.book_repo.find_all().await {
        Ok(books) => (StatusCode::OK, Json(books)).into_response(),
        Err(e) => {
            tracing::error!("Failed to list books: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book"),
        (status = 404, description = "No such book")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.book_repo.find_by_id(id).await {
        Ok(Some(book)) => (StatusCode::OK, Json(book)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Book not found").into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch book {}: {}", id, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/books",
    responses(
        (status = 201, description = "Book created"),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn create_book(
    session: AuthSession,
    State(state): State<AppState>,
    Json(input): Json<CreateBookInput>,
) -> impl IntoResponse {
    match state.book_repo.create(input).await {
        Ok(book) => {
            tracing::info!("Book {} created by {}", book.id, session.username);
            (StatusCode::CREATED, Json(book)).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create book: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book and its reviews deleted"),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "No such book")
    )
)]
pub async fn delete_book(
    session: AuthSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.book_repo.delete(id).await {
        Ok(()) => {
            tracing::info!("Book {} deleted by {}", id, session.username);
            (StatusCode::OK, format!("Book with ID {} deleted.", id)).into_response()
        }
        Err(DomainError::NotFound) => (StatusCode::NOT_FOUND, "Book not found").into_response(),
        Err(e) => {
            tracing::error!("Failed to delete book {}: {}", id, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
