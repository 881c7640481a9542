pub mod auth;
pub mod books;
pub mod health;
pub mod reviews;

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};

use crate::infrastructure::AppState;

// The original service answers GET / with a plain 302 to the catalog
async fn root_redirect() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/books")])
}

pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_redirect))
        // Health check
        .route("/health", get(health::health_check))
        // Auth
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book).delete(books::delete_book),
        )
        .route("/books/:id/reviews", get(reviews::list_book_reviews))
        // Reviews
        .route("/reviews", post(reviews::create_review))
        .route("/reviews/:id", delete(reviews::delete_review))
        .with_state(state)
}
