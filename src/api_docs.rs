use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::auth::register,
        api::auth::login,
        api::auth::logout,
        api::books::list_books,
        api::books::get_book,
        api::books::create_book,
        api::books::delete_book,
        api::reviews::list_book_reviews,
        api::reviews::create_review,
        api::reviews::delete_review,
    ),
    tags(
        (name = "bookstand", description = "Bookstand catalog API")
    )
)]
pub struct ApiDoc;
