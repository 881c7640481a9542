//! Repository implementations using SeaORM

pub mod book_repository;
pub mod review_repository;
pub mod user_repository;

pub use book_repository::SeaOrmBookRepository;
pub use review_repository::SeaOrmReviewRepository;
pub use user_repository::SeaOrmUserRepository;
