//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::DomainError;
use crate::models::book::Book;
use crate::models::review::Review;
use crate::models::user::User;

/// Stored credential material for login verification
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password_hash: String,
    pub salt: String,
}

/// Input for creating a book.
///
/// Missing fields deserialize to empty strings; the catalog stores whatever
/// the caller supplies, without validation.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CreateBookInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
}

/// Input for creating a review. No range check on rating.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CreateReviewInput {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    pub book_id: i32,
}

/// Repository trait for User entity
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Register a new user. Generates a fresh salt, stores the digest and
    /// fails with `DuplicateUser` if the username is already present.
    /// The returned view never echoes the digest or salt.
    async fn create(&self, username: &str, password: &str) -> Result<User, DomainError>;

    /// Exact, case-sensitive lookup returning the stored digest and salt
    async fn find_by_username(&self, username: &str) -> Result<Option<Credentials>, DomainError>;
}

/// Repository trait for Book entity
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Find all books in insertion (primary-key) order
    async fn find_all(&self) -> Result<Vec<Book>, DomainError>;

    /// Find a book by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError>;

    /// Create a new book
    async fn create(&self, input: CreateBookInput) -> Result<Book, DomainError>;

    /// Delete a book and all of its reviews in one transaction
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Repository trait for Review entity
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Find the reviews of a book in insertion order.
    /// An unknown book yields an empty list, not an error.
    async fn find_by_book_id(&self, book_id: i32) -> Result<Vec<Review>, DomainError>;

    /// Create a new review; fails with `ForeignKeyViolation` if the
    /// referenced book does not exist
    async fn create(&self, input: CreateReviewInput) -> Result<Review, DomainError>;

    /// Delete a review by ID
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}
