//! SeaORM implementation of ReviewRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::domain::{CreateReviewInput, DomainError, ReviewRepository};
use crate::models::book::Entity as BookEntity;
use crate::models::review::{ActiveModel, Column, Entity as ReviewEntity};
use crate::models::Review;

/// SeaORM-based implementation of ReviewRepository
pub struct SeaOrmReviewRepository {
    db: DatabaseConnection,
}

impl SeaOrmReviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewRepository for SeaOrmReviewRepository {
    async fn find_by_book_id(&self, book_id: i32) -> Result<Vec<Review>, DomainError> {
        let reviews = ReviewEntity::find()
            .filter(Column::BookId.eq(book_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(reviews.into_iter().map(Review::from).collect())
    }

    async fn create(&self, input: CreateReviewInput) -> Result<Review, DomainError> {
        // Check the referenced book inside the insert transaction so a
        // concurrent book deletion cannot leave an orphan review. A FK
        // error from the database maps to the same failure.
        let txn = self.db.begin().await?;

        let book = BookEntity::find_by_id(input.book_id).one(&txn).await?;
        if book.is_none() {
            txn.rollback().await?;
            return Err(DomainError::ForeignKeyViolation);
        }

        let review = ActiveModel {
            text: Set(input.text),
            rating: Set(input.rating),
            book_id: Set(input.book_id),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let model = review.insert(&txn).await?;
        txn.commit().await?;

        Ok(Review::from(model))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = ReviewEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}
