//! SeaORM implementation of BookRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::domain::{BookRepository, CreateBookInput, DomainError};
use crate::models::book::{ActiveModel, Column, Entity as BookEntity};
use crate::models::review;
use crate::models::Book;

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn find_all(&self) -> Result<Vec<Book>, DomainError> {
        let books = BookEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(books.into_iter().map(Book::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError> {
        let book = BookEntity::find_by_id(id).one(&self.db).await?;

        Ok(book.map(Book::from))
    }

    async fn create(&self, input: CreateBookInput) -> Result<Book, DomainError> {
        let book = ActiveModel {
            title: Set(input.title),
            author: Set(input.author),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let model = book.insert(&self.db).await?;
        Ok(Book::from(model))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        // Cascade in the same transaction as the book row, so the book and
        // its reviews disappear together or not at all.
        let txn = self.db.begin().await?;

        review::Entity::delete_many()
            .filter(review::Column::BookId.eq(id))
            .exec(&txn)
            .await?;

        let result = BookEntity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(DomainError::NotFound);
        }

        txn.commit().await?;
        Ok(())
    }
}
