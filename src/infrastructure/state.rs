//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::auth::SessionStore;
use crate::domain::{BookRepository, ReviewRepository, UserRepository};
use crate::infrastructure::{
    SeaOrmBookRepository, SeaOrmReviewRepository, SeaOrmUserRepository,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// User repository
    pub user_repo: Arc<dyn UserRepository>,
    /// Book repository
    pub book_repo: Arc<dyn BookRepository>,
    /// Review repository
    pub review_repo: Arc<dyn ReviewRepository>,
    /// Active login sessions (token -> username)
    pub sessions: SessionStore,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection) -> Self {
        let user_repo = Arc::new(SeaOrmUserRepository::new(db.clone()));
        let book_repo = Arc::new(SeaOrmBookRepository::new(db.clone()));
        let review_repo = Arc::new(SeaOrmReviewRepository::new(db));

        Self {
            user_repo,
            book_repo,
            review_repo,
            sessions: SessionStore::new(),
        }
    }
}

// Allow extracting the session store on its own (used by the AuthSession
// extractor and the logout handler)
impl axum::extract::FromRef<AppState> for SessionStore {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}
