pub mod api;
pub mod api_docs;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod infrastructure;
pub mod models;
pub mod server;

pub use infrastructure::AppState;
