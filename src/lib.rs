//! Libris Library Lending Server
//!
//! A Rust REST backend for a small library: CRUD on books, a borrow
//! operation that decrements stock and records a loan, and a per-book
//! borrow summary.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
