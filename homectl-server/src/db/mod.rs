//! Database layer - connection pool and repositories
//!
//! # Design Principles
//!
//! - One SQLite pool shared by the HTTP handlers and the poller
//! - The home tree is loaded with JOINs - no N+1 queries
//! - Rely on DB constraints (foreign keys, UNIQUE), handle violations
//! - Transactions for multi-step operations

pub mod pool;
pub mod repos;

pub use pool::{create_memory_pool, create_pool};
pub use sqlx::SqlitePool;
pub use repos::*;
