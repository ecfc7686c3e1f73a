//! SQLite storage plumbing

pub mod manager;

pub use manager::{DbManager, SqliteConnection, SqlitePool};
