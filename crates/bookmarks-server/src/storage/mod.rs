//! Storage layer
//!
//! Uses SQLite (embedded) through a shared sqlx pool.

pub mod db;

pub use db::Database;
