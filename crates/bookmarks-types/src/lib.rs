//! Bookmarks Types - Pure type definitions
//!
//! This crate contains only the domain records shared by the server's storage
//! and HTTP layers. It has no async runtime or database dependencies.

pub mod bookmark;

pub use bookmark::*;
