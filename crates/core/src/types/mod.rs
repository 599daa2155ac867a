//! Core types for Paperback.
//!
//! This module provides the catalog entity records and type-safe wrappers
//! for their identifiers.

pub mod author;
pub mod book;
pub mod email;
pub mod id;
pub mod store;

pub use author::Author;
pub use book::Book;
pub use email::{Email, EmailError};
pub use id::*;
pub use store::Store;
