//! Paperback Core - Shared types library.
//!
//! This crate provides the entity records and identifier types used across
//! all Paperback components:
//! - `catalog` - Collection state, fixture client, and local persistence
//! - `cli` - Command-line admin and browse front-end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype identifiers, the [`types::Email`] wrapper, and the
//!   `Book`/`Author`/`Store` records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
