//! In-memory storage backend for testing.
//!
//! This module provides an in-memory implementation of the repository trait
//! that stores products in a HashMap wrapped in `Arc<RwLock<_>>`. It can be
//! told to fail specific operations, which makes it the substitute store for
//! gateway and handler tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::{InMemoryRepository, RepositoryOperation};
