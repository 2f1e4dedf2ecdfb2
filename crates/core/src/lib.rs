//! Core types and traits for the product manager function.
//!
//! Everything in this crate is free of I/O: the product model, the response
//! envelope, the repository and telemetry traits, and the pure functions that
//! map storage errors onto envelopes.

pub mod product;
pub mod storage;
pub mod telemetry;
