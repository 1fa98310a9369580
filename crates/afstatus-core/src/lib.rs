//! Core types for the afstatus contract poller.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The ESI client, the cache backend and the server all depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod cache;
pub mod classify;
pub mod contract;
pub mod error;
pub mod maintenance;
pub mod site;
pub mod summary;

pub use error::{Error, Result};
