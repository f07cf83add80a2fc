//! Silo subgraph client: paginated queries against The Graph gateway.

/// Subgraph page fetcher
pub mod client;

pub use client::{Client, PAGE_SIZE, Silo};
