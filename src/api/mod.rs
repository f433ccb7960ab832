//! Remote interaction layer: endpoint catalogue, HTTP client, tag cache.

pub mod cache;
pub mod client;
pub mod endpoints;

pub use cache::QueryCache;
pub use client::{decode, ApiClient};
pub use endpoints::{Endpoint, Tag};
