//! Page fetching.
//!
//! A [`Transport`] performs single GET requests; the [`Fetcher`] puts a
//! process-lifetime page cache in front of it.

pub mod cache;
pub mod client;

pub use cache::{Fetcher, PageCache};
pub use client::{HttpTransport, Transport, TransportResponse};
