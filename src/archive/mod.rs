//! Remote archive access
//!
//! This module provides:
//! - `DataSource`, the asynchronous contract the browsing controllers consume
//! - `ArchiveClient`, its HTTP implementation
//! - Wire models for collections, videos and listings

pub mod api;
pub mod error;
pub mod models;
pub mod source;

pub use api::ArchiveClient;
pub use error::FetchError;
pub use source::DataSource;
