//! Query, pagination and navigation controllers
//!
//! Everything in here is synchronous state plus one async entry point,
//! [`execute`], which is where a request meets the [`DataSource`](crate::archive::DataSource).
//! Presentation layers drive a [`Navigator`] and render what it holds.

pub mod detail;
pub mod fetch;
pub mod nav;
pub mod query;
pub mod request;

#[cfg(test)]
pub(crate) mod testing;

pub use detail::DetailState;
pub use fetch::{Disposition, FetchOutcome};
pub use nav::{Context, Filter, Navigator, Selection};
pub use request::{Request, Response, execute};
