//! Progress observability for running algorithms.

pub mod cache;

pub use cache::{ProgressCache, ProgressHandle};
