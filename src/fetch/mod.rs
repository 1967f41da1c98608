//! Fetch Module
//!
//! Outbound image retrieval.

mod resolver;

pub use resolver::{upgrade_to_https, FetchResolver, FetchedImage};
