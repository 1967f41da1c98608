//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry sweep: drops cached images whose freshness window has passed

mod cleanup;

pub use cleanup::spawn_cleanup_task;
