//! Swarmfield - ambient particle background
//!
//! Library half of the `swarmfield` binary: configuration and the systems the
//! windowed host is assembled from.

pub mod config;
pub mod systems;
