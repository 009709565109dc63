//! Business logic: cost allocation, metric snapshots, recommendations, system.

pub mod allocation;
pub mod common;
pub mod metric;
pub mod recommendation;
pub mod system;
