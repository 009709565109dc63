//! Controllers: connect routes to domain services

pub mod allocation;
pub mod metric;
pub mod recommendation;
pub mod system;
