//! API route declarations (e.g., /api/*)

pub mod allocation_routes;
pub mod metrics_routes;
pub mod recommendation_routes;
pub mod system_routes;
