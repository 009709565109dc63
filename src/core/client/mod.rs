//! Clients for external collaborators (the metrics time-series backend).

pub mod metrics_backend;
pub mod prometheus_client;
pub mod prometheus_dto;

#[cfg(test)]
pub mod mock_backend;
