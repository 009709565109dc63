//! API request DTOs

pub mod cost_allocation_dto;
