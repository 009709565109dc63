//! Cost-allocation API DTOs

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::allocation::model::{
    AllocationParams, Resolution, Window, DEFAULT_AGGREGATE, DEFAULT_STEP_SECONDS,
};

/// Query string of `GET /api/cost-allocation`.
#[derive(Deserialize, Debug, Clone, Default, Validate)]
pub struct CostAllocationQuery {
    /// `24h`, `7d` or `30d`. Unknown values fall back to `7d`.
    pub window: Option<String>,

    /// `Daily` or `Entire window`.
    pub resolution: Option<String>,

    /// Label to group by; interpolated into the query expression.
    #[validate(length(min = 1, max = 63), custom(function = "validate_label_name"))]
    pub aggregate: Option<String>,

    /// Query step in seconds.
    #[validate(range(min = 1, max = 2_592_000))]
    pub step: Option<u64>,
}

impl CostAllocationQuery {
    pub fn into_params(self) -> AllocationParams {
        AllocationParams {
            window: Window::parse_lenient(self.window.as_deref()),
            resolution: Resolution::parse_lenient(self.resolution.as_deref()),
            aggregate: self
                .aggregate
                .unwrap_or_else(|| DEFAULT_AGGREGATE.to_string()),
            step: self.step.map(|s| s as i64).unwrap_or(DEFAULT_STEP_SECONDS),
        }
    }
}

/// Prometheus label names: `[a-zA-Z_][a-zA-Z0-9_]*`.
fn validate_label_name(value: &str) -> Result<(), ValidationError> {
    let mut chars = value.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("label_name"))
    }
}
