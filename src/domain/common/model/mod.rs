//! Shared domain types.

/// Unit prices applied to usage. Fixed defaults; no calibration source exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitPrices {
    pub cpu_core_hour: f64,
    pub memory_gb_hour: f64,
}

impl Default for UnitPrices {
    fn default() -> Self {
        Self {
            cpu_core_hour: 0.05,
            memory_gb_hour: 0.005,
        }
    }
}
