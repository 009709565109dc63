use crate::domain::common::model::UnitPrices;

pub const BYTES_PER_GB: f64 = 1_073_741_824.0;
pub const SECONDS_PER_HOUR: f64 = 3600.0;

pub struct CostUtil;

impl CostUtil {
    #[inline]
    pub fn bytes_to_gb(bytes: f64) -> f64 {
        bytes / BYTES_PER_GB
    }

    #[inline]
    pub fn bytes_to_gb_hours(bytes: f64, interval_hours: f64) -> f64 {
        Self::bytes_to_gb(bytes) * interval_hours
    }

    /// `core_seconds` is usage accumulated over the interval (an `increase()`),
    /// so no interval scaling applies.
    #[inline]
    pub fn compute_cpu_cost_from_core_seconds(core_seconds: f64, prices: &UnitPrices) -> f64 {
        let core_hours = core_seconds / SECONDS_PER_HOUR;
        core_hours * prices.cpu_core_hour
    }

    /// `bytes` is an average over the interval, so it is scaled by its length.
    #[inline]
    pub fn compute_memory_cost(bytes: f64, interval_hours: f64, prices: &UnitPrices) -> f64 {
        Self::bytes_to_gb_hours(bytes, interval_hours) * prices.memory_gb_hour
    }

    #[inline]
    pub fn round_to(value: f64, decimals: i32) -> f64 {
        let factor = 10f64.powi(decimals);
        (value * factor).round() / factor
    }

    /// Costs are reported with 4 decimal places.
    #[inline]
    pub fn round4(value: f64) -> f64 {
        Self::round_to(value, 4)
    }
}
