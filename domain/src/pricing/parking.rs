//! Income estimate for renting out a vacant parking space.

use serde::{Deserialize, Serialize};

/// Typical daily rate for a shared parking space (JPY)
pub const DEFAULT_PARKING_PRICE_PER_DAY: u32 = 600;

/// Share of days a listed space is actually booked
pub const DEFAULT_PARKING_OCCUPANCY_PERCENT: u32 = 30;

const DAYS_PER_MONTH: u64 = 30;

/// Expected revenue from listing a parking space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingIncomeEstimate {
    pub price_per_day: u32,
    pub occupancy_percent: u32,
    pub monthly_revenue: u64,
    pub yearly_revenue: u64,
}

impl ParkingIncomeEstimate {
    /// Revenue over a 30-day month at the given occupancy.
    ///
    /// Occupancy above 100% is clamped.
    pub fn calculate(price_per_day: u32, occupancy_percent: u32) -> Self {
        let occupancy_percent = occupancy_percent.min(100);
        let monthly_revenue =
            u64::from(price_per_day) * DAYS_PER_MONTH * u64::from(occupancy_percent) / 100;
        Self {
            price_per_day,
            occupancy_percent,
            monthly_revenue,
            yearly_revenue: monthly_revenue * 12,
        }
    }
}

impl Default for ParkingIncomeEstimate {
    fn default() -> Self {
        Self::calculate(
            DEFAULT_PARKING_PRICE_PER_DAY,
            DEFAULT_PARKING_OCCUPANCY_PERCENT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_estimate() {
        let estimate = ParkingIncomeEstimate::default();
        assert_eq!(estimate.monthly_revenue, 5400);
        assert_eq!(estimate.yearly_revenue, 64800);
    }

    #[test]
    fn test_occupancy_is_clamped() {
        let estimate = ParkingIncomeEstimate::calculate(1000, 250);
        assert_eq!(estimate.occupancy_percent, 100);
        assert_eq!(estimate.monthly_revenue, 30000);
    }

    #[test]
    fn test_large_daily_rate_does_not_overflow() {
        let estimate = ParkingIncomeEstimate::calculate(u32::MAX, 100);
        assert_eq!(estimate.monthly_revenue, u64::from(u32::MAX) * 30);
    }
}
