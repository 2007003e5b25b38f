//! Insurance premium market table and savings estimate.
//!
//! Monthly premiums (JPY) by age group and rating grade, used to show how
//! much a customer could save by reviewing their policy. The parking income
//! estimate for the parking share offer lives alongside.

use serde::{Deserialize, Serialize};

mod parking;

pub use parking::{
    DEFAULT_PARKING_OCCUPANCY_PERCENT, DEFAULT_PARKING_PRICE_PER_DAY, ParkingIncomeEstimate,
};

/// Monthly premium with and without vehicle (collision) coverage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumPair {
    pub with_vehicle: u32,
    pub without_vehicle: u32,
}

impl PremiumPair {
    const fn new(with_vehicle: u32, without_vehicle: u32) -> Self {
        Self {
            with_vehicle,
            without_vehicle,
        }
    }

    pub fn select(&self, vehicle_coverage: bool) -> u32 {
        if vehicle_coverage {
            self.with_vehicle
        } else {
            self.without_vehicle
        }
    }
}

/// Age bracket of the policy holder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeGroup {
    Twenties,
    Thirties,
    Forties,
    FiftiesPlus,
}

impl AgeGroup {
    /// Bracket for an age, with the grade key to look up in that bracket
    fn bracket(age: u32, grade: u32) -> (Self, u32) {
        if age < 30 {
            (AgeGroup::Twenties, if grade >= 9 { 9 } else { 6 })
        } else if age < 40 {
            (AgeGroup::Thirties, if grade >= 15 { 15 } else { 6 })
        } else if age < 50 {
            (AgeGroup::Forties, if grade >= 20 { 20 } else { 15 })
        } else {
            (AgeGroup::FiftiesPlus, 20)
        }
    }
}

/// Market rates: (age group, grade, premiums)
const MARKET_RATES: &[(AgeGroup, u32, PremiumPair)] = &[
    (AgeGroup::Twenties, 6, PremiumPair::new(24230, 12260)),
    (AgeGroup::Twenties, 9, PremiumPair::new(6510, 3340)),
    (AgeGroup::Thirties, 6, PremiumPair::new(7930, 3810)),
    (AgeGroup::Thirties, 15, PremiumPair::new(4450, 2040)),
    (AgeGroup::Forties, 15, PremiumPair::new(4200, 1900)),
    (AgeGroup::Forties, 20, PremiumPair::new(3800, 1800)),
    (AgeGroup::FiftiesPlus, 20, PremiumPair::new(3500, 1700)),
];

/// Used when the table has no entry for the bracket
const FALLBACK: PremiumPair = PremiumPair::new(5000, 2500);

/// Market monthly premium for an age and rating grade
pub fn recommended_monthly_price(age: u32, grade: u32, vehicle_coverage: bool) -> u32 {
    let (group, grade_key) = AgeGroup::bracket(age, grade);
    MARKET_RATES
        .iter()
        .find(|(g, k, _)| *g == group && *k == grade_key)
        .map(|(_, _, pair)| *pair)
        .unwrap_or(FALLBACK)
        .select(vehicle_coverage)
}

/// How much a customer could save against the market rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsEstimate {
    pub current_monthly_price: u32,
    pub recommended_price: u32,
    pub monthly_savings: u32,
    /// Twelve months of savings, widened so large premiums cannot overflow
    pub yearly_savings: u64,
    /// Rounded percentage of the current premium
    pub savings_percentage: u32,
}

impl SavingsEstimate {
    pub fn calculate(
        current_monthly_price: u32,
        age: u32,
        grade: u32,
        vehicle_coverage: bool,
    ) -> Self {
        let recommended_price = recommended_monthly_price(age, grade, vehicle_coverage);
        let monthly_savings = current_monthly_price.saturating_sub(recommended_price);
        let savings_percentage = if current_monthly_price > 0 {
            (f64::from(monthly_savings) / f64::from(current_monthly_price) * 100.0).round() as u32
        } else {
            0
        };

        Self {
            current_monthly_price,
            recommended_price,
            monthly_savings,
            yearly_savings: u64::from(monthly_savings) * 12,
            savings_percentage,
        }
    }

    pub fn has_savings(&self) -> bool {
        self.monthly_savings > 0
    }
}

/// Partner insurer shown next to a savings estimate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insurer {
    pub name: &'static str,
    /// Sign-up discount in JPY, when offered
    pub discount: Option<u32>,
    pub features: &'static [&'static str],
}

pub const TOP_INSURERS: &[Insurer] = &[
    Insurer {
        name: "SBI Sonpo",
        discount: Some(14500),
        features: &["Top-class roadside assistance", "Online sign-up discount"],
    },
    Insurer {
        name: "AXA Direct",
        discount: Some(20000),
        features: &["Lean premium design", "Sign-up campaign for everyone"],
    },
    Insurer {
        name: "Mitsui Direct",
        discount: None,
        features: &["Backed by MS&AD group", "Extensive accident network"],
    },
];
