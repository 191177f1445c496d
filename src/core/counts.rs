use std::{
    fmt::{Display, Formatter},
    iter::Sum,
    ops::{Index, Mul},
};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{BatteryCatalog, Tier},
    quantity::{cost::Dollars, energy::AmpHours, mass::Kilograms, time::Hours},
};

/// Number of batteries per tier.
#[must_use]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TierCounts {
    pub small: u32,
    pub medium: u32,
    pub large: u32,
}

impl TierCounts {
    pub const fn only(tier: Tier, count: u32) -> Self {
        let mut counts = Self { small: 0, medium: 0, large: 0 };
        match tier {
            Tier::Small => counts.small = count,
            Tier::Medium => counts.medium = count,
            Tier::Large => counts.large = count,
        }
        counts
    }

    /// Saturates at `u32::MAX`.
    pub const fn total(&self) -> u32 {
        self.small.saturating_add(self.medium).saturating_add(self.large)
    }

    /// Iterate from the smallest to the largest tier.
    pub fn iter(&self) -> impl Iterator<Item = (Tier, u32)> {
        Tier::ASCENDING.into_iter().map(|tier| (tier, self[tier]))
    }

    /// Sum a per-unit catalog figure over all the batteries.
    fn sum_over<T>(&self, per_unit: impl Fn(Tier) -> T) -> T
    where
        T: Sum + Mul<f64, Output = T>,
    {
        self.iter().map(|(tier, count)| per_unit(tier) * f64::from(count)).sum()
    }

    pub fn cost(&self, catalog: &BatteryCatalog) -> Dollars {
        self.sum_over(|tier| catalog[tier].price)
    }

    pub fn msrp(&self, catalog: &BatteryCatalog) -> Dollars {
        self.sum_over(|tier| catalog[tier].msrp)
    }

    pub fn runtime(&self, catalog: &BatteryCatalog) -> Hours {
        self.sum_over(|tier| catalog[tier].runtime)
    }

    pub fn weight(&self, catalog: &BatteryCatalog) -> Kilograms {
        self.sum_over(|tier| catalog[tier].weight)
    }

    pub fn capacity(&self, catalog: &BatteryCatalog) -> AmpHours {
        self.sum_over(|tier| catalog[tier].capacity)
    }

    /// Human-readable composition, for example `2 × 15Ah + 1 × 6Ah`.
    pub fn describe(&self, catalog: &BatteryCatalog) -> String {
        if self.total() == 0 {
            return "none".to_owned();
        }
        Tier::DESCENDING
            .into_iter()
            .filter(|tier| self[*tier] != 0)
            .map(|tier| format!("{} × {}", self[tier], catalog[tier].label()))
            .join(" + ")
    }
}

impl Index<Tier> for TierCounts {
    type Output = u32;

    fn index(&self, tier: Tier) -> &Self::Output {
        match tier {
            Tier::Small => &self.small,
            Tier::Medium => &self.medium,
            Tier::Large => &self.large,
        }
    }
}

/// Saturating scale of every tier.
impl Mul<u32> for TierCounts {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Self {
            small: self.small.saturating_mul(rhs),
            medium: self.medium.saturating_mul(rhs),
            large: self.large.saturating_mul(rhs),
        }
    }
}

impl Display for TierCounts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}S/{}M/{}L", self.small, self.medium, self.large)
    }
}

/// Whole number of batteries, rounding a non-negative ratio down.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn floor_units(ratio: f64) -> u32 {
    ratio.floor() as u32
}

/// Whole number of batteries, rounding a non-negative ratio up.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn ceil_units(ratio: f64) -> u32 {
    ratio.ceil() as u32
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_cost() {
        let counts = TierCounts { small: 1, medium: 2, large: 3 };
        assert_eq!(counts.cost(&BatteryCatalog::default()), Dollars(95.0 + 250.0 + 735.0));
    }

    #[test]
    fn test_weight() {
        let counts = TierCounts { small: 1, medium: 0, large: 2 };
        assert_abs_diff_eq!(counts.weight(&BatteryCatalog::default()).0, 4.7, epsilon = 1e-9);
    }

    #[test]
    fn test_scale() {
        assert_eq!(
            TierCounts { small: 1, medium: 2, large: 3 } * 6,
            TierCounts { small: 6, medium: 12, large: 18 },
        );
    }

    #[test]
    fn test_scale_saturates() {
        let counts = TierCounts { small: 0, medium: 1, large: 28 } * 600_000_000;
        assert_eq!(counts, TierCounts { small: 0, medium: 600_000_000, large: u32::MAX });
        assert_eq!(counts.total(), u32::MAX);
    }

    #[test]
    fn test_describe() {
        let catalog = BatteryCatalog::default();
        assert_eq!(
            TierCounts { small: 1, medium: 0, large: 2 }.describe(&catalog),
            "2 × 15Ah + 1 × 6Ah",
        );
        assert_eq!(TierCounts::default().describe(&catalog), "none");
        assert_eq!(TierCounts::only(Tier::Medium, 3).describe(&catalog), "3 × 9Ah");
    }
}
