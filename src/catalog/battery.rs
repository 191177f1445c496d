use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::{
    core::InvalidInput,
    quantity::{
        cost::Dollars,
        energy::{AmpHours, WattHours},
        mass::Kilograms,
        time::Hours,
    },
};

/// Battery capacity tier.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[display("small")]
    Small,

    #[display("medium")]
    Medium,

    #[display("large")]
    Large,
}

impl Tier {
    pub const ASCENDING: [Self; 3] = [Self::Small, Self::Medium, Self::Large];
    pub const DESCENDING: [Self; 3] = [Self::Large, Self::Medium, Self::Small];
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatterySpec {
    pub capacity: AmpHours,

    /// Our selling price per unit.
    pub price: Dollars,

    /// Manufacturer's suggested retail price per unit.
    pub msrp: Dollars,

    /// Reference runtime of one unit at an average tool draw.
    pub runtime: Hours,

    pub weight: Kilograms,

    /// Full charge time in minutes.
    pub charge_time: u32,
}

impl BatterySpec {
    pub fn watt_hours(&self) -> WattHours {
        self.capacity.to_watt_hours()
    }

    /// Catalog label, for example `15Ah`.
    pub fn label(&self) -> String {
        format!("{:.0}Ah", self.capacity.0)
    }

    pub fn charge_time(&self) -> Hours {
        Hours::from_minutes(self.charge_time)
    }
}

/// The three battery tiers on sale.
///
/// Process-wide immutable configuration: load once and share by reference.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatteryCatalog {
    pub small: BatterySpec,
    pub medium: BatterySpec,
    pub large: BatterySpec,
}

impl Default for BatteryCatalog {
    fn default() -> Self {
        Self {
            small: BatterySpec {
                capacity: AmpHours(6.0),
                price: Dollars(95.0),
                msrp: Dollars(119.0),
                runtime: Hours(2.0),
                weight: Kilograms(0.9),
                charge_time: 45,
            },
            medium: BatterySpec {
                capacity: AmpHours(9.0),
                price: Dollars(125.0),
                msrp: Dollars(159.0),
                runtime: Hours(3.0),
                weight: Kilograms(1.3),
                charge_time: 60,
            },
            large: BatterySpec {
                capacity: AmpHours(15.0),
                price: Dollars(245.0),
                msrp: Dollars(299.0),
                runtime: Hours(5.0),
                weight: Kilograms(1.9),
                charge_time: 90,
            },
        }
    }
}

impl Index<Tier> for BatteryCatalog {
    type Output = BatterySpec;

    fn index(&self, tier: Tier) -> &Self::Output {
        match tier {
            Tier::Small => &self.small,
            Tier::Medium => &self.medium,
            Tier::Large => &self.large,
        }
    }
}

impl BatteryCatalog {
    /// Iterate from the smallest to the largest tier.
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &BatterySpec)> {
        Tier::ASCENDING.into_iter().map(|tier| (tier, &self[tier]))
    }

    /// Check that the capacities are positive and strictly increasing with the tier,
    /// and that no tier sells above its MSRP.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        for (tier, spec) in self.iter() {
            if !spec.capacity.is_finite() || spec.capacity <= AmpHours::ZERO {
                return Err(InvalidInput::Capacity { tier, capacity: spec.capacity });
            }
            if spec.msrp < spec.price {
                return Err(InvalidInput::Msrp { tier, price: spec.price, msrp: spec.msrp });
            }
        }
        for [lower, higher] in [[Tier::Small, Tier::Medium], [Tier::Medium, Tier::Large]] {
            if self[higher].capacity <= self[lower].capacity {
                return Err(InvalidInput::CapacityOrder { lower, higher });
            }
        }
        Ok(())
    }
}
