//! Business policy of the fleet sizing.
//!
//! The branch thresholds assume the three-tier catalog: when the catalog capacities change,
//! revisit [`Policy::peak_power_threshold`] and the mixed-size fill ratios.

use serde::{Deserialize, Serialize};

use crate::{
    catalog::PowerDrawClass,
    core::{InvalidInput, UsageIntensity, UseCase},
    quantity::power::Watts,
};

#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Nominal power of any tool, regardless of its type.
    ///
    /// A flat simplification: the draw class multiplier is the only per-tool differentiation.
    pub base_tool_power: Watts,

    pub power_draw_multipliers: PowerDrawMultipliers,
    pub intensity_multipliers: IntensityMultipliers,

    /// Safety margin on the daily energy when the job requires backup batteries.
    pub backup_buffer: f64,

    /// Safety margin on the daily energy otherwise.
    pub standard_buffer: f64,

    /// Simultaneous full-draw power above which the fleet is built from large batteries first.
    pub peak_power_threshold: Watts,

    /// For light jobs, only this fraction of the energy is covered by medium batteries
    /// before the remainder goes to small ones.
    pub light_medium_divisor: f64,

    /// Batteries per crew member the fleet must never fall below.
    pub units_per_crew_member: f64,

    pub units_per_charger: u32,

    pub use_case_efficiency: UseCaseEfficiency,

    /// Mixed-size scenario: take another large battery while the remaining charge
    /// exceeds this fraction of its capacity.
    pub mixed_large_fill_ratio: f64,

    /// Mixed-size scenario: take another medium battery while the remaining charge
    /// exceeds this fraction of its capacity.
    pub mixed_medium_fill_ratio: f64,

    /// The same-size scenario is preferred up to this many largest batteries' worth of charge.
    pub same_size_optimal_multiple: f64,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            base_tool_power: Watts(300.0),
            power_draw_multipliers: PowerDrawMultipliers::default(),
            intensity_multipliers: IntensityMultipliers::default(),
            backup_buffer: 1.5,
            standard_buffer: 1.2,
            peak_power_threshold: Watts(2000.0),
            light_medium_divisor: 2.0,
            units_per_crew_member: 1.5,
            units_per_charger: 4,
            use_case_efficiency: UseCaseEfficiency::default(),
            mixed_large_fill_ratio: 0.8,
            mixed_medium_fill_ratio: 0.5,
            same_size_optimal_multiple: 2.0,
        }
    }
}

impl Policy {
    pub const fn buffer_multiplier(&self, require_backup: bool) -> f64 {
        if require_backup { self.backup_buffer } else { self.standard_buffer }
    }

    /// Smallest fleet a crew of the given size may get.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn minimum_units(&self, crew_size: u32) -> u32 {
        (f64::from(crew_size) * self.units_per_crew_member).ceil() as u32
    }

    pub const fn chargers_for(&self, n_units: u32) -> u32 {
        n_units.div_ceil(self.units_per_charger)
    }

    pub fn validate(&self) -> Result<(), InvalidInput> {
        if self.units_per_charger == 0 {
            return Err(InvalidInput::UnitsPerCharger);
        }
        Ok(())
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerDrawMultipliers {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Default for PowerDrawMultipliers {
    fn default() -> Self {
        Self { low: 0.7, medium: 1.0, high: 1.5 }
    }
}

impl PowerDrawMultipliers {
    pub const fn get(&self, class: PowerDrawClass) -> f64 {
        match class {
            PowerDrawClass::Low => self.low,
            PowerDrawClass::Medium => self.medium,
            PowerDrawClass::High => self.high,
        }
    }
}

/// Duty-cycle scaling of the sustained power draw.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntensityMultipliers {
    pub light: f64,
    pub moderate: f64,
    pub heavy: f64,
}

impl Default for IntensityMultipliers {
    fn default() -> Self {
        Self { light: 0.7, moderate: 1.0, heavy: 1.3 }
    }
}

impl IntensityMultipliers {
    pub const fn get(&self, intensity: UsageIntensity) -> f64 {
        match intensity {
            UsageIntensity::Light => self.light,
            UsageIntensity::Moderate => self.moderate,
            UsageIntensity::Heavy => self.heavy,
        }
    }
}

/// Share of the nominal charge a use case actually needs.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UseCaseEfficiency {
    pub continuous: f64,

    /// Intermittent use needs less cumulative charge.
    pub intermittent: f64,
}

impl Default for UseCaseEfficiency {
    fn default() -> Self {
        Self { continuous: 1.0, intermittent: 0.8 }
    }
}

impl UseCaseEfficiency {
    pub const fn get(&self, use_case: UseCase) -> f64 {
        match use_case {
            UseCase::Continuous => self.continuous,
            UseCase::Intermittent => self.intermittent,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_minimum_units() {
        let policy = Policy::default();
        assert_eq!(policy.minimum_units(1), 2);
        assert_eq!(policy.minimum_units(4), 6);
        assert_eq!(policy.minimum_units(5), 8);
        assert_eq!(policy.minimum_units(10), 15);
    }

    #[test]
    fn test_chargers_for() {
        let policy = Policy::default();
        assert_eq!(policy.chargers_for(0), 0);
        assert_eq!(policy.chargers_for(8), 2);
        assert_eq!(policy.chargers_for(9), 3);
    }

    #[test]
    fn test_buffer_multiplier() {
        let policy = Policy::default();
        assert_abs_diff_eq!(policy.buffer_multiplier(true), 1.5);
        assert_abs_diff_eq!(policy.buffer_multiplier(false), 1.2);
    }

    #[test]
    fn test_zero_units_per_charger() {
        let policy = Policy { units_per_charger: 0, ..Policy::default() };
        assert_eq!(policy.validate(), Err(InvalidInput::UnitsPerCharger));
    }
}
