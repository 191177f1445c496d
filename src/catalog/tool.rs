use bon::bon;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    core::InvalidInput,
    quantity::{current::Amperes, ratios::Percentage},
};

#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum PowerDrawClass {
    #[display("low")]
    Low,

    #[display("medium")]
    Medium,

    #[display("high")]
    High,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolProfile {
    pub name: String,

    pub power_draw: PowerDrawClass,

    /// Share of the working time the tool is actually running.
    pub average_usage: Percentage,

    /// Average consumption in amp-hours per hour of operation.
    pub consumption: Amperes,
}

#[bon]
impl ToolProfile {
    #[builder]
    pub fn new(
        #[builder(into)] name: String,
        power_draw: PowerDrawClass,
        average_usage: Percentage,
        consumption: Amperes,
    ) -> Result<Self, InvalidInput> {
        let profile = Self { name, power_draw, average_usage, consumption };
        profile.validate()?;
        Ok(profile)
    }
}

impl ToolProfile {
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if !self.consumption.is_finite() || self.consumption <= Amperes::ZERO {
            return Err(InvalidInput::Consumption {
                tool: self.name.clone(),
                consumption: self.consumption,
            });
        }
        if !self.average_usage.is_finite()
            || self.average_usage <= Percentage::ZERO
            || self.average_usage > Percentage(100.0)
        {
            return Err(InvalidInput::AverageUsage {
                tool: self.name.clone(),
                usage: self.average_usage,
            });
        }
        Ok(())
    }
}

/// Tools a job may select, looked up by exact name.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolCatalog(pub Vec<ToolProfile>);

impl ToolCatalog {
    pub fn get(&self, name: &str) -> Option<&ToolProfile> {
        self.0.iter().find(|profile| profile.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolProfile> {
        self.0.iter()
    }

    pub fn validate(&self) -> Result<(), InvalidInput> {
        if let Some(name) = self.0.iter().map(|profile| &profile.name).duplicates().next() {
            return Err(InvalidInput::DuplicateTool { tool: name.clone() });
        }
        self.0.iter().try_for_each(ToolProfile::validate)
    }
}

impl Default for ToolCatalog {
    fn default() -> Self {
        Self(
            [
                ("Impact Driver", PowerDrawClass::Low, 30.0, 1.5),
                ("Drill Driver", PowerDrawClass::Low, 35.0, 1.8),
                ("Work Light", PowerDrawClass::Low, 80.0, 0.6),
                ("Jigsaw", PowerDrawClass::Medium, 30.0, 2.4),
                ("Hammer Drill", PowerDrawClass::Medium, 45.0, 2.8),
                ("Circular Saw", PowerDrawClass::High, 40.0, 4.0),
                ("Angle Grinder", PowerDrawClass::High, 50.0, 4.5),
                ("Rotary Hammer", PowerDrawClass::High, 40.0, 5.0),
            ]
            .into_iter()
            .map(|(name, power_draw, average_usage, consumption)| ToolProfile {
                name: name.to_owned(),
                power_draw,
                average_usage: Percentage(average_usage),
                consumption: Amperes(consumption),
            })
            .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        assert_eq!(ToolCatalog::default().validate(), Ok(()));
    }

    #[test]
    fn test_get() {
        let catalog = ToolCatalog::default();
        assert_eq!(
            catalog.get("Circular Saw").map(|profile| profile.power_draw),
            Some(PowerDrawClass::High),
        );
        assert!(catalog.get("circular saw").is_none());
    }

    #[test]
    fn test_zero_consumption_is_rejected() {
        let result = ToolProfile::builder()
            .name("Idle Tool")
            .power_draw(PowerDrawClass::Low)
            .average_usage(Percentage(50.0))
            .consumption(Amperes::ZERO)
            .build();
        assert!(matches!(result, Err(InvalidInput::Consumption { .. })));
    }

    #[test]
    fn test_nan_consumption_is_rejected() {
        let result = ToolProfile::builder()
            .name("Broken Tool")
            .power_draw(PowerDrawClass::Low)
            .average_usage(Percentage(50.0))
            .consumption(Amperes(f64::NAN))
            .build();
        assert!(matches!(result, Err(InvalidInput::Consumption { .. })));
    }

    #[test]
    fn test_usage_out_of_range() {
        let result = ToolProfile::builder()
            .name("Overworked Saw")
            .power_draw(PowerDrawClass::High)
            .average_usage(Percentage(120.0))
            .consumption(Amperes(4.0))
            .build();
        assert!(matches!(result, Err(InvalidInput::AverageUsage { .. })));
    }

    #[test]
    fn test_duplicates() {
        let mut catalog = ToolCatalog::default();
        catalog.0.push(catalog.0[0].clone());
        assert_eq!(
            catalog.validate(),
            Err(InvalidInput::DuplicateTool { tool: "Impact Driver".to_owned() }),
        );
    }
}
