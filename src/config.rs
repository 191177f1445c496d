use std::{fmt::Debug, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    catalog::{BatteryCatalog, ToolCatalog},
    policy::Policy,
    prelude::*,
};

/// Catalogs and policy, loaded once at start-up and shared read-only afterwards.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub batteries: BatteryCatalog,

    #[serde(default)]
    pub policy: Policy,

    #[serde(default)]
    pub tools: ToolCatalog,
}

impl Settings {
    /// Read the settings file, if any, falling back to the built-in defaults.
    #[instrument(skip_all, fields(path = ?path))]
    pub fn read_from<P: AsRef<Path> + Debug>(path: Option<P>) -> Result<Self> {
        let settings = match path {
            Some(path) => {
                let path = path.as_ref();
                let contents = fs::read_to_string(path)
                    .with_context(|| format!("failed to read `{}`", path.display()))?;
                Self::parse(&contents)
                    .with_context(|| format!("invalid settings in `{}`", path.display()))?
            }
            None => {
                debug!("using the built-in settings");
                Self::default()
            }
        };
        info!(n_tools = settings.tools.0.len(), "loaded the settings");
        Ok(settings)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let settings: Self = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result {
        self.batteries.validate().context("invalid battery catalog")?;
        self.tools.validate().context("invalid tool catalog")?;
        self.policy.validate().context("invalid policy")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::{PowerDrawClass, Tier},
        quantity::{cost::Dollars, power::Watts},
    };

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
    }

    #[test]
    fn test_default_settings_are_valid() {
        Settings::default().validate().unwrap();
    }

    #[test]
    fn test_partial_override() {
        let settings = Settings::parse(
            r#"
            [batteries.large]
            capacity = 12.0
            price = 199.0
            msrp = 249.0
            runtime = 4.0
            weight = 1.6
            charge_time = 80

            [policy]
            peak_power_threshold = 2500.0

            [policy.intensity_multipliers]
            heavy = 1.4

            [[tools]]
            name = "Core Drill"
            power_draw = "high"
            average_usage = 60.0
            consumption = 6.5
            "#,
        )
        .unwrap();

        assert_eq!(settings.batteries[Tier::Large].price, Dollars(199.0));
        assert_eq!(settings.batteries[Tier::Small], BatteryCatalog::default().small);
        assert_eq!(settings.policy.peak_power_threshold, Watts(2500.0));
        assert_eq!(settings.policy.base_tool_power, Watts(300.0));
        assert!((settings.policy.intensity_multipliers.heavy - 1.4).abs() < f64::EPSILON);
        assert!((settings.policy.intensity_multipliers.light - 0.7).abs() < f64::EPSILON);
        assert_eq!(settings.tools.0.len(), 1);
        assert_eq!(
            settings.tools.get("Core Drill").map(|tool| tool.power_draw),
            Some(PowerDrawClass::High),
        );
    }

    #[test]
    fn test_invalid_catalog_is_rejected() {
        let result = Settings::parse(
            r"
            [batteries.medium]
            capacity = 20.0
            price = 125.0
            msrp = 159.0
            runtime = 3.0
            weight = 1.3
            charge_time = 60
            ",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_consumption_tool_is_rejected() {
        let result = Settings::parse(
            r#"
            [[tools]]
            name = "Extension Cord"
            power_draw = "low"
            average_usage = 10.0
            consumption = 0.0
            "#,
        );
        assert!(result.is_err());
    }
}
