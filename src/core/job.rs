use std::collections::BTreeMap;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    core::InvalidInput,
    quantity::{cost::Dollars, time::Hours},
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
pub enum UsageIntensity {
    #[display("light")]
    Light,

    #[display("moderate")]
    Moderate,

    #[display("heavy")]
    Heavy,
}

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum ShiftPattern {
    #[default]
    #[display("single")]
    Single,

    #[display("double")]
    Double,

    #[display("triple")]
    Triple,
}

impl ShiftPattern {
    /// Fleet scaling factor: every shift needs its own set of charged batteries.
    pub const fn multiplier(self) -> u32 {
        match self {
            Self::Single => 1,
            Self::Double => 2,
            Self::Triple => 3,
        }
    }
}

/// Everything the caller knows about the job.
#[must_use]
#[derive(Clone, Debug, PartialEq, Builder, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSpec {
    /// Tool name to the number of such tools on site.
    #[builder(default)]
    #[serde(default)]
    pub selected_tools: BTreeMap<String, u32>,

    pub usage_intensity: UsageIntensity,

    pub work_hours_per_day: Hours,

    #[builder(default = 1)]
    pub jobsite_count: u32,

    #[builder(default)]
    #[serde(default)]
    pub shift_pattern: ShiftPattern,

    #[builder(default = 1)]
    pub crew_size: u32,

    #[builder(default)]
    #[serde(default)]
    pub require_backup: bool,

    /// Display-only: does not alter the allocation.
    #[builder(default)]
    #[serde(default)]
    pub require_fast_charging: bool,

    /// Display-only: exceeding it produces an advisory, not a smaller fleet.
    #[serde(default)]
    pub budget_limit: Option<Dollars>,
}

impl JobSpec {
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if !self.work_hours_per_day.is_finite() || self.work_hours_per_day <= Hours::ZERO {
            return Err(InvalidInput::WorkHours(self.work_hours_per_day));
        }
        if self.jobsite_count == 0 {
            return Err(InvalidInput::NoJobsites);
        }
        if self.crew_size == 0 {
            return Err(InvalidInput::EmptyCrew);
        }
        Ok(())
    }

    /// Tools with a non-zero count.
    pub fn tools(&self) -> impl Iterator<Item = (&str, u32)> {
        self.selected_tools
            .iter()
            .filter(|(_, count)| **count != 0)
            .map(|(name, count)| (name.as_str(), *count))
    }
}
