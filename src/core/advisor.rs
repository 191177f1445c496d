use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{BatteryCatalog, Tier, ToolProfile},
    core::{InvalidInput, TierCounts, counts::ceil_units},
    policy::Policy,
    prelude::*,
    quantity::{current::Amperes, energy::AmpHours, time::Hours},
};

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
pub enum UseCase {
    #[default]
    #[display("continuous")]
    Continuous,

    #[display("intermittent")]
    Intermittent,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, derive_more::Display)]
#[serde(rename_all = "camelCase")]
pub enum ScenarioKind {
    #[display("single battery")]
    Single,

    #[display("multiple same-size")]
    MultipleSameSize,

    #[display("mixed sizes")]
    MixedSizes,
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioRecommendation {
    #[serde(rename = "scenarioKind")]
    pub kind: ScenarioKind,

    /// `None` when no configuration of this kind covers the need,
    /// which only happens to a single battery.
    #[serde(rename = "configurationDescription")]
    pub configuration: Option<TierCounts>,

    #[serde(rename = "isOptimalForInput")]
    pub is_optimal: bool,
}

impl ScenarioRecommendation {
    pub fn describe(&self, catalog: &BatteryCatalog) -> String {
        self.configuration.map_or_else(
            || "multiple batteries required".to_owned(),
            |configuration| configuration.describe(catalog),
        )
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierRuntime {
    pub tier: Tier,
    pub capacity: AmpHours,
    pub runtime: Hours,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeAdvice {
    pub tool: String,
    pub hours_needed: Hours,
    pub use_case: UseCase,

    /// Charge the tool needs over the desired time, corrected by the use case efficiency.
    pub adjusted_need: AmpHours,

    /// Runtime of the tool on a single battery of each tier, from the smallest one.
    pub runtimes: Vec<TierRuntime>,

    /// Single, same-size, and mixed-size scenarios, in that order. Exactly one is optimal.
    pub scenarios: [ScenarioRecommendation; 3],
}

impl RuntimeAdvice {
    pub fn optimal(&self) -> &ScenarioRecommendation {
        self.scenarios.iter().find(|scenario| scenario.is_optimal).unwrap_or(&self.scenarios[0])
    }
}

/// Maps a desired operating time of a tool to battery combinations.
#[derive(Builder)]
pub struct RuntimeAdvisor<'a> {
    batteries: &'a BatteryCatalog,
    policy: &'a Policy,
}

impl RuntimeAdvisor<'_> {
    /// Runtime of the tool on a single battery of the tier.
    pub fn runtime_for(&self, tool: &ToolProfile, tier: Tier) -> Result<Hours, InvalidInput> {
        Ok(self.batteries[tier].capacity / Self::checked_consumption(tool)?)
    }

    #[instrument(
        skip_all,
        fields(tool = %tool.name, hours_needed = %hours_needed, use_case = %use_case),
    )]
    pub fn advise(
        &self,
        tool: &ToolProfile,
        hours_needed: Hours,
        use_case: UseCase,
    ) -> Result<RuntimeAdvice, InvalidInput> {
        let consumption = Self::checked_consumption(tool)?;
        if !hours_needed.is_finite() || hours_needed <= Hours::ZERO {
            return Err(InvalidInput::HoursNeeded(hours_needed));
        }

        let adjusted_need =
            consumption * hours_needed * self.policy.use_case_efficiency.get(use_case);
        let optimal = self.optimal_kind(adjusted_need);
        debug!(?adjusted_need, %optimal, "estimated the need");

        let runtimes = self
            .batteries
            .iter()
            .map(|(tier, spec)| TierRuntime {
                tier,
                capacity: spec.capacity,
                runtime: spec.capacity / consumption,
            })
            .collect();
        let scenarios = [
            (
                ScenarioKind::Single,
                self.single(adjusted_need).map(|tier| TierCounts::only(tier, 1)),
            ),
            (ScenarioKind::MultipleSameSize, Some(self.same_size(adjusted_need))),
            (ScenarioKind::MixedSizes, Some(self.mixed(adjusted_need))),
        ]
        .map(|(kind, configuration)| ScenarioRecommendation {
            kind,
            configuration,
            is_optimal: kind == optimal,
        });

        Ok(RuntimeAdvice {
            tool: tool.name.clone(),
            hours_needed,
            use_case,
            adjusted_need,
            runtimes,
            scenarios,
        })
    }

    fn checked_consumption(tool: &ToolProfile) -> Result<Amperes, InvalidInput> {
        if tool.consumption.is_finite() && tool.consumption > Amperes::ZERO {
            Ok(tool.consumption)
        } else {
            Err(InvalidInput::Consumption {
                tool: tool.name.clone(),
                consumption: tool.consumption,
            })
        }
    }

    /// Smallest tier that covers the need on its own.
    fn single(&self, need: AmpHours) -> Option<Tier> {
        Tier::ASCENDING.into_iter().find(|tier| self.batteries[*tier].capacity >= need)
    }

    /// The fewest batteries of a single tier, preferring the larger tier on a tie.
    fn same_size(&self, need: AmpHours) -> TierCounts {
        let mut best: Option<(Tier, u32)> = None;
        for tier in Tier::DESCENDING {
            let n_units = ceil_units(need / self.batteries[tier].capacity).max(1);
            if best.is_none_or(|(_, best_units)| n_units < best_units) {
                best = Some((tier, n_units));
            }
        }
        best.map_or_else(TierCounts::default, |(tier, n_units)| TierCounts::only(tier, n_units))
    }

    /// Large batteries while the remaining need is close to a large one, then medium batteries
    /// while it is more than half of a medium one, and small batteries for the rest.
    fn mixed(&self, need: AmpHours) -> TierCounts {
        let large = self.batteries[Tier::Large].capacity;
        let medium = self.batteries[Tier::Medium].capacity;
        let small = self.batteries[Tier::Small].capacity;

        let mut remaining = need;
        let large_units =
            Self::fill(&mut remaining, large, large * self.policy.mixed_large_fill_ratio);
        let medium_units =
            Self::fill(&mut remaining, medium, medium * self.policy.mixed_medium_fill_ratio);
        let small_units =
            if remaining > AmpHours::ZERO { ceil_units(remaining / small) } else { 0 };
        TierCounts { small: small_units, medium: medium_units, large: large_units }
    }

    /// Take batteries of the capacity until the remaining need drops to the threshold.
    fn fill(remaining: &mut AmpHours, capacity: AmpHours, threshold: AmpHours) -> u32 {
        let excess = *remaining - threshold;
        if excess <= AmpHours::ZERO {
            return 0;
        }
        let n_units = ceil_units(excess / capacity);
        *remaining -= capacity * f64::from(n_units);
        n_units
    }

    /// Partition the need by the largest capacity: up to one battery, up to a few, or beyond.
    fn optimal_kind(&self, need: AmpHours) -> ScenarioKind {
        let largest = self.batteries[Tier::Large].capacity;
        if need <= largest {
            ScenarioKind::Single
        } else if need <= largest * self.policy.same_size_optimal_multiple {
            ScenarioKind::MultipleSameSize
        } else {
            ScenarioKind::MixedSizes
        }
    }
}
