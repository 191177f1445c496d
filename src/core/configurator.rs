use bon::Builder;
use serde::Serialize;

use crate::{
    catalog::{BatteryCatalog, Tier, ToolCatalog},
    core::{
        JobSpec,
        TierCounts,
        UsageIntensity,
        counts::{ceil_units, floor_units},
    },
    policy::Policy,
    prelude::*,
    quantity::{cost::Dollars, energy::WattHours, mass::Kilograms, power::Watts, time::Hours},
};

/// Which tier the greedy allocation starts from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, derive_more::Display)]
#[serde(rename_all = "camelCase")]
pub enum AllocationStrategy {
    /// Heavy use or high peak power: large batteries, topped up with medium ones.
    #[display("large first")]
    LargeFirst,

    /// Light use: medium batteries for a part of the energy, small ones for the rest.
    #[display("medium then small")]
    MediumThenSmall,

    /// Moderate use: medium batteries, with a large or small one for the remainder.
    #[display("medium first")]
    MediumFirst,
}

/// Non-blocking remark on a configuration. The caller decides whether to warn the user.
#[derive(Clone, Debug, PartialEq, Serialize, derive_more::Display)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Advisory {
    #[display("total cost {total_cost} exceeds the budget of {budget}")]
    #[serde(rename_all = "camelCase")]
    BudgetExceeded { budget: Dollars, total_cost: Dollars },

    #[display("fast charging requested")]
    FastChargingRequested,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetConfiguration {
    pub strategy: AllocationStrategy,
    pub counts: TierCounts,
    pub total_cost: Dollars,
    #[serde(rename = "totalRuntimeHours")]
    pub total_runtime: Hours,
    pub chargers_needed: u32,

    /// Rounded to whole watt-hours.
    #[serde(rename = "dailyPowerRequirementWh")]
    pub daily_power_requirement: WattHours,

    /// Rounded to whole watts.
    #[serde(rename = "peakPowerDemandW")]
    pub peak_power_demand: Watts,

    /// Difference between the MSRP and our price of the whole fleet.
    pub savings: Dollars,

    pub total_weight: Kilograms,
    pub advisories: Vec<Advisory>,
}

/// Sums of the per-tool power draw.
#[derive(Copy, Clone, Debug, PartialEq)]
struct PowerDemand {
    /// Average draw, accounting for the tool usage and job intensity.
    sustained: Watts,

    /// Draw when all the tools run at full power simultaneously.
    peak: Watts,
}

/// Sizes a battery fleet for a job.
///
/// Stateless: every call builds a fresh configuration from the job and the shared catalogs.
#[derive(Builder)]
pub struct FleetConfigurator<'a> {
    batteries: &'a BatteryCatalog,
    tools: &'a ToolCatalog,
    policy: &'a Policy,
}

impl FleetConfigurator<'_> {
    /// Compute the cost-optimal battery mix for the job.
    ///
    /// Unknown tool names contribute nothing. An empty tool selection results in the minimum fleet
    /// for the crew, all of it medium batteries.
    #[instrument(
        skip_all,
        fields(
            intensity = %job.usage_intensity,
            work_hours = %job.work_hours_per_day,
            crew_size = job.crew_size,
        ),
    )]
    pub fn configure(&self, job: &JobSpec) -> FleetConfiguration {
        let demand = self.power_demand(job);
        let daily_power_requirement = demand.sustained * job.work_hours_per_day;
        let buffered_energy =
            daily_power_requirement * self.policy.buffer_multiplier(job.require_backup);
        debug!(?demand, ?daily_power_requirement, ?buffered_energy, "estimated the demand");

        let strategy = self.strategy(job.usage_intensity, demand.peak);
        let counts = self.allocate(strategy, buffered_energy)
            * job.shift_pattern.multiplier().saturating_mul(job.jobsite_count);
        let counts = self.top_up(counts, job.crew_size);

        let total_cost = counts.cost(self.batteries);
        let configuration = FleetConfiguration {
            strategy,
            counts,
            total_cost,
            total_runtime: counts.runtime(self.batteries),
            chargers_needed: self.policy.chargers_for(counts.total()),
            daily_power_requirement: daily_power_requirement.round(),
            peak_power_demand: demand.peak.round(),
            savings: counts.msrp(self.batteries) - total_cost,
            total_weight: counts.weight(self.batteries),
            advisories: Self::advisories(job, total_cost),
        };
        info!(
            %strategy,
            %counts,
            total_cost = %configuration.total_cost,
            chargers = configuration.chargers_needed,
            "configured",
        );
        configuration
    }

    fn power_demand(&self, job: &JobSpec) -> PowerDemand {
        let intensity_multiplier = self.policy.intensity_multipliers.get(job.usage_intensity);
        let mut demand = PowerDemand { sustained: Watts::ZERO, peak: Watts::ZERO };
        for (name, count) in job.tools() {
            let Some(tool) = self.tools.get(name) else {
                warn!(tool = name, "unknown tool, skipping");
                continue;
            };
            let full_power = self.policy.base_tool_power
                * self.policy.power_draw_multipliers.get(tool.power_draw);
            let count = f64::from(count);
            demand.sustained +=
                full_power * tool.average_usage.to_ratio() * intensity_multiplier * count;
            demand.peak += full_power * count;
        }
        demand
    }

    fn strategy(&self, intensity: UsageIntensity, peak_power: Watts) -> AllocationStrategy {
        if intensity == UsageIntensity::Heavy || peak_power > self.policy.peak_power_threshold {
            AllocationStrategy::LargeFirst
        } else if intensity == UsageIntensity::Light {
            AllocationStrategy::MediumThenSmall
        } else {
            AllocationStrategy::MediumFirst
        }
    }

    /// Greedily cover the buffered daily energy of a single shift on a single site.
    fn allocate(&self, strategy: AllocationStrategy, energy: WattHours) -> TierCounts {
        let small = self.batteries[Tier::Small].watt_hours();
        let medium = self.batteries[Tier::Medium].watt_hours();
        let large = self.batteries[Tier::Large].watt_hours();

        let mut counts = TierCounts::default();
        match strategy {
            AllocationStrategy::LargeFirst => {
                counts.large = floor_units(energy / large);
                let remainder = energy - large * f64::from(counts.large);
                if remainder > WattHours::ZERO {
                    counts.medium = ceil_units(remainder / medium);
                }
            }
            AllocationStrategy::MediumThenSmall => {
                counts.medium = floor_units(energy / medium / self.policy.light_medium_divisor);
                let remainder = energy - medium * f64::from(counts.medium);
                counts.small = ceil_units(remainder / small);
            }
            AllocationStrategy::MediumFirst => {
                counts.medium = floor_units(energy / medium);
                let remainder = energy - medium * f64::from(counts.medium);
                if remainder > small {
                    counts.large = ceil_units(remainder / large);
                } else if remainder > WattHours::ZERO {
                    counts.small = ceil_units(remainder / small);
                }
            }
        }
        counts
    }

    /// Bring the fleet up to the crew minimum with medium batteries.
    fn top_up(&self, mut counts: TierCounts, crew_size: u32) -> TierCounts {
        let minimum_units = self.policy.minimum_units(crew_size);
        if let Some(shortfall) = minimum_units.checked_sub(counts.total())
            && shortfall != 0
        {
            debug!(minimum_units, shortfall, "topping up with medium batteries");
            counts.medium = counts.medium.saturating_add(shortfall);
        }
        counts
    }

    fn advisories(job: &JobSpec, total_cost: Dollars) -> Vec<Advisory> {
        let mut advisories = Vec::new();
        if let Some(budget) = job.budget_limit
            && total_cost > budget
        {
            warn!(%budget, %total_cost, "over budget");
            advisories.push(Advisory::BudgetExceeded { budget, total_cost });
        }
        if job.require_fast_charging {
            advisories.push(Advisory::FastChargingRequested);
        }
        advisories
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        catalog::{PowerDrawClass, ToolProfile},
        core::ShiftPattern,
        quantity::{current::Amperes, ratios::Percentage},
    };

    fn tool(name: &str, power_draw: PowerDrawClass, average_usage: f64) -> ToolProfile {
        ToolProfile::builder()
            .name(name)
            .power_draw(power_draw)
            .average_usage(Percentage(average_usage))
            .consumption(Amperes(3.0))
            .build()
            .unwrap()
    }

    fn tools() -> ToolCatalog {
        ToolCatalog(vec![
            tool("Saw", PowerDrawClass::High, 40.0),
            tool("Drill", PowerDrawClass::Medium, 50.0),
            tool("Driver", PowerDrawClass::Low, 20.0),
        ])
    }

    fn configure_with(policy: &Policy, job: &JobSpec) -> FleetConfiguration {
        FleetConfigurator::builder()
            .batteries(&BatteryCatalog::default())
            .tools(&tools())
            .policy(policy)
            .build()
            .configure(job)
    }

    fn configure(job: &JobSpec) -> FleetConfiguration {
        configure_with(&Policy::default(), job)
    }

    fn job(tools: &[(&str, u32)], intensity: UsageIntensity) -> JobSpec {
        JobSpec::builder()
            .selected_tools(
                tools.iter().map(|(name, count)| ((*name).to_owned(), *count)).collect(),
            )
            .usage_intensity(intensity)
            .work_hours_per_day(Hours(8.0))
            .build()
    }

    /// Three high-draw tools at 40% on a heavy job with backup.
    #[test]
    fn test_heavy_intensity() {
        let job = JobSpec {
            crew_size: 4,
            require_backup: true,
            ..job(&[("Saw", 3)], UsageIntensity::Heavy)
        };
        let configuration = configure(&job);

        // 300 × 1.5 × 0.4 × 1.3 × 3 = 702 W, × 8 h = 5616 Wh, × 1.5 = 8424 Wh:
        assert_eq!(configuration.strategy, AllocationStrategy::LargeFirst);
        assert_eq!(configuration.peak_power_demand, Watts(1350.0));
        assert_eq!(configuration.daily_power_requirement, WattHours(5616.0));
        assert_eq!(configuration.counts, TierCounts { small: 0, medium: 1, large: 28 });
        assert_eq!(configuration.total_cost, Dollars(28.0 * 245.0 + 125.0));
        assert_eq!(configuration.chargers_needed, 8);
        assert_abs_diff_eq!(configuration.total_runtime.0, 28.0 * 5.0 + 3.0);
        assert_abs_diff_eq!(configuration.savings.0, 28.0 * 299.0 + 159.0 - 6985.0);
        assert!(configuration.advisories.is_empty());
    }

    #[test]
    fn test_minimum_floor_dominates() {
        let job = JobSpec { crew_size: 10, ..job(&[], UsageIntensity::Light) };
        let configuration = configure(&job);
        assert_eq!(configuration.counts, TierCounts { small: 0, medium: 15, large: 0 });
        assert_eq!(configuration.total_cost, Dollars(1875.0));
        assert_eq!(configuration.chargers_needed, 4);
        assert_eq!(configuration.daily_power_requirement, WattHours::ZERO);
    }

    #[test]
    fn test_empty_selection_for_any_crew() {
        let policy = Policy::default();
        for crew_size in 1..=12 {
            let job = JobSpec { crew_size, ..job(&[], UsageIntensity::Moderate) };
            let counts = configure(&job).counts;
            assert_eq!(counts.total(), policy.minimum_units(crew_size));
            assert_eq!(counts.medium, counts.total());
        }
    }

    #[test]
    fn test_peak_power_triggers_large_first() {
        // 5 saws: 300 × 1.5 × 5 = 2250 W peak on a moderate job.
        let configuration = configure(&job(&[("Saw", 5)], UsageIntensity::Moderate));
        assert_eq!(configuration.strategy, AllocationStrategy::LargeFirst);
        assert_eq!(configuration.peak_power_demand, Watts(2250.0));
    }

    #[test]
    fn test_peak_power_just_above_threshold() {
        let job = job(&[("Drill", 6), ("Driver", 1)], UsageIntensity::Moderate);
        let configuration = configure(&job);
        assert_eq!(configuration.peak_power_demand, Watts(2010.0));
        assert_eq!(configuration.strategy, AllocationStrategy::LargeFirst);
    }

    #[test]
    fn test_peak_power_at_threshold_is_not_high() {
        let policy = Policy { peak_power_threshold: Watts(1800.0), ..Policy::default() };
        let job = job(&[("Drill", 6)], UsageIntensity::Moderate);
        let configuration = configure_with(&policy, &job);
        assert_eq!(configuration.peak_power_demand, Watts(1800.0));
        assert_eq!(configuration.strategy, AllocationStrategy::MediumFirst);
    }

    #[test]
    fn test_light_intensity() {
        // 300 × 1.0 × 0.5 × 0.7 × 2 = 210 W, × 8 h = 1680 Wh, × 1.2 = 2016 Wh.
        // Medium: ⌊2016 / 180 / 2⌋ = 5 (900 Wh), small: ⌈1116 / 120⌉ = 10.
        let job = job(&[("Drill", 2)], UsageIntensity::Light);
        let configuration = configure(&job);
        assert_eq!(configuration.strategy, AllocationStrategy::MediumThenSmall);
        assert_eq!(configuration.counts, TierCounts { small: 10, medium: 5, large: 0 });
    }

    #[test]
    fn test_moderate_with_small_remainder() {
        // 300 × 1.0 × 0.5 × 1.0 × 1 = 150 W, × 8 h = 1200 Wh, × 1.2 = 1440 Wh.
        // Medium: ⌊1440 / 180⌋ = 8, remainder 0: no extra battery.
        let configuration = configure(&job(&[("Drill", 1)], UsageIntensity::Moderate));
        assert_eq!(configuration.counts, TierCounts { small: 0, medium: 8, large: 0 });

        // 300 × 1.5 × 0.4 × 1.0 × 2 = 360 W, × 8 h = 2880 Wh, × 1.2 = 3456 Wh.
        // Medium: ⌊3456 / 180⌋ = 19 (3420 Wh), remainder 36 Wh ≤ 120 Wh: one small.
        let configuration = configure(&job(&[("Saw", 2)], UsageIntensity::Moderate));
        assert_eq!(configuration.counts, TierCounts { small: 1, medium: 19, large: 0 });
    }

    #[test]
    fn test_moderate_with_remainder_above_small_capacity() {
        // 300 × 0.7 × 0.2 × 1.0 × 5 = 210 W, × 7 h = 1470 Wh, × 1.2 = 1764 Wh.
        // Medium: ⌊1764 / 180⌋ = 9 (1620 Wh), remainder 144 Wh > 120 Wh: one large.
        let job = JobSpec {
            work_hours_per_day: Hours(7.0),
            ..job(&[("Driver", 5)], UsageIntensity::Moderate)
        };
        let configuration = configure(&job);
        assert_eq!(configuration.strategy, AllocationStrategy::MediumFirst);
        assert_eq!(configuration.counts, TierCounts { small: 0, medium: 9, large: 1 });
    }

    #[test]
    fn test_shifts_and_jobsites_scale_the_fleet() {
        let single = configure(&job(&[("Drill", 2)], UsageIntensity::Light));
        let scaled = configure(&JobSpec {
            shift_pattern: ShiftPattern::Triple,
            jobsite_count: 2,
            ..job(&[("Drill", 2)], UsageIntensity::Light)
        });
        assert_eq!(scaled.counts, single.counts * 6);
    }

    #[test]
    fn test_unknown_tools_are_ignored() {
        let known = configure(&job(&[("Drill", 2)], UsageIntensity::Light));
        let with_unknown =
            configure(&job(&[("Drill", 2), ("Laser Cannon", 7)], UsageIntensity::Light));
        assert_eq!(known.counts, with_unknown.counts);
    }

    #[test]
    fn test_budget_advisory() {
        let job = JobSpec {
            budget_limit: Some(Dollars(1000.0)),
            require_fast_charging: true,
            crew_size: 10,
            ..job(&[], UsageIntensity::Light)
        };
        let configuration = configure(&job);
        assert_eq!(configuration.counts.total(), 15);
        assert_eq!(
            configuration.advisories,
            [
                Advisory::BudgetExceeded { budget: Dollars(1000.0), total_cost: Dollars(1875.0) },
                Advisory::FastChargingRequested,
            ],
        );
    }

    #[test]
    fn test_within_budget() {
        let job = JobSpec {
            budget_limit: Some(Dollars(1875.0)),
            crew_size: 10,
            ..job(&[], UsageIntensity::Light)
        };
        assert!(configure(&job).advisories.is_empty());
    }

    #[test]
    fn test_cost_and_chargers_are_consistent() {
        let catalog = BatteryCatalog::default();
        for intensity in [UsageIntensity::Light, UsageIntensity::Moderate, UsageIntensity::Heavy] {
            for (saws, drills, drivers) in [(0, 0, 3), (1, 2, 0), (4, 1, 2), (7, 0, 0)] {
                let configuration = configure(&JobSpec {
                    require_backup: saws % 2 == 0,
                    ..job(&[("Saw", saws), ("Drill", drills), ("Driver", drivers)], intensity)
                });
                let counts = configuration.counts;
                let expected_cost: f64 = counts
                    .iter()
                    .map(|(tier, count)| f64::from(count) * catalog[tier].price.0)
                    .sum();
                assert_eq!(configuration.total_cost, Dollars(expected_cost));
                assert_eq!(configuration.chargers_needed, counts.total().div_ceil(4));
                assert!(configuration.savings >= Dollars::ZERO);
            }
        }
    }

    #[test]
    fn test_fleet_grows_along_sample_workloads() {
        for intensity in [UsageIntensity::Light, UsageIntensity::Moderate, UsageIntensity::Heavy] {
            let mut previous: Option<FleetConfiguration> = None;
            let steps = [(1.0, 1), (2.0, 1), (4.0, 3), (8.0, 3), (8.0, 8), (12.0, 12)];
            for (hours, crew_size) in steps {
                let configuration = configure(&JobSpec {
                    work_hours_per_day: Hours(hours),
                    crew_size,
                    ..job(&[("Saw", 1), ("Drill", 2)], intensity)
                });
                if let Some(previous) = previous {
                    assert!(configuration.counts.total() >= previous.counts.total());
                    assert!(configuration.total_cost >= previous.total_cost);
                }
                previous = Some(configuration);
            }
        }
    }

    #[test]
    fn test_moderate_cost_can_drop_with_more_hours() {
        // 150 W × 1.75 h × 1.2 = 315 Wh: one medium, 135 Wh left needs a large one.
        let shorter = configure(&JobSpec {
            work_hours_per_day: Hours(1.75),
            ..job(&[("Drill", 1)], UsageIntensity::Moderate)
        });
        assert_eq!(shorter.counts, TierCounts { small: 0, medium: 1, large: 1 });
        assert_eq!(shorter.total_cost, Dollars(370.0));

        // 150 W × 2 h × 1.2 = 360 Wh: exactly two medium ones.
        let longer = configure(&JobSpec {
            work_hours_per_day: Hours(2.0),
            ..job(&[("Drill", 1)], UsageIntensity::Moderate)
        });
        assert_eq!(longer.counts, TierCounts { small: 0, medium: 2, large: 0 });
        assert_eq!(longer.total_cost, Dollars(250.0));
    }

    #[test]
    fn test_huge_fleet_saturates() {
        let job = JobSpec {
            crew_size: 4,
            require_backup: true,
            jobsite_count: 200_000_000,
            shift_pattern: ShiftPattern::Triple,
            ..job(&[("Saw", 3)], UsageIntensity::Heavy)
        };
        assert_eq!(job.validate(), Ok(()));

        let configuration = configure(&job);
        assert_eq!(
            configuration.counts,
            TierCounts { small: 0, medium: 600_000_000, large: u32::MAX },
        );
        assert_eq!(configuration.chargers_needed, u32::MAX.div_ceil(4));
        assert!(configuration.total_cost.is_finite());
        assert!(configuration.total_cost > Dollars(1e12));
    }

    #[test]
    fn test_serialize() {
        let configuration = configure(&JobSpec { crew_size: 2, ..job(&[], UsageIntensity::Light) });
        let value = serde_json::to_value(&configuration).unwrap();
        assert_eq!(value["counts"]["medium"], 3);
        assert_eq!(value["chargersNeeded"], 1);
        assert_eq!(value["totalCost"], 375.0);
        assert_eq!(value["totalRuntimeHours"], 9.0);
        assert_eq!(value["dailyPowerRequirementWh"], 0.0);
        assert_eq!(value["peakPowerDemandW"], 0.0);
    }
}
