use crate::{
    catalog::Tier,
    quantity::{cost::Dollars, current::Amperes, energy::AmpHours, ratios::Percentage, time::Hours},
};

/// Input rejected by the engine before it could produce a meaningless result.
#[derive(Clone, Debug, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InvalidInput {
    #[display("tool `{tool}` must consume a positive finite current, got {consumption}")]
    Consumption { tool: String, consumption: Amperes },

    #[display("average usage of tool `{tool}` must be within (0, 100], got {usage}")]
    AverageUsage { tool: String, usage: Percentage },

    #[display("tool `{tool}` is listed more than once")]
    DuplicateTool { tool: String },

    #[display("work hours per day must be positive, got {_0}")]
    WorkHours(#[error(not(source))] Hours),

    #[display("crew size must be at least one")]
    EmptyCrew,

    #[display("job-site count must be at least one")]
    NoJobsites,

    #[display("desired runtime must be positive, got {_0}")]
    HoursNeeded(#[error(not(source))] Hours),

    #[display("{tier} battery capacity must be positive, got {capacity}")]
    Capacity { tier: Tier, capacity: AmpHours },

    #[display("{higher} battery capacity must exceed the {lower} one")]
    CapacityOrder { lower: Tier, higher: Tier },

    #[display("{tier} battery MSRP {msrp} is below its price {price}")]
    Msrp { tier: Tier, price: Dollars, msrp: Dollars },

    #[display("at least one battery per charger is required")]
    UnitsPerCharger,
}
