mod advisor;
mod configurator;
mod counts;
mod error;
mod job;

pub use self::{
    advisor::{
        RuntimeAdvice,
        RuntimeAdvisor,
        ScenarioKind,
        ScenarioRecommendation,
        TierRuntime,
        UseCase,
    },
    configurator::{Advisory, AllocationStrategy, FleetConfiguration, FleetConfigurator},
    counts::TierCounts,
    error::InvalidInput,
    job::{JobSpec, ShiftPattern, UsageIntensity},
};
