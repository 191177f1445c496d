use std::{collections::BTreeMap, path::PathBuf};

use clap::{Parser, Subcommand};
use fleet_power::{
    core::{JobSpec, ShiftPattern, UsageIntensity, UseCase},
    prelude::*,
    quantity::{cost::Dollars, time::Hours},
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    /// TOML file with the battery catalog, tool catalog, and sizing policy.
    ///
    /// Built-in defaults are used for anything the file does not specify.
    #[clap(long, env = "FLEET_POWER_SETTINGS")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the battery and tool catalogs.
    Catalog,

    /// Size a battery fleet for a job.
    Configure(Box<ConfigureArgs>),

    /// Recommend batteries for running a single tool for the desired time.
    Advise(AdviseArgs),
}

#[derive(Parser)]
pub struct ConfigureArgs {
    /// Selected tool as `NAME=COUNT`. Repeat for more tools.
    #[clap(long = "tool", value_parser = parse_tool_count)]
    pub tools: Vec<(String, u32)>,

    #[clap(long, value_enum, default_value = "moderate", env = "USAGE_INTENSITY")]
    pub intensity: UsageIntensity,

    #[clap(long = "work-hours", default_value = "8", env = "WORK_HOURS_PER_DAY")]
    pub work_hours_per_day: Hours,

    #[clap(long = "jobsites", default_value = "1", env = "JOBSITE_COUNT")]
    pub jobsite_count: u32,

    #[clap(long = "shifts", value_enum, default_value = "single", env = "SHIFT_PATTERN")]
    pub shift_pattern: ShiftPattern,

    #[clap(long, default_value = "1", env = "CREW_SIZE")]
    pub crew_size: u32,

    /// Add the backup safety margin.
    #[clap(long, env = "REQUIRE_BACKUP")]
    pub backup: bool,

    /// Informational: noted in the advisories.
    #[clap(long, env = "REQUIRE_FAST_CHARGING")]
    pub fast_charging: bool,

    /// Budget limit in dollars. Exceeding it produces an advisory.
    #[clap(long = "budget", env = "BUDGET_LIMIT")]
    pub budget_limit: Option<Dollars>,

    #[clap(flatten)]
    pub output: OutputArgs,
}

impl ConfigureArgs {
    pub fn job_spec(&self) -> JobSpec {
        let mut selected_tools = BTreeMap::<String, u32>::new();
        for (name, count) in &self.tools {
            *selected_tools.entry(name.clone()).or_default() += count;
        }
        JobSpec::builder()
            .selected_tools(selected_tools)
            .usage_intensity(self.intensity)
            .work_hours_per_day(self.work_hours_per_day)
            .jobsite_count(self.jobsite_count)
            .shift_pattern(self.shift_pattern)
            .crew_size(self.crew_size)
            .require_backup(self.backup)
            .require_fast_charging(self.fast_charging)
            .maybe_budget_limit(self.budget_limit)
            .build()
    }
}

#[derive(Parser)]
pub struct AdviseArgs {
    /// Tool name as listed in the catalog.
    #[clap(long)]
    pub tool: String,

    /// Desired operating time in hours.
    #[clap(long)]
    pub hours: Hours,

    #[clap(long, value_enum, default_value = "continuous", env = "USE_CASE")]
    pub use_case: UseCase,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Copy, Clone, Parser)]
pub struct OutputArgs {
    /// Print the result as JSON instead of tables.
    #[clap(long)]
    pub json: bool,
}

fn parse_tool_count(value: &str) -> Result<(String, u32)> {
    let (name, count) =
        value.rsplit_once('=').with_context(|| format!("expected `NAME=COUNT`, got `{value}`"))?;
    let name = name.trim();
    ensure!(!name.is_empty(), "empty tool name in `{value}`");
    let count = count.trim().parse().with_context(|| format!("invalid tool count in `{value}`"))?;
    Ok((name.to_owned(), count))
}
