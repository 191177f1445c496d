#![allow(clippy::doc_markdown)]

mod cli;
mod tables;

use clap::{Parser, crate_version};
use fleet_power::{
    config::Settings,
    core::{FleetConfigurator, RuntimeAdvisor},
    prelude::*,
};
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{AdviseArgs, Args, Command, ConfigureArgs},
    tables::{
        build_battery_catalog_table,
        build_fleet_table,
        build_runtime_table,
        build_scenarios_table,
        build_summary_table,
        build_tool_catalog_table,
    },
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.as_str()));
    tracing_subscriber::fmt()
        .without_time()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let settings = Settings::read_from(args.settings.as_deref())?;

    match args.command {
        Command::Catalog => {
            println!("{}", build_battery_catalog_table(&settings.batteries));
            println!("{}", build_tool_catalog_table(&settings.tools));
        }
        Command::Configure(args) => configure(&settings, &args)?,
        Command::Advise(args) => advise(&settings, &args)?,
    }

    info!("done!");
    Ok(())
}

fn configure(settings: &Settings, args: &ConfigureArgs) -> Result {
    let job = args.job_spec();
    job.validate().context("invalid job")?;

    let configuration = FleetConfigurator::builder()
        .batteries(&settings.batteries)
        .tools(&settings.tools)
        .policy(&settings.policy)
        .build()
        .configure(&job);

    if args.output.json {
        println!("{}", serde_json::to_string_pretty(&configuration)?);
    } else {
        println!("{}", build_fleet_table(&configuration, &settings.batteries));
        println!("{}", build_summary_table(&configuration));
    }
    Ok(())
}

fn advise(settings: &Settings, args: &AdviseArgs) -> Result {
    let tool = settings
        .tools
        .get(&args.tool)
        .with_context(|| format!("unknown tool `{}`, see `catalog`", args.tool))?;

    let advice = RuntimeAdvisor::builder()
        .batteries(&settings.batteries)
        .policy(&settings.policy)
        .build()
        .advise(tool, args.hours, args.use_case)
        .context("cannot advise on the tool")?;
    info!(need = %advice.adjusted_need, optimal = %advice.optimal().kind, "advised");

    if args.output.json {
        println!("{}", serde_json::to_string_pretty(&advice)?);
    } else {
        println!("{}", build_runtime_table(&advice, &settings.batteries));
        println!("{}", build_scenarios_table(&advice, &settings.batteries));
    }
    Ok(())
}
