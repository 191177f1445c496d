use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use fleet_power::{
    catalog::{BatteryCatalog, PowerDrawClass, ToolCatalog},
    core::{Advisory, FleetConfiguration, RuntimeAdvice},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

#[must_use]
pub fn build_battery_catalog_table(catalog: &BatteryCatalog) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Tier",
        "Battery",
        "Energy",
        "Price",
        "MSRP",
        "Runtime",
        "Weight",
        "Charge time",
    ]);
    for (tier, spec) in catalog.iter() {
        table.add_row(vec![
            Cell::new(tier).add_attribute(Attribute::Dim),
            Cell::new(spec.label()).add_attribute(Attribute::Bold),
            Cell::new(spec.watt_hours()).set_alignment(CellAlignment::Right),
            Cell::new(spec.price).set_alignment(CellAlignment::Right),
            Cell::new(spec.msrp).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
            Cell::new(spec.runtime).set_alignment(CellAlignment::Right),
            Cell::new(spec.weight).set_alignment(CellAlignment::Right),
            Cell::new(spec.charge_time()).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[must_use]
pub fn build_tool_catalog_table(catalog: &ToolCatalog) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Tool", "Power draw", "Average usage", "Consumption"]);
    for tool in catalog.iter() {
        table.add_row(vec![
            Cell::new(&tool.name),
            Cell::new(tool.power_draw).fg(match tool.power_draw {
                PowerDrawClass::Low => Color::Green,
                PowerDrawClass::Medium => Color::DarkYellow,
                PowerDrawClass::High => Color::Red,
            }),
            Cell::new(tool.average_usage).set_alignment(CellAlignment::Right),
            Cell::new(tool.consumption).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[must_use]
pub fn build_fleet_table(configuration: &FleetConfiguration, catalog: &BatteryCatalog) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Battery", "Count", "Unit price", "Subtotal"]);
    for (tier, count) in configuration.counts.iter() {
        let spec = &catalog[tier];
        table.add_row(vec![
            Cell::new(spec.label()).add_attribute(Attribute::Bold),
            Cell::new(count)
                .set_alignment(CellAlignment::Right)
                .fg(if count == 0 { Color::DarkGrey } else { Color::Reset }),
            Cell::new(spec.price).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
            Cell::new(spec.price * f64::from(count)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[must_use]
pub fn build_summary_table(configuration: &FleetConfiguration) -> Table {
    let mut table = new_table();
    let rows: [(&str, String); 9] = [
        ("Strategy", configuration.strategy.to_string()),
        ("Batteries", configuration.counts.total().to_string()),
        ("Total cost", configuration.total_cost.to_string()),
        ("Savings", configuration.savings.to_string()),
        ("Total runtime", configuration.total_runtime.to_string()),
        ("Chargers", configuration.chargers_needed.to_string()),
        ("Daily energy", configuration.daily_power_requirement.to_string()),
        ("Peak power", configuration.peak_power_demand.to_string()),
        ("Total weight", configuration.total_weight.to_string()),
    ];
    for (name, value) in rows {
        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Dim),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }
    for advisory in &configuration.advisories {
        table.add_row(vec![
            Cell::new("Advisory").add_attribute(Attribute::Dim),
            Cell::new(advisory).fg(match advisory {
                Advisory::BudgetExceeded { .. } => Color::Red,
                Advisory::FastChargingRequested => Color::DarkYellow,
            }),
        ]);
    }
    table
}

#[must_use]
pub fn build_runtime_table(advice: &RuntimeAdvice, catalog: &BatteryCatalog) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Battery", "Capacity", "Runtime"]);
    for runtime in &advice.runtimes {
        table.add_row(vec![
            Cell::new(catalog[runtime.tier].label()).add_attribute(Attribute::Bold),
            Cell::new(runtime.capacity).set_alignment(CellAlignment::Right),
            Cell::new(runtime.runtime).set_alignment(CellAlignment::Right).fg(
                if runtime.runtime >= advice.hours_needed { Color::Green } else { Color::Reset },
            ),
        ]);
    }
    table
}

#[must_use]
pub fn build_scenarios_table(advice: &RuntimeAdvice, catalog: &BatteryCatalog) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Scenario", "Configuration", "Capacity", "Optimal"]);
    for scenario in &advice.scenarios {
        let capacity = scenario
            .configuration
            .map_or_else(String::new, |configuration| configuration.capacity(catalog).to_string());
        table.add_row(vec![
            Cell::new(scenario.kind),
            Cell::new(scenario.describe(catalog)).fg(if scenario.configuration.is_some() {
                Color::Reset
            } else {
                Color::Red
            }),
            Cell::new(capacity).set_alignment(CellAlignment::Right),
            if scenario.is_optimal {
                Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
            } else {
                Cell::new("")
            },
        ]);
    }
    table
}
