mod battery;
mod tool;

pub use self::{
    battery::{BatteryCatalog, BatterySpec, Tier},
    tool::{PowerDrawClass, ToolCatalog, ToolProfile},
};
