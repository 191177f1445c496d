#[macro_use]
mod macros;

pub mod cost;
pub mod current;
pub mod energy;
pub mod mass;
pub mod power;
pub mod ratios;
pub mod time;
