#![allow(clippy::doc_markdown)]

//! Cordless battery fleet sizing.
//!
//! The [`core::FleetConfigurator`] turns a job description into a cost-optimal mix of the three
//! battery tiers of the [`catalog::BatteryCatalog`], and the [`core::RuntimeAdvisor`] maps
//! a desired operating duration of a single tool back to battery combinations.

pub mod catalog;
pub mod config;
pub mod core;
pub mod policy;
pub mod prelude;
pub mod quantity;
