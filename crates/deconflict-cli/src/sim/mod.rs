//! Scenario catalogue and synthetic traffic.

pub mod scenarios;
pub mod traffic;

pub use scenarios::{catalogue, find_scenario, Scenario};
pub use traffic::{random_mission, random_traffic, TrafficConfig};
