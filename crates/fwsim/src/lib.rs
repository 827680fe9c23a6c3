//! fwsim library: application logic for the Floyd-Warshall simulator.

pub mod app;
pub mod config;
pub mod errors;
