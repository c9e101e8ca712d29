//! Custom Resource Definitions consumed by the override engine
//!
//! - IBPOrderer: Fabric ordering node

pub mod orderer;

pub use orderer::*;
