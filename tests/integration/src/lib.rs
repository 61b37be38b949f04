//! Integration test utilities for the social credit bot
//!
//! Drives the update router in-process with a recording transport, and the
//! health endpoint over real HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
