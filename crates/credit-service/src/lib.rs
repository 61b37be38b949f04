//! # credit-service
//!
//! Application layer: resolves platform references to ledger records, applies
//! rating reactions through the appreciation window, and serves the admin
//! dump/override commands. Storage is reached only through the `credit-core`
//! traits held by [`ServiceContext`].

pub mod dto;
pub mod services;

pub use dto::{Outcome, Reaction};
pub use services::{
    AdminService, IdentityResolver, Policy, RatingEngine, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult,
};
