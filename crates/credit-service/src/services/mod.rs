//! Business logic services

pub mod admin;
pub mod context;
pub mod error;
pub mod rating;
pub mod resolver;

pub use admin::AdminService;
pub use context::{Policy, ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use rating::RatingEngine;
pub use resolver::IdentityResolver;

#[cfg(test)]
pub(crate) mod testing;
