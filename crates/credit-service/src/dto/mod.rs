//! Values handed from services to the transport shell

mod reaction;

pub use reaction::{Outcome, Reaction};
