//! Value objects - immutable types that represent domain concepts

mod rating_command;
mod user_id;
mod user_ref;

pub use rating_command::{is_milestone, RatingCommand, DEFAULT_MILESTONE_EVERY};
pub use user_id::{UserId, UserIdParseError};
pub use user_ref::{normalize_handle, same_handle, Lookup, UserKey, UserKeys, UserRef};
