//! Domain entities - core business objects

mod appreciation;
mod user;

pub use appreciation::AppreciationEvent;
pub use user::UserRecord;
