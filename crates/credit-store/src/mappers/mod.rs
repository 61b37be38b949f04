//! Entity <-> model mappers

mod appreciation;
mod user;
