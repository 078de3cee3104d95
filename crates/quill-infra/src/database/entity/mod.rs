//! SeaORM entities and their conversions to the domain types.

pub mod post;
pub mod user;
