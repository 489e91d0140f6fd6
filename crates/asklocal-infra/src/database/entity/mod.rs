//! SeaORM entities, one per table.

pub mod answer;
pub mod category;
pub mod country;
pub mod location;
pub mod question;
pub mod recommendation;
pub mod user;
