//! SeaORM entities for the teams, tags and taps tables.

pub mod tag;
pub mod tap;
pub mod team;
