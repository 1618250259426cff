//! Domain Entities

pub mod enrollment;
pub mod user;
