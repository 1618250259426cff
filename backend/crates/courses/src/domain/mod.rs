//! Domain Layer - Progress Tracking Rules

pub mod tracker;
