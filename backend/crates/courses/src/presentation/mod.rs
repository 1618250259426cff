//! Presentation Layer - HTTP API

pub mod dto;
pub mod handlers;
pub mod router;
