//! Assist Backend Module
//!
//! Thin pass-through to an OpenAI-compatible chat-completion API for
//! code explanations and learning assistance (hints, debugging help).
//!
//! Structure:
//! - `config` - Upstream API configuration
//! - `client` - Chat-completion HTTP client
//! - `prompt` - Prompt templates and response formatting
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod client;
pub mod config;
pub mod error;
pub mod presentation;
pub mod prompt;

pub use client::ChatClient;
pub use config::AssistConfig;
pub use error::{AssistError, AssistResult};
pub use presentation::router::assist_router;
