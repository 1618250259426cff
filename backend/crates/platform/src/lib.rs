//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random bytes, Base64)
//! - Password hashing (Argon2id with NFKC normalization)
//! - Cookie management
//! - Client identification (IP extraction, bearer tokens)
//! - Rate limiting infrastructure and middleware

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod password;
pub mod rate_limit;
