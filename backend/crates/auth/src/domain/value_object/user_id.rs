//! User ID Value Object

/// Re-export the typed kernel ID for users
pub use kernel::id::UserId;
