//! Application Layer - Use Cases

/// Maximum retries when an update loses the optimistic lock race
pub const MAX_UPDATE_RETRIES: usize = 3;

pub mod config;
pub mod current_user;
pub mod login;
pub mod profile;
pub mod progress;
pub mod register;
pub mod session;

pub use current_user::CurrentUserUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use profile::{UpdateProfileInput, UpdateProfileUseCase};
pub use progress::{UpdateProgressInput, UpdateProgressUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use session::{SessionClaims, generate_session_token, verify_session_token};
