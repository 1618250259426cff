//! Session Tokens
//!
//! Stateless HMAC-signed session tokens. There is no session table:
//! the token carries the user ID and its own expiry, and the signature
//! makes both tamper-proof.
//!
//! Format: `{user_id}.{expires_at_ms}.{signature}` where the signature
//! is URL-safe base64 (no padding) of HMAC-SHA256 over the first two
//! segments.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::value_object::user_id::UserId;

type HmacSha256 = Hmac<Sha256>;

/// Claims recovered from a verified session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub user_id: UserId,
    pub expires_at_ms: i64,
}

/// Generate a signed session token for a user
pub fn generate_session_token(config: &AuthConfig, user_id: &UserId) -> String {
    let expires_at_ms = Utc::now().timestamp_millis() + config.session_ttl_ms();
    let payload = format!("{}.{}", user_id, expires_at_ms);

    format!("{}.{}", payload, sign(config, &payload))
}

/// Verify a session token's signature and expiry
///
/// Returns None for malformed, tampered, or expired tokens.
pub fn verify_session_token(config: &AuthConfig, token: &str) -> Option<SessionClaims> {
    let mut parts = token.splitn(3, '.');
    let user_id_part = parts.next()?;
    let expires_part = parts.next()?;
    let signature_part = parts.next()?;

    let payload = format!("{}.{}", user_id_part, expires_part);

    // Constant-time signature check via the Mac trait
    let mut mac = new_mac(config);
    mac.update(payload.as_bytes());
    let signature = URL_SAFE_NO_PAD.decode(signature_part).ok()?;
    mac.verify_slice(&signature).ok()?;

    let expires_at_ms: i64 = expires_part.parse().ok()?;
    if Utc::now().timestamp_millis() >= expires_at_ms {
        return None;
    }

    let user_id = UserId::from_uuid(Uuid::parse_str(user_id_part).ok()?);

    Some(SessionClaims {
        user_id,
        expires_at_ms,
    })
}

fn new_mac(config: &AuthConfig) -> HmacSha256 {
    HmacSha256::new_from_slice(&config.session_secret).expect("HMAC can take key of any size")
}

fn sign(config: &AuthConfig, payload: &str) -> String {
    let mut mac = new_mac(config);
    mac.update(payload.as_bytes());
    URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
}
