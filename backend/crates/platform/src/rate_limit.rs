//! Rate Limiting Infrastructure
//!
//! Common rate limiting abstractions, an in-memory fixed-window store,
//! and an axum middleware that keys limits by client IP.

use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::{
    Json,
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tokio::sync::Mutex;

use crate::client::extract_client_ip;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(900),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

/// Rate limit check result
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Check and increment rate limit counter
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>>;
}

// ============================================================================
// In-Memory Store (fixed window, lazily reset)
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct WindowState {
    count: u32,
    window_started_at_ms: i64,
}

/// In-memory fixed-window rate limit store
///
/// Windows are reset lazily on access; stale entries for quiet keys
/// persist until the next request from that key.
#[derive(Debug, Default)]
pub struct MemoryRateLimitStore {
    windows: Mutex<HashMap<String, WindowState>>,
}

impl MemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn now_ms() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

impl RateLimitStore for MemoryRateLimitStore {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>> {
        let now_ms = Self::now_ms();
        let window_ms = config.window_ms();

        let mut windows = self.windows.lock().await;

        let state = windows
            .entry(key.to_string())
            .or_insert_with(|| WindowState {
                count: 0,
                window_started_at_ms: now_ms,
            });

        if now_ms - state.window_started_at_ms >= window_ms {
            state.count = 0;
            state.window_started_at_ms = now_ms;
        }

        let reset_at_ms = state.window_started_at_ms + window_ms;

        if state.count >= config.max_requests {
            return Ok(RateLimitResult {
                allowed: false,
                remaining: 0,
                reset_at_ms,
            });
        }

        state.count += 1;

        Ok(RateLimitResult {
            allowed: true,
            remaining: config.max_requests - state.count,
            reset_at_ms,
        })
    }
}

// ============================================================================
// Middleware
// ============================================================================

/// Shared state for the rate limit middleware
#[derive(Clone)]
pub struct RateLimitState {
    pub store: Arc<MemoryRateLimitStore>,
    pub config: RateLimitConfig,
}

impl RateLimitState {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            store: Arc::new(MemoryRateLimitStore::new()),
            config,
        }
    }
}

/// Rate limit middleware keyed by client IP
///
/// Clients without a determinable IP share the "unknown" bucket.
/// Store errors fail open so that the limiter can never take the
/// API down with it.
pub async fn rate_limit_middleware(
    State(state): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Result<Response, Infallible> {
    let direct_ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    let client_ip = extract_client_ip(request.headers(), direct_ip);
    let key = client_ip
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    // UFCS: trait_variant generates both RateLimitStore and a blanket
    // LocalRateLimitStore impl, so the method call alone is ambiguous
    match RateLimitStore::check_and_increment(state.store.as_ref(), &key, &state.config).await {
        Ok(result) if !result.allowed => {
            tracing::warn!(client_ip = %key, "Rate limit exceeded");

            let body = Json(json!({
                "success": false,
                "message": "Too many requests from this IP, please try again later.",
            }));

            Ok((StatusCode::TOO_MANY_REQUESTS, body).into_response())
        }
        Ok(_) => Ok(next.run(request).await),
        Err(error) => {
            tracing::error!(%error, "Rate limit store failed; allowing request");
            Ok(next.run(request).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Calls go through the trait path because trait_variant also emits
    // a blanket LocalRateLimitStore impl
    async fn check(
        store: &MemoryRateLimitStore,
        key: &str,
        config: &RateLimitConfig,
    ) -> RateLimitResult {
        RateLimitStore::check_and_increment(store, key, config)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_allows_up_to_limit() {
        let store = MemoryRateLimitStore::new();
        let config = RateLimitConfig::new(3, 900);

        for expected_remaining in [2, 1, 0] {
            let result = check(&store, "1.2.3.4", &config).await;
            assert!(result.allowed);
            assert_eq!(result.remaining, expected_remaining);
        }

        let result = check(&store, "1.2.3.4", &config).await;
        assert!(!result.allowed);
        assert_eq!(result.remaining, 0);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let store = MemoryRateLimitStore::new();
        let config = RateLimitConfig::new(1, 900);

        assert!(check(&store, "a", &config).await.allowed);
        assert!(!check(&store, "a", &config).await.allowed);
        assert!(check(&store, "b", &config).await.allowed);
    }

    #[tokio::test]
    async fn test_window_resets() {
        let store = MemoryRateLimitStore::new();
        // Zero-length window: every check starts a fresh window
        let config = RateLimitConfig::new(1, 0);

        assert!(check(&store, "a", &config).await.allowed);
        assert!(check(&store, "a", &config).await.allowed);
    }

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert_eq!(config.max_requests, 100);
        assert_eq!(config.window, Duration::from_secs(900));
        assert_eq!(config.window_ms(), 900_000);
    }
}
