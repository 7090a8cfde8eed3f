//! Fixed-window rate limiting for the `/api` routes, keyed by client IP.

use axum::extract::{ConnectInfo, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::error::ApiError;
use super::state::AppState;

pub const RATE_LIMITED_MESSAGE: &str = "Too many requests, please try again later.";

/// Entries are pruned once the table grows past this many clients.
const PRUNE_THRESHOLD: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub max_requests: u64,
    pub window: Duration,
}

pub struct RateLimiter {
    config: RateLimitConfig,
    inner: Mutex<HashMap<String, RateState>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitOutcome {
    pub allowed: bool,
    pub remaining: u64,
    pub retry_after: Option<Duration>,
}

struct RateState {
    window_start: Instant,
    count: u64,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            inner: Mutex::new(HashMap::new()),
        }
    }

    pub async fn check(&self, key: &str) -> RateLimitOutcome {
        let RateLimitConfig {
            max_requests: limit,
            window,
        } = self.config;
        if limit == 0 {
            return RateLimitOutcome {
                allowed: false,
                remaining: 0,
                retry_after: Some(window),
            };
        }

        let mut guard = self.inner.lock().await;
        if guard.len() >= PRUNE_THRESHOLD && !guard.contains_key(key) {
            guard.retain(|_, state| state.window_start.elapsed() < window);
        }

        let entry = guard.entry(key.to_string()).or_insert_with(|| RateState {
            window_start: Instant::now(),
            count: 0,
        });

        if entry.window_start.elapsed() >= window {
            entry.window_start = Instant::now();
            entry.count = 0;
        }

        entry.count += 1;
        if entry.count > limit {
            let retry_after = window.saturating_sub(entry.window_start.elapsed());
            return RateLimitOutcome {
                allowed: false,
                remaining: 0,
                retry_after: Some(retry_after),
            };
        }

        RateLimitOutcome {
            allowed: true,
            remaining: limit.saturating_sub(entry.count),
            retry_after: None,
        }
    }
}

fn client_key(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn enforce(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let key = client_key(&request);
    let outcome = state.limiter.check(&key).await;
    if !outcome.allowed {
        let retry_after = outcome.retry_after.unwrap_or_default().as_secs().max(1);
        tracing::warn!(client = %key, retry_after, "rate limit exceeded");
        return ApiError::new(StatusCode::TOO_MANY_REQUESTS, RATE_LIMITED_MESSAGE)
            .with_header("retry-after", retry_after.to_string())
            .into_response();
    }
    next.run(request).await
}
