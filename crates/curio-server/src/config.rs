use anyhow::{Context, Result, anyhow};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use curio_core::domain::{UserId, UserProfile};

use crate::http::rate_limit::RateLimitConfig;

pub const DEFAULT_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_WEBHOOK_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_RATE_LIMIT_MAX: u64 = 100;
pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 15 * 60;

#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub url: String,
    pub timeout: Duration,
}

/// One `CURIO_USERS` entry: a bearer token and the profile it signs in as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedUser {
    pub token: String,
    pub profile: UserProfile,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub webhook: Option<WebhookConfig>,
    pub rate_limit: RateLimitConfig,
    pub users: Vec<SeedUser>,
}

pub fn load_config() -> Result<ServerConfig> {
    ServerConfig::from_lookup(|name| env::var(name).ok())
}

impl ServerConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let addr = socket_addr_from(&lookup, "CURIO_ADDR", DEFAULT_ADDR)?;

        let webhook = match non_empty(&lookup, "CURIO_WEBHOOK_URL") {
            Some(url) => Some(WebhookConfig {
                url,
                timeout: Duration::from_millis(u64_from(
                    &lookup,
                    "CURIO_WEBHOOK_TIMEOUT_MS",
                    DEFAULT_WEBHOOK_TIMEOUT_MS,
                )?),
            }),
            None => None,
        };

        let rate_limit = RateLimitConfig {
            max_requests: u64_from(&lookup, "CURIO_RATE_LIMIT_MAX", DEFAULT_RATE_LIMIT_MAX)?,
            window: Duration::from_secs(u64_from(
                &lookup,
                "CURIO_RATE_LIMIT_WINDOW_SECS",
                DEFAULT_RATE_LIMIT_WINDOW_SECS,
            )?),
        };

        let users = match non_empty(&lookup, "CURIO_USERS") {
            Some(raw) => parse_users(&raw).context("invalid CURIO_USERS")?,
            None => Vec::new(),
        };

        Ok(Self {
            addr,
            webhook,
            rate_limit,
            users,
        })
    }
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn socket_addr_from(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: &str,
) -> Result<SocketAddr> {
    let value = non_empty(lookup, name).unwrap_or_else(|| default.to_string());
    SocketAddr::from_str(&value).map_err(|err| anyhow!("invalid socket addr for {name}: {err}"))
}

fn u64_from(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: u64) -> Result<u64> {
    match non_empty(lookup, name) {
        Some(value) => value
            .parse()
            .map_err(|err| anyhow!("invalid number for {name}: {err}")),
        None => Ok(default),
    }
}

/// Parses comma-separated `token:user_id:email` entries.
pub fn parse_users(raw: &str) -> Result<Vec<SeedUser>> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let mut parts = entry.splitn(3, ':').map(str::trim);
            let (Some(token), Some(id), Some(email)) = (parts.next(), parts.next(), parts.next())
            else {
                return Err(anyhow!("expected token:user_id:email, got {entry:?}"));
            };
            if token.is_empty() || email.is_empty() {
                return Err(anyhow!("empty token or email in {entry:?}"));
            }
            let id = UserId::parse(id).ok_or_else(|| anyhow!("empty user id in {entry:?}"))?;
            Ok(SeedUser {
                token: token.to_string(),
                profile: UserProfile {
                    id,
                    email: email.to_string(),
                },
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.addr, DEFAULT_ADDR.parse().unwrap());
        assert!(config.webhook.is_none());
        assert_eq!(config.rate_limit.max_requests, 100);
        assert_eq!(config.rate_limit.window, Duration::from_secs(900));
        assert!(config.users.is_empty());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("CURIO_ADDR", "127.0.0.1:8080"),
            ("CURIO_WEBHOOK_URL", "https://hooks.example.com/in"),
            ("CURIO_WEBHOOK_TIMEOUT_MS", "250"),
            ("CURIO_RATE_LIMIT_MAX", "5"),
            ("CURIO_RATE_LIMIT_WINDOW_SECS", "60"),
            ("CURIO_USERS", "t1:u1:u1@example.com"),
        ]))
        .unwrap();

        assert_eq!(config.addr, "127.0.0.1:8080".parse().unwrap());
        let webhook = config.webhook.unwrap();
        assert_eq!(webhook.url, "https://hooks.example.com/in");
        assert_eq!(webhook.timeout, Duration::from_millis(250));
        assert_eq!(config.rate_limit.max_requests, 5);
        assert_eq!(config.rate_limit.window, Duration::from_secs(60));
        assert_eq!(config.users.len(), 1);
    }

    #[test]
    fn blank_webhook_url_means_disabled() {
        let config = ServerConfig::from_lookup(lookup(&[("CURIO_WEBHOOK_URL", "  ")])).unwrap();
        assert!(config.webhook.is_none());
    }

    #[rstest]
    #[case::bad_addr("CURIO_ADDR", "not-a-socket")]
    #[case::bad_timeout("CURIO_WEBHOOK_TIMEOUT_MS", "soon")]
    #[case::bad_max("CURIO_RATE_LIMIT_MAX", "-1")]
    #[case::bad_users("CURIO_USERS", "only-a-token")]
    fn invalid_values_are_errors(#[case] key: &str, #[case] value: &str) {
        let mut pairs = vec![(key, value)];
        if key == "CURIO_WEBHOOK_TIMEOUT_MS" {
            pairs.push(("CURIO_WEBHOOK_URL", "http://127.0.0.1:9/hook"));
        }
        assert!(ServerConfig::from_lookup(lookup(&pairs)).is_err());
    }

    #[test]
    fn parse_users_reads_entries() {
        let users = parse_users(" t1:u1:u1@example.com , t2 : u2 : u2@example.com ,").unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].token, "t1");
        assert_eq!(users[1].profile.id, UserId::parse("u2").unwrap());
        assert_eq!(users[1].profile.email, "u2@example.com");
    }

    #[rstest]
    #[case::missing_email("t1:u1")]
    #[case::empty_id("t1::a@example.com")]
    #[case::empty_token(":u1:a@example.com")]
    fn parse_users_rejects_malformed_entries(#[case] raw: &str) {
        assert!(parse_users(raw).is_err());
    }
}
