use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context as _;

use crate::cli::{ServeArgs, UpstreamArgs};
use crate::client::{DEFAULT_TIMEOUT, DEFAULT_UPSTREAM_URL, WikiClient};

pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

const ADDR_ENV: &str = "PERSONBIO_ADDR";
const UPSTREAM_URL_ENV: &str = "PERSONBIO_UPSTREAM_URL";
const TIMEOUT_SECS_ENV: &str = "PERSONBIO_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    /// Kept unparsed; a bad value surfaces per request, not at startup.
    pub url: String,
    pub timeout: Duration,
}

impl UpstreamConfig {
    pub fn resolve(args: &UpstreamArgs) -> Self {
        Self::resolve_with(args, env_var)
    }

    /// Flags win over `env`, which wins over the defaults.
    pub fn resolve_with(args: &UpstreamArgs, env: impl Fn(&str) -> Option<String>) -> Self {
        let url = args
            .upstream_url
            .clone()
            .or_else(|| env(UPSTREAM_URL_ENV))
            .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_owned());

        let timeout = args
            .timeout_secs
            .or_else(|| {
                env(TIMEOUT_SECS_ENV)
                    .and_then(|v| v.parse::<u64>().ok())
                    .filter(|v| (1..=300).contains(v))
            })
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        if let Err(err) = url::Url::parse(&url) {
            tracing::warn!(url = %url, %err, "upstream url does not parse; lookups will fail");
        }

        Self { url, timeout }
    }

    pub fn client(&self) -> anyhow::Result<WikiClient> {
        WikiClient::new(self.url.clone(), self.timeout)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeConfig {
    pub addr: SocketAddr,
    pub upstream: UpstreamConfig,
}

impl ServeConfig {
    pub fn resolve(args: &ServeArgs) -> anyhow::Result<Self> {
        Self::resolve_with(args, env_var)
    }

    pub fn resolve_with(
        args: &ServeArgs,
        env: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let addr = match (args.addr, env(ADDR_ENV)) {
            (Some(addr), _) => addr,
            (None, Some(raw)) => raw
                .parse::<SocketAddr>()
                .with_context(|| format!("parse {ADDR_ENV}: {raw}"))?,
            (None, None) => DEFAULT_ADDR
                .parse::<SocketAddr>()
                .context("parse default bind address")?,
        };

        Ok(Self {
            addr,
            upstream: UpstreamConfig::resolve_with(&args.upstream, env),
        })
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn upstream_args(url: Option<&str>, timeout_secs: Option<u64>) -> UpstreamArgs {
        UpstreamArgs {
            upstream_url: url.map(str::to_owned),
            timeout_secs,
        }
    }

    #[test]
    fn defaults_apply_without_flags_or_env() {
        let config = UpstreamConfig::resolve_with(&upstream_args(None, None), env_from(&[]));
        assert_eq!(config.url, DEFAULT_UPSTREAM_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn env_overrides_defaults_and_flags_override_env() {
        let env = env_from(&[
            (UPSTREAM_URL_ENV, "http://env.test/api.php"),
            (TIMEOUT_SECS_ENV, "3"),
        ]);
        let config = UpstreamConfig::resolve_with(&upstream_args(None, None), &env);
        assert_eq!(config.url, "http://env.test/api.php");
        assert_eq!(config.timeout, Duration::from_secs(3));

        let config = UpstreamConfig::resolve_with(
            &upstream_args(Some("http://flag.test/api.php"), Some(7)),
            &env,
        );
        assert_eq!(config.url, "http://flag.test/api.php");
        assert_eq!(config.timeout, Duration::from_secs(7));
    }

    #[test]
    fn out_of_range_env_timeout_falls_back() {
        for raw in ["0", "301", "soon"] {
            let config = UpstreamConfig::resolve_with(
                &upstream_args(None, None),
                env_from(&[(TIMEOUT_SECS_ENV, raw)]),
            );
            assert_eq!(config.timeout, DEFAULT_TIMEOUT, "{raw}");
        }
    }

    #[test]
    fn malformed_upstream_url_is_kept_for_request_time() {
        let config =
            UpstreamConfig::resolve_with(&upstream_args(Some("not a url"), None), env_from(&[]));
        assert_eq!(config.url, "not a url");
        assert!(config.client().is_ok());
    }

    #[test]
    fn bind_address_resolution() {
        let args = ServeArgs {
            addr: None,
            upstream: upstream_args(None, None),
        };
        let config = ServeConfig::resolve_with(&args, env_from(&[])).unwrap();
        assert_eq!(config.addr, DEFAULT_ADDR.parse::<SocketAddr>().unwrap());

        let config =
            ServeConfig::resolve_with(&args, env_from(&[(ADDR_ENV, "0.0.0.0:9000")])).unwrap();
        assert_eq!(config.addr, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());

        assert!(ServeConfig::resolve_with(&args, env_from(&[(ADDR_ENV, "nowhere")])).is_err());
    }
}
