//! API process configuration loaded from the environment.

use std::net::SocketAddr;

use anyhow::Context;

/// Settings for the HTTP process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// `APP_BIND_ADDR`, default `0.0.0.0:8010`.
    pub bind_addr: SocketAddr,
    /// `USE_PERSISTENT_STORES`, default `true`. `false` serves from memory.
    pub use_persistent_stores: bool,
    /// `APP_ENSURE_SCHEMA`, default `true`. Create the table at startup.
    pub ensure_schema: bool,
}

impl ApiConfig {
    pub const DEFAULT_BIND_ADDR: &'static str = "0.0.0.0:8010";

    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let raw_addr = lookup("APP_BIND_ADDR").unwrap_or_else(|| Self::DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("APP_BIND_ADDR must be host:port, got {raw_addr:?}"))?;

        Ok(Self {
            bind_addr,
            use_persistent_stores: flag(&lookup, "USE_PERSISTENT_STORES", true)?,
            ensure_schema: flag(&lookup, "APP_ENSURE_SCHEMA", true)?,
        })
    }
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> anyhow::Result<bool> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<bool>()
            .with_context(|| format!("{key} must be true or false, got {raw:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = ApiConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8010".parse().unwrap());
        assert!(cfg.use_persistent_stores);
        assert!(cfg.ensure_schema);
    }

    #[test]
    fn reads_overrides() {
        let cfg = ApiConfig::from_lookup(|key| match key {
            "APP_BIND_ADDR" => Some("127.0.0.1:9000".to_string()),
            "USE_PERSISTENT_STORES" => Some("false".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(cfg.bind_addr.port(), 9000);
        assert!(!cfg.use_persistent_stores);
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(ApiConfig::from_lookup(|k| (k == "APP_BIND_ADDR").then(|| "nope".to_string())).is_err());
        assert!(ApiConfig::from_lookup(|k| (k == "APP_ENSURE_SCHEMA").then(|| "yes".to_string())).is_err());
    }
}
