use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ENV: &str = "development";

const PORT_VAR: &str = "PORT";
/// Environment label variables, first non-empty wins. `NODE_ENV` keeps
/// existing deployments reporting the label they already set.
const ENV_VARS: [&str; 2] = ["APP_ENV", "NODE_ENV"];

/// Server configuration, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    /// Free-form environment label reported by `/status`.
    pub env: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            env: DEFAULT_ENV.to_string(),
        }
    }
}

impl Config {
    /// Reads the process environment, falling back to a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| match env::var(key) {
            Ok(value) => Some(value),
            Err(_) => dotenv::var(key).ok(),
        })
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match non_empty(lookup(PORT_VAR)) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("invalid {}: {:?}", PORT_VAR, raw))?,
            None => DEFAULT_PORT,
        };
        let env = ENV_VARS
            .into_iter()
            .find_map(|key| non_empty(lookup(key)))
            .unwrap_or_else(|| DEFAULT_ENV.to_string());

        Ok(Self { port, env })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.port, 3000);
        assert_eq!(config.env, "development");
    }

    #[test]
    fn test_reads_port_and_env() {
        let config =
            Config::from_lookup(lookup_from(&[("PORT", "8080"), ("APP_ENV", "production")]))
                .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.env, "production");
        assert_eq!(config.addr(), SocketAddr::from(([0, 0, 0, 0], 8080)));
    }

    #[test]
    fn test_node_env_is_accepted() {
        let config = Config::from_lookup(lookup_from(&[("NODE_ENV", "production")])).unwrap();
        assert_eq!(config.env, "production");

        let config =
            Config::from_lookup(lookup_from(&[("APP_ENV", "staging"), ("NODE_ENV", "production")]))
                .unwrap();
        assert_eq!(config.env, "staging");

        let config =
            Config::from_lookup(lookup_from(&[("APP_ENV", ""), ("NODE_ENV", "production")]))
                .unwrap();
        assert_eq!(config.env, "production");
    }

    #[test]
    fn test_empty_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[("PORT", ""), ("APP_ENV", "  ")])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "not-a-port")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));

        assert!(Config::from_lookup(lookup_from(&[("PORT", "70000")])).is_err());
    }
}
