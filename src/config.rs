//! Process settings read from the environment (a `.env` file is loaded first by the binary).

use crate::error::ConfigError;
use std::str::FromStr;

/// `DATABASE_URL` value that selects the in-memory store.
pub const MEMORY_DATABASE_URL: &str = "memory";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    /// Empty means any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: "postgres://localhost/products".into(),
            max_connections: 5,
            host: "0.0.0.0".into(),
            port: 4000,
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL")
            .or_else(|| get("URL_DATABASE"))
            .unwrap_or(defaults.database_url);
        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(v) => parse("DATABASE_MAX_CONNECTIONS", v)?,
            None => defaults.max_connections,
        };
        let host = get("HOST").unwrap_or(defaults.host);
        let port = match get("PORT_SERVER").map(|v| ("PORT_SERVER", v)).or_else(|| get("PORT").map(|v| ("PORT", v))) {
            Some((var, v)) => parse(var, v)?,
            None => defaults.port,
        };
        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            database_url,
            max_connections,
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE_URL
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid { var, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let s = settings(&[]).unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.bind_address(), "0.0.0.0:4000");
    }

    #[test]
    fn reads_legacy_names_and_origins() {
        let s = settings(&[
            ("URL_DATABASE", "postgres://db/shop"),
            ("PORT", "8080"),
            ("CORS_ALLOWED_ORIGINS", "http://localhost:5173, https://shop.example ,"),
        ])
        .unwrap();
        assert_eq!(s.database_url, "postgres://db/shop");
        assert_eq!(s.port, 8080);
        assert_eq!(s.cors_allowed_origins, vec!["http://localhost:5173", "https://shop.example"]);
    }

    #[test]
    fn port_server_wins_over_port() {
        let s = settings(&[("PORT_SERVER", "4001"), ("PORT", "8080")]).unwrap();
        assert_eq!(s.port, 4001);
    }

    #[test]
    fn rejects_malformed_numbers() {
        let err = settings(&[("PORT_SERVER", "abc")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "PORT_SERVER", .. }));
        assert!(settings(&[("DATABASE_MAX_CONNECTIONS", "-1")]).is_err());
    }

    #[test]
    fn memory_store_selector() {
        assert!(settings(&[("DATABASE_URL", "memory")]).unwrap().uses_memory_store());
    }
}
