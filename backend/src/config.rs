//! Server configuration.
//!
//! Values come from the environment (a `.env` file is loaded by the CLI
//! before this runs) and may then be overridden by command-line flags.
//!
//! | Variable                     | Default   |
//! |------------------------------|-----------|
//! | `MATRIXOPS_HOST`             | `0.0.0.0` |
//! | `MATRIXOPS_PORT`             | `8080`    |
//! | `MATRIXOPS_MAX_UPLOAD_BYTES` | 10 MiB    |
//! | `MATRIXOPS_FLEXIBLE_CSV`     | `false`   |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use crate::error::{ConfigError, ConfigResult};
use crate::parser::CsvOptions;

pub const HOST_VAR: &str = "MATRIXOPS_HOST";
pub const PORT_VAR: &str = "MATRIXOPS_PORT";
pub const MAX_UPLOAD_VAR: &str = "MATRIXOPS_MAX_UPLOAD_BYTES";
pub const FLEXIBLE_CSV_VAR: &str = "MATRIXOPS_FLEXIBLE_CSV";

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Largest accepted request body
    pub max_upload_bytes: usize,
    /// Pass ragged CSV records through to the engine instead of rejecting them
    pub flexible_csv: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            flexible_csv: false,
        }
    }
}

impl ServerConfig {
    /// Build a config from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a config from any variable lookup; unset variables keep defaults.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = read(&lookup, HOST_VAR)? {
            config.host = host;
        }
        if let Some(port) = read(&lookup, PORT_VAR)? {
            config.port = port;
        }
        if let Some(max) = read(&lookup, MAX_UPLOAD_VAR)? {
            config.max_upload_bytes = max;
        }
        if let Some(flexible) = read(&lookup, FLEXIBLE_CSV_VAR)? {
            config.flexible_csv = flexible;
        }

        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn csv_options(&self) -> CsvOptions {
        CsvOptions {
            flexible: self.flexible_csv,
            ..CsvOptions::default()
        }
    }
}

fn read<F, T>(lookup: &F, var: &'static str) -> ConfigResult<Option<T>>
where
    F: Fn(&'static str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> =
            pairs.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.addr().to_string(), "0.0.0.0:8080");
        assert!(!config.csv_options().flexible);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            (HOST_VAR, "127.0.0.1"),
            (PORT_VAR, " 9000 "),
            (MAX_UPLOAD_VAR, "1024"),
            (FLEXIBLE_CSV_VAR, "true"),
        ]))
        .unwrap();

        assert_eq!(config.addr().to_string(), "127.0.0.1:9000");
        assert_eq!(config.max_upload_bytes, 1024);
        assert!(config.csv_options().flexible);
        assert_eq!(config.csv_options().delimiter, b',');
    }

    #[test]
    fn test_invalid_value_names_variable() {
        let err = ServerConfig::from_lookup(lookup(&[(PORT_VAR, "eighty")])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(PORT_VAR));
        assert!(msg.contains("eighty"));
    }
}
