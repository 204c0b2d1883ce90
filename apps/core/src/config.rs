//! Runtime configuration read from environment variables.
//!
//! | variable | default | meaning |
//! |---|---|---|
//! | `HOST` | `0.0.0.0` | bind address |
//! | `PORT` | `3000` | bind port |
//! | `SESSION_CAPACITY` | unset | cap the session table (LRU eviction) |
//! | `LOG_FORMAT` | `pretty` | `pretty` or `json` (bunyan) |

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroUsize;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// `None` keeps every session for the process lifetime.
    pub session_capacity: Option<NonZeroUsize>,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            session_capacity: None,
            log_format: LogFormat::Pretty,
        }
    }
}

fn read_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = read_var("HOST")
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
            .parse::<IpAddr>()
            .map_err(|e| AppError::Config(format!("HOST: {}", e)))?;

        let port = match read_var("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| AppError::Config(format!("PORT '{}': {}", raw, e)))?,
            None => DEFAULT_PORT,
        };

        let session_capacity = match read_var("SESSION_CAPACITY") {
            Some(raw) => Some(
                raw.parse::<NonZeroUsize>()
                    .map_err(|e| AppError::Config(format!("SESSION_CAPACITY '{}': {}", raw, e)))?,
            ),
            None => None,
        };

        let log_format = match read_var("LOG_FORMAT").map(|v| v.to_lowercase()).as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "LOG_FORMAT '{}': expected 'pretty' or 'json'",
                    other
                )))
            }
        };

        Ok(Self {
            host,
            port,
            session_capacity,
            log_format,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
