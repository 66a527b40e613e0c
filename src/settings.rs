// src/settings.rs
use crate::utils::path::{
    get_cname_path, get_cwd, get_data_dir, get_log_dir, get_pages_dir, get_public_dir,
};
use serde::Serialize;
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

const NODE_ENV_KEY: &str = "NODE_ENV";
const PORT_KEY: &str = "PORT";
const HOST_KEY: &str = "HOST";
const ROOT_KEY: &str = "PORTFOLIO_ROOT";

const PRODUCTION: &str = "production";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_HOST: &str = "0.0.0.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    /// Anything other than exactly `production` runs in development mode.
    pub fn from_node_env(value: Option<&str>) -> Self {
        match value {
            Some(PRODUCTION) => Mode::Production,
            _ => Mode::Development,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
        }
    }

    pub fn is_dev(self) -> bool {
        self == Mode::Development
    }

    /// Log level used when `RUST_LOG` is not set.
    pub fn default_log_level(self) -> &'static str {
        match self {
            Mode::Development => "debug",
            Mode::Production => "info",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub mode: Mode,
    pub host: String,
    pub port: u16,
    pub root: PathBuf,
}

impl Settings {
    /// Reads the process environment without logging, for use before the
    /// logger exists. The returned warnings go through [`Settings::report`].
    pub fn resolve_env() -> (Self, Vec<String>) {
        Self::resolve(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let (settings, warnings) = Self::resolve(lookup);
        settings.report(&warnings);
        settings
    }

    pub fn resolve<F>(lookup: F) -> (Self, Vec<String>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut warnings = Vec::new();
        let mode = Mode::from_node_env(lookup(NODE_ENV_KEY).as_deref());

        let port = match lookup(PORT_KEY) {
            None => DEFAULT_PORT,
            Some(raw) => match raw.trim().parse::<u16>() {
                Ok(port) if port != 0 => port,
                _ => {
                    warnings.push(format!(
                        "Invalid {} value '{}'. Falling back to {}.",
                        PORT_KEY, raw, DEFAULT_PORT
                    ));
                    DEFAULT_PORT
                }
            },
        };

        let host = lookup(HOST_KEY)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let root = lookup(ROOT_KEY)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(get_cwd);

        let settings = Self {
            mode,
            host,
            port,
            root,
        };
        (settings, warnings)
    }

    pub fn report(&self, warnings: &[String]) {
        for warning in warnings {
            warn!("{}", warning);
        }
        info!(
            "Settings resolved: mode={} bind={} root={:?}",
            self.mode,
            self.bind_addr(),
            self.root
        );
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn data_dir(&self) -> PathBuf {
        get_data_dir(&self.root)
    }

    pub fn public_dir(&self) -> PathBuf {
        get_public_dir(&self.root)
    }

    pub fn pages_dir(&self) -> PathBuf {
        get_pages_dir(&self.root)
    }

    pub fn cname_path(&self) -> PathBuf {
        get_cname_path(&self.root)
    }

    pub fn log_dir(&self) -> PathBuf {
        get_log_dir(&self.root)
    }
}
