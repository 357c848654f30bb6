//! Deployment configuration: which backend hosts this client talks to.
//!
//! The platform is split across four independently run services (user, item,
//! claim, audit), each on its own host/port. Which table of base URLs is
//! active is decided once at startup by the [`DeployMode`] and never changes
//! afterward.

mod loader;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::ApiError;

pub use loader::{load, load_from_env, load_from_file};

/// Deployment mode selecting the active host table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployMode {
    /// Every service on localhost (single-machine development).
    Local,
    /// Services spread across LAN machines.
    Networked,
}

impl FromStr for DeployMode {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "networked" => Ok(Self::Networked),
            other => Err(ApiError::Config(format!(
                "unrecognized deploy mode '{other}' (expected 'local' or 'networked')"
            ))),
        }
    }
}

impl fmt::Display for DeployMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Networked => f.write_str("networked"),
        }
    }
}

/// The closed set of backend services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    User,
    Item,
    Claim,
    Audit,
}

/// Immutable mapping from service to base URL, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostTable {
    pub user: String,
    pub item: String,
    pub claim: String,
    pub audit: String,
}

impl HostTable {
    /// Default table for single-machine development.
    pub fn local() -> Self {
        Self {
            user: "http://localhost:8081".into(),
            item: "http://localhost:8082".into(),
            claim: "http://localhost:8083".into(),
            audit: "http://localhost:8084".into(),
        }
    }

    /// Default table for LAN deployments. Real addresses come from the
    /// config file or `LOSTFOUND_*_HOST` overrides; these are placeholders
    /// on the conventional ports.
    pub fn networked() -> Self {
        Self {
            user: "http://192.168.1.101:8081".into(),
            item: "http://192.168.1.102:8082".into(),
            claim: "http://192.168.1.103:8083".into(),
            audit: "http://192.168.1.104:8084".into(),
        }
    }

    /// Default table for the given mode.
    pub fn for_mode(mode: DeployMode) -> Self {
        match mode {
            DeployMode::Local => Self::local(),
            DeployMode::Networked => Self::networked(),
        }
    }

    /// Base URL bound to `service`. Infallible: the service set is closed.
    pub fn base_url(&self, service: Service) -> &str {
        match service {
            Service::User => &self.user,
            Service::Item => &self.item,
            Service::Claim => &self.claim,
            Service::Audit => &self.audit,
        }
    }
}

/// Fallback base URL for the generic client when no override is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Complete startup configuration for the client SDK.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Which host table is active.
    pub mode: DeployMode,
    /// Base URLs of the four backend services.
    pub hosts: HostTable,
    /// Base URL the generic HTTP client prepends to relative paths.
    pub api_base_url: String,
    /// Per-request transport timeout.
    pub timeout: Duration,
    /// Delay between an authentication loss and the session teardown,
    /// leaving the notice time to render.
    pub logout_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            mode: DeployMode::Local,
            hosts: HostTable::local(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            logout_delay: Duration::from_millis(1500),
        }
    }
}
