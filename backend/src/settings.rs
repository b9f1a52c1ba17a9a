//! Service configuration loaded via OrthoConfig.
//!
//! Values layer from CLI flags, `ACTIVITY_*` environment variables, and
//! configuration files. Unset adapter URLs select the in-process fallbacks.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::ports::ActivityEventRoute;

/// Errors raised when a configured value cannot be interpreted.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("invalid user service URL {value:?}: {source}")]
    UserServiceUrl {
        value: String,
        source: url::ParseError,
    },
}

/// Runtime settings for the activity service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ACTIVITY")]
pub struct ActivitySettings {
    /// Socket address the HTTP server binds to.
    #[ortho_config(default = String::from("0.0.0.0:8082"))]
    pub bind_addr: String,
    /// PostgreSQL connection string; the in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Identity service base URL; every user is accepted when unset.
    pub user_service_url: Option<String>,
    /// Identity service request timeout in milliseconds.
    #[ortho_config(default = 2_000)]
    pub user_service_timeout_ms: u64,
    /// Redis connection string; events are only logged when unset.
    pub redis_url: Option<String>,
    /// Destination exchange for activity events.
    #[ortho_config(default = String::from("fitness.exchange"))]
    pub event_destination: String,
    /// Routing key for activity events.
    #[ortho_config(default = String::from("activity.tracking"))]
    pub event_routing_key: String,
    /// Upper bound on a single publish in milliseconds.
    #[ortho_config(default = 1_000)]
    pub publish_timeout_ms: u64,
}

impl ActivitySettings {
    /// Parse the configured bind address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        self.bind_addr
            .trim()
            .parse()
            .map_err(|source| SettingsError::BindAddr {
                value: self.bind_addr.clone(),
                source,
            })
    }

    pub fn database_url(&self) -> Option<&str> {
        non_blank(self.database_url.as_deref())
    }

    pub fn redis_url(&self) -> Option<&str> {
        non_blank(self.redis_url.as_deref())
    }

    /// Parse the identity service base URL, if one is configured.
    pub fn user_service_url(&self) -> Result<Option<Url>, SettingsError> {
        non_blank(self.user_service_url.as_deref())
            .map(|value| {
                Url::parse(value).map_err(|source| SettingsError::UserServiceUrl {
                    value: value.to_owned(),
                    source,
                })
            })
            .transpose()
    }

    pub fn user_service_timeout(&self) -> Duration {
        Duration::from_millis(self.user_service_timeout_ms)
    }

    pub fn publish_timeout(&self) -> Duration {
        Duration::from_millis(self.publish_timeout_ms)
    }

    /// Build the event route from the configured destination and routing key.
    pub fn event_route(&self) -> ActivityEventRoute {
        ActivityEventRoute::new(
            self.event_destination.as_str(),
            self.event_routing_key.as_str(),
        )
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.trim().is_empty())
}
