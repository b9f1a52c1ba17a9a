//! HTTP server configuration object and adapter bootstrap.

use std::net::SocketAddr;
use std::sync::Arc;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use tracing::{info, warn};

use activity_service::domain::ports::{ActivityEventPublisher, ActivityEventRoute, UserValidator};
use activity_service::outbound::identity::HttpUserValidator;
use activity_service::outbound::persistence::{
    DbPool, MigrationError, PoolConfig, PoolError, run_pending_migrations,
};
use activity_service::outbound::queue::{RedisActivityEventPublisher, RedisPublisherConfig};
use activity_service::settings::{ActivitySettings, SettingsError};

/// Failures that prevent the service from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Migration(#[from] MigrationError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error("failed to build identity service client: {0}")]
    IdentityClient(#[from] reqwest::Error),
    #[error("failed to configure event publisher: {0}")]
    Publisher(String),
    #[cfg(feature = "metrics")]
    #[error("failed to configure Prometheus metrics: {0}")]
    Metrics(String),
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) route: ActivityEventRoute,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) user_validator: Option<Arc<dyn UserValidator>>,
    pub(crate) publisher: Option<Arc<dyn ActivityEventPublisher>>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a configuration with in-process fallbacks for every adapter.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, route: ActivityEventRoute) -> Self {
        Self {
            bind_addr,
            route,
            db_pool: None,
            user_validator: None,
            publisher: None,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Attach a database connection pool for the activity store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Validate users against a remote identity service.
    #[must_use]
    pub fn with_user_validator(mut self, validator: Arc<dyn UserValidator>) -> Self {
        self.user_validator = Some(validator);
        self
    }

    /// Deliver activity events through a broker-backed publisher.
    #[must_use]
    pub fn with_publisher(mut self, publisher: Arc<dyn ActivityEventPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Build the configuration from settings, running migrations and
    /// constructing every configured adapter.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError`] when a setting is malformed, migrations fail,
    /// or an adapter cannot be constructed.
    pub async fn from_settings(settings: &ActivitySettings) -> Result<Self, StartupError> {
        let mut config = Self::new(settings.bind_addr()?, settings.event_route());

        match settings.database_url() {
            Some(url) => {
                let applied = run_pending_migrations(url).await?;
                info!(applied, "activity store schema is current");
                let pool = DbPool::new(PoolConfig::new(url)).await?;
                config = config.with_db_pool(pool);
            }
            None => warn!("no database configured; activities are kept in memory"),
        }

        match settings.user_service_url()? {
            Some(base_url) => {
                info!(%base_url, "validating users against identity service");
                let validator = HttpUserValidator::new(base_url, settings.user_service_timeout())?;
                config = config.with_user_validator(Arc::new(validator));
            }
            None => warn!("no identity service configured; every user is accepted"),
        }

        match settings.redis_url() {
            Some(url) => {
                let publisher = RedisActivityEventPublisher::new(
                    RedisPublisherConfig::new(url)
                        .with_publish_timeout(settings.publish_timeout()),
                )
                .map_err(|err| StartupError::Publisher(err.to_string()))?;
                config = config.with_publisher(Arc::new(publisher));
            }
            None => warn!("no broker configured; activity events are only logged"),
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::ffi::OsString;

    use env_lock::lock_env;
    use ortho_config::OrthoConfig;
    use rstest::rstest;

    use super::*;

    fn settings_from_env() -> ActivitySettings {
        ActivitySettings::load_from_iter([OsString::from("activity-service")])
            .expect("config should load")
    }

    #[rstest]
    #[tokio::test]
    async fn zero_configuration_starts_on_the_default_port() {
        let settings = {
            let _guard = lock_env(
                [
                    "ACTIVITY_BIND_ADDR",
                    "ACTIVITY_DATABASE_URL",
                    "ACTIVITY_USER_SERVICE_URL",
                    "ACTIVITY_USER_SERVICE_TIMEOUT_MS",
                    "ACTIVITY_REDIS_URL",
                    "ACTIVITY_EVENT_DESTINATION",
                    "ACTIVITY_EVENT_ROUTING_KEY",
                    "ACTIVITY_PUBLISH_TIMEOUT_MS",
                ]
                .map(|name| (name, None::<String>)),
            );
            settings_from_env()
        };

        let config = ServerConfig::from_settings(&settings)
            .await
            .expect("defaults alone are a complete configuration");

        assert_eq!(config.bind_addr().port(), 8082);
        assert_eq!(
            config.route,
            ActivityEventRoute::new("fitness.exchange", "activity.tracking")
        );
        assert!(config.db_pool.is_none());
        assert!(config.user_validator.is_none());
        assert!(config.publisher.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn unconfigured_adapters_fall_back() {
        let settings = {
            let _guard = lock_env([
                ("ACTIVITY_DATABASE_URL", None::<String>),
                ("ACTIVITY_USER_SERVICE_URL", None::<String>),
                ("ACTIVITY_REDIS_URL", None::<String>),
                ("ACTIVITY_BIND_ADDR", Some("127.0.0.1:0".to_owned())),
            ]);
            settings_from_env()
        };

        let config = ServerConfig::from_settings(&settings)
            .await
            .expect("fallback configuration builds");

        assert!(config.db_pool.is_none());
        assert!(config.user_validator.is_none());
        assert!(config.publisher.is_none());
        assert_eq!(config.bind_addr().port(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn configured_identity_and_broker_are_attached_lazily() {
        let settings = {
            let _guard = lock_env([
                ("ACTIVITY_DATABASE_URL", None::<String>),
                (
                    "ACTIVITY_USER_SERVICE_URL",
                    Some("http://127.0.0.1:1".to_owned()),
                ),
                ("ACTIVITY_REDIS_URL", Some("redis://127.0.0.1:1".to_owned())),
            ]);
            settings_from_env()
        };

        let config = ServerConfig::from_settings(&settings)
            .await
            .expect("adapters build without contacting their backends");

        assert!(config.user_validator.is_some());
        assert!(config.publisher.is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_identity_url_fails_startup() {
        let settings = {
            let _guard = lock_env([
                ("ACTIVITY_DATABASE_URL", None::<String>),
                ("ACTIVITY_USER_SERVICE_URL", Some("not a url".to_owned())),
            ]);
            settings_from_env()
        };

        let error = ServerConfig::from_settings(&settings)
            .await
            .err()
            .expect("startup fails");

        assert!(matches!(error, StartupError::Settings(_)));
    }
}
