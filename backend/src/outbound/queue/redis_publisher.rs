//! Redis-backed activity event publisher.
//!
//! Each event is appended with `RPUSH` to the list named
//! `{destination}:{routing_key}`. Consumers pop from that list. One attempt
//! is made per event and it is bounded by the configured deadline.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::{RedisConnectionManager, bb8, redis};
use tracing::debug;

use super::{encode_event, list_key};
use crate::domain::Activity;
use crate::domain::ports::{ActivityEventPublisher, ActivityEventRoute, PublishError};

const POOL_MAX_SIZE: u32 = 4;

/// Connection settings for [`RedisActivityEventPublisher`].
///
/// # Example
///
/// ```ignore
/// let config = RedisPublisherConfig::new("redis://127.0.0.1:6379")
///     .with_publish_timeout(Duration::from_millis(500));
/// ```
#[derive(Debug, Clone)]
pub struct RedisPublisherConfig {
    url: String,
    publish_timeout: Duration,
}

impl RedisPublisherConfig {
    /// Create a configuration for the Redis server at `url`.
    ///
    /// Defaults to a one second publish deadline.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            publish_timeout: Duration::from_secs(1),
        }
    }

    /// Set the deadline for a single publish attempt, including checkout.
    #[must_use]
    pub fn with_publish_timeout(mut self, publish_timeout: Duration) -> Self {
        self.publish_timeout = publish_timeout;
        self
    }
}

/// Event publisher writing to Redis lists through a `bb8` pool.
#[derive(Clone)]
pub struct RedisActivityEventPublisher {
    pool: bb8::Pool<RedisConnectionManager>,
    publish_timeout: Duration,
}

impl RedisActivityEventPublisher {
    /// Build a publisher. Connections are opened lazily on first use so an
    /// unavailable broker does not block startup.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Unavailable`] when the Redis URL is invalid.
    pub fn new(config: RedisPublisherConfig) -> Result<Self, PublishError> {
        let manager = RedisConnectionManager::new(config.url.as_str())
            .map_err(|error| PublishError::unavailable(format!("invalid redis url: {error}")))?;
        let pool = bb8::Pool::builder()
            .max_size(POOL_MAX_SIZE)
            .connection_timeout(config.publish_timeout)
            .build_unchecked(manager);
        Ok(Self {
            pool,
            publish_timeout: config.publish_timeout,
        })
    }

    async fn push(&self, key: &str, payload: String) -> Result<i64, PublishError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        redis::cmd("RPUSH")
            .arg(key)
            .arg(payload)
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)
    }
}

#[async_trait]
impl ActivityEventPublisher for RedisActivityEventPublisher {
    async fn publish(
        &self,
        route: &ActivityEventRoute,
        activity: &Activity,
    ) -> Result<(), PublishError> {
        let payload = encode_event(activity)?;
        let key = list_key(route);
        let queued = with_deadline(self.publish_timeout, self.push(&key, payload)).await?;
        debug!(
            activity_id = %activity.id(),
            list = %key,
            queued,
            "activity event published"
        );
        Ok(())
    }
}

async fn with_deadline<T, F>(deadline: Duration, attempt: F) -> Result<T, PublishError>
where
    F: Future<Output = Result<T, PublishError>>,
{
    tokio::time::timeout(deadline, attempt)
        .await
        .unwrap_or_else(|_| {
            Err(PublishError::timeout(format!(
                "no acknowledgement within {}ms",
                deadline.as_millis()
            )))
        })
}

fn map_pool_error(error: bb8::RunError<redis::RedisError>) -> PublishError {
    match error {
        bb8::RunError::User(inner) => map_redis_error(inner),
        bb8::RunError::TimedOut => {
            PublishError::unavailable("timed out waiting for a redis connection")
        }
    }
}

fn map_redis_error(error: redis::RedisError) -> PublishError {
    if error.is_timeout() {
        PublishError::timeout(error.to_string())
    } else if error.is_io_error() || error.is_connection_refusal() || error.is_connection_dropped()
    {
        PublishError::unavailable(error.to_string())
    } else {
        PublishError::rejected(error.to_string())
    }
}
