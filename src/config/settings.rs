use redis::{ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use serde::Deserialize;

/// Top-level configuration shared by the publisher and subscriber processes.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub redis: RedisSettings,
    pub publisher: PublisherSettings,
    pub log: LogSettings,
}

/// Connection parameters for the Redis broker and the topic both processes
/// agree on.
#[derive(Debug, Deserialize, Clone)]
pub struct RedisSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub database: i64,
    pub pubsub: PubSubSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PubSubSettings {
    pub topic: String,
}

/// Settings for the periodic fetch-and-publish job.
///
/// `interval` and `timeout` are in milliseconds. Without a timeout the HTTP
/// call waits until the upstream answers or the connection fails.
#[derive(Debug, Deserialize, Clone)]
pub struct PublisherSettings {
    pub endpoint: String,
    pub interval: u64,
    pub timeout: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
}

impl RedisSettings {
    /// Connection parameters for `redis::Client::open`.
    ///
    /// Credentials are passed as-is rather than through a URL, so passwords
    /// may contain `@`, `/`, `#` or `:`.
    pub fn connection_info(&self) -> ConnectionInfo {
        ConnectionInfo {
            addr: ConnectionAddr::Tcp(self.host.clone(), self.port),
            redis: RedisConnectionInfo {
                db: self.database,
                username: self.username.clone(),
                password: self.password.clone(),
                ..Default::default()
            },
        }
    }
}

/// Partial configuration loaded from the config file and environment.
///
/// Every value is optional; whatever is missing is taken from
/// `Settings::default()`.
#[derive(Debug, Default, Deserialize)]
pub struct PartialSettings {
    pub redis: Option<PartialRedisSettings>,
    pub publisher: Option<PartialPublisherSettings>,
    pub log: Option<PartialLogSettings>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PartialRedisSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub database: Option<i64>,
    pub pubsub: Option<PartialPubSubSettings>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PartialPubSubSettings {
    pub topic: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PartialPublisherSettings {
    pub endpoint: Option<String>,
    pub interval: Option<u64>,
    pub timeout: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PartialLogSettings {
    pub level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            redis: RedisSettings {
                host: "127.0.0.1".to_string(),
                port: 6379,
                username: None,
                password: None,
                database: 0,
                pubsub: PubSubSettings {
                    topic: "jokes".to_string(),
                },
            },
            publisher: PublisherSettings {
                endpoint: "https://joke.deno.dev/".to_string(),
                interval: 5000,
                timeout: None,
            },
            log: LogSettings {
                level: "info".to_string(),
            },
        }
    }
}

impl Settings {
    /// Fills every value missing from `partial` with the default.
    pub fn merge(partial: PartialSettings) -> Self {
        let default = Settings::default();
        let redis = partial.redis.unwrap_or_default();
        let publisher = partial.publisher.unwrap_or_default();
        let log = partial.log.unwrap_or_default();

        Settings {
            redis: RedisSettings {
                host: redis.host.unwrap_or(default.redis.host),
                port: redis.port.unwrap_or(default.redis.port),
                username: redis.username.or(default.redis.username),
                password: redis.password.or(default.redis.password),
                database: redis.database.unwrap_or(default.redis.database),
                pubsub: PubSubSettings {
                    topic: redis
                        .pubsub
                        .and_then(|p| p.topic)
                        .unwrap_or(default.redis.pubsub.topic),
                },
            },
            publisher: PublisherSettings {
                endpoint: publisher.endpoint.unwrap_or(default.publisher.endpoint),
                interval: publisher.interval.unwrap_or(default.publisher.interval),
                timeout: publisher.timeout.or(default.publisher.timeout),
            },
            log: LogSettings {
                level: log.level.unwrap_or(default.log.level),
            },
        }
    }
}
