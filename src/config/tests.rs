use super::settings::{PartialPubSubSettings, PartialRedisSettings, PartialSettings, Settings};
use super::load_config_from;
use redis::ConnectionAddr;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.redis.host, "127.0.0.1");
    assert_eq!(settings.redis.port, 6379);
    assert_eq!(settings.redis.database, 0);
    assert_eq!(settings.redis.pubsub.topic, "jokes");
    assert_eq!(settings.publisher.endpoint, "https://joke.deno.dev/");
    assert_eq!(settings.publisher.interval, 5000);
    assert!(settings.publisher.timeout.is_none());
    assert_eq!(settings.log.level, "info");
}

#[test]
fn test_merge_keeps_defaults_for_missing_values() {
    let partial = PartialSettings {
        redis: Some(PartialRedisSettings {
            port: Some(6380),
            pubsub: Some(PartialPubSubSettings {
                topic: Some("laughs".to_string()),
            }),
            ..Default::default()
        }),
        ..Default::default()
    };

    let settings = Settings::merge(partial);
    assert_eq!(settings.redis.host, "127.0.0.1");
    assert_eq!(settings.redis.port, 6380);
    assert_eq!(settings.redis.pubsub.topic, "laughs");
    assert_eq!(settings.publisher.interval, 5000);
}

#[test]
fn test_connection_info_defaults() {
    let info = Settings::default().redis.connection_info();
    assert!(matches!(
        &info.addr,
        ConnectionAddr::Tcp(host, 6379) if host == "127.0.0.1"
    ));
    assert_eq!(info.redis.db, 0);
    assert!(info.redis.username.is_none());
    assert!(info.redis.password.is_none());
}

#[test]
fn test_connection_info_keeps_special_characters_in_credentials() {
    let mut redis = Settings::default().redis;
    redis.username = Some("app:user".to_string());
    redis.password = Some("p@ss/w#rd".to_string());
    redis.database = 2;

    let info = redis.connection_info();
    assert!(matches!(
        &info.addr,
        ConnectionAddr::Tcp(host, 6379) if host == "127.0.0.1"
    ));
    assert_eq!(info.redis.db, 2);
    assert_eq!(info.redis.username.as_deref(), Some("app:user"));
    assert_eq!(info.redis.password.as_deref(), Some("p@ss/w#rd"));
    assert!(redis::Client::open(info).is_ok());
}

#[test]
#[serial]
fn test_load_config_without_file_uses_defaults() {
    let tmp = TempDir::new().expect("create tempdir");
    let path = tmp.path().join("missing");

    let settings = temp_env::with_vars_unset(
        ["REDIS_HOST", "REDIS_PUBSUB_TOPIC", "PUBLISHER_INTERVAL"],
        || load_config_from(path.to_str().unwrap()),
    )
    .expect("load_config failed");

    assert_eq!(settings.redis.host, "127.0.0.1");
    assert_eq!(settings.redis.pubsub.topic, "jokes");
}

#[test]
#[serial]
fn test_load_config_from_file_overrides_defaults() {
    let tmp = TempDir::new().expect("create tempdir");
    let toml = r#"
        [redis]
        host = "redis.internal"
        port = 6390

        [redis.pubsub]
        topic = "file-topic"

        [publisher]
        interval = 250
        timeout = 1000
    "#;
    fs::write(tmp.path().join("jokecast.toml"), toml).expect("write config file");
    let path = tmp.path().join("jokecast");

    let settings = temp_env::with_vars_unset(
        ["REDIS_HOST", "REDIS_PORT", "REDIS_PUBSUB_TOPIC", "PUBLISHER_INTERVAL"],
        || load_config_from(path.to_str().unwrap()),
    )
    .expect("load_config failed");

    assert_eq!(settings.redis.host, "redis.internal");
    assert_eq!(settings.redis.port, 6390);
    assert_eq!(settings.redis.pubsub.topic, "file-topic");
    assert_eq!(settings.publisher.interval, 250);
    assert_eq!(settings.publisher.timeout, Some(1000));
    assert_eq!(settings.publisher.endpoint, "https://joke.deno.dev/");
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    let tmp = TempDir::new().expect("create tempdir");
    fs::write(
        tmp.path().join("jokecast.toml"),
        "[redis.pubsub]\ntopic = \"file-topic\"\n",
    )
    .expect("write config file");
    let path = tmp.path().join("jokecast");

    let settings = temp_env::with_vars(
        [
            ("REDIS_PUBSUB_TOPIC", Some("env-topic")),
            ("REDIS_PORT", Some("6400")),
        ],
        || load_config_from(path.to_str().unwrap()),
    )
    .expect("load_config failed");

    assert_eq!(settings.redis.pubsub.topic, "env-topic");
    assert_eq!(settings.redis.port, 6400);
}

#[test]
#[serial]
fn test_zero_interval_is_rejected() {
    let tmp = TempDir::new().expect("create tempdir");
    fs::write(tmp.path().join("jokecast.toml"), "[publisher]\ninterval = 0\n")
        .expect("write config file");
    let path = tmp.path().join("jokecast");

    let result = temp_env::with_var_unset("PUBLISHER_INTERVAL", || {
        load_config_from(path.to_str().unwrap())
    });
    assert!(result.is_err());
}
