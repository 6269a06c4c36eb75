mod settings;

use config::{Config, ConfigError, Environment, File};

pub use settings::{
    LogSettings, PartialSettings, PubSubSettings, PublisherSettings, RedisSettings, Settings,
};

/// Path, without extension, of the config file read by `load_config`.
pub const DEFAULT_CONFIG_PATH: &str = "config/default";

/// Loads the configuration from `config/default` and environment variables.
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from(DEFAULT_CONFIG_PATH)
}

/// Loads the configuration from the given file (optional, any format the
/// `config` crate recognises) overlaid by environment variables such as
/// `REDIS_PUBSUB_TOPIC`, then merges the result with default values.
pub fn load_config_from(path: &str) -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name(path).required(false))
        .add_source(Environment::default().separator("_"));

    let config = builder.build()?;
    let partial: PartialSettings = config.try_deserialize()?;
    let settings = Settings::merge(partial);

    if settings.publisher.interval == 0 {
        return Err(ConfigError::Message(
            "publisher.interval must be greater than zero".to_string(),
        ));
    }

    Ok(settings)
}

#[cfg(test)]
mod tests;
