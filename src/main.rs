//! CLI for jokecast
//!
//! Subcommands:
//! - `publisher`: fetch a joke on every tick and publish it to Redis
//! - `subscriber`: print every joke published on the topic
//! - `local`: run both in one process over an in-memory bus

use std::io;

use clap::{Parser, Subcommand};
use jokecast::bus::{Bus, MemoryBus, RedisBus};
use jokecast::config::{DEFAULT_CONFIG_PATH, Settings, load_config_from};
use jokecast::publisher::Publisher;
use jokecast::subscriber::{listen, on_message};
use jokecast::utils::logging;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "jokecast", version)]
struct Cli {
    /// Config file to read, without extension
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a joke at a fixed rate and publish it on the topic
    Publisher,
    /// Print every joke published on the topic
    Subscriber,
    /// Run publisher and subscriber together without a Redis server
    Local,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let settings = match load_config_from(&cli.config) {
        Ok(settings) => settings,
        Err(e) => {
            logging::init("info");
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    logging::init(&settings.log.level);

    let result = match cli.command {
        Command::Publisher => run_publisher(&settings).await,
        Command::Subscriber => run_subscriber(&settings).await,
        Command::Local => run_local(&settings).await,
    };

    if let Err(e) = result {
        error!("jokecast failed: {}", e);
        std::process::exit(1);
    }
}

async fn run_publisher(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let bus = RedisBus::connect(&settings.redis).await?;
    let publisher = Publisher::from_settings(settings, bus)?;

    tokio::select! {
        _ = publisher.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    Ok(())
}

async fn run_subscriber(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let bus = RedisBus::connect(&settings.redis).await?;
    let subscription = bus.subscribe(&settings.redis.pubsub.topic).await?;

    tokio::select! {
        result = listen(subscription, |payload| on_message(payload, &mut io::stdout().lock())) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    Ok(())
}

async fn run_local(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let bus = MemoryBus::new();
    let subscription = bus.subscribe(&settings.redis.pubsub.topic).await?;
    let listener = tokio::spawn(listen(subscription, |payload| {
        on_message(payload, &mut io::stdout().lock())
    }));

    let publisher = Publisher::from_settings(settings, bus)?;

    tokio::select! {
        _ = publisher.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    listener.abort();
    Ok(())
}
