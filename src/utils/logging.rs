use tracing::Level;

/// Maps a configured level name onto a tracing level. Unknown names fall
/// back to `INFO`.
pub fn parse_level(name: &str) -> Level {
    match name.trim().to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" | "warning" => Level::WARN,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    }
}

/// Installs the global fmt subscriber at the given level.
///
/// Uses `try_init`, so only the first call in a process takes effect and
/// later calls (tests, `local` mode) are no-ops.
pub fn init(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(parse_level(level))
        .with_target(false)
        .try_init();
}
