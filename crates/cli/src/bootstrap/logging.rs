use dnsward_domain::config::LoggingConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initialize the global `tracing` subscriber from the `logging` config
/// section. Called once, before anything else touches the store.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true);

    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }

    info!(level = %config.level, json = config.json, "logging initialized");
}
