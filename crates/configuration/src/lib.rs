use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;
pub mod telemetry;

// Re-export the core types to provide a clean public API.
pub use settings::{DatabaseSettings, LoggingSettings, ServerSettings, Settings, WebSettings};
#[cfg(feature = "clap")]
pub use settings::ServerOverrides;
pub use telemetry::init_tracing;

/// Prefix for environment overrides, e.g. `F1STATS__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "F1STATS";

/// Loads the application settings.
///
/// Sources, lowest precedence first: built-in defaults, the TOML file at `path`
/// (optional), `F1STATS__*` environment variables, and finally `DATABASE_URL`.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    build_settings(path, std::env::var("DATABASE_URL").ok())
}

fn build_settings(path: &Path, database_url: Option<String>) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut settings = builder.try_deserialize::<Settings>()?;
    if let Some(url) = database_url.filter(|u| !u.trim().is_empty()) {
        settings.database.url = url;
    }

    settings.validate()?;
    Ok(settings)
}
