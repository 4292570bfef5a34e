//! Gateway settings. Precedence: environment > `FANAR_ABM_CONFIG` file (default
//! `config/gateway.toml`, only when present) > defaults.
//!
//! | Key | Env | Default |
//! |-----|-----|---------|
//! | host | HOST | 0.0.0.0 |
//! | port | PORT | 3000 |
//! | public_dir | PUBLIC_DIR | public |
//! | agents_path | ABM_AGENTS | unset (built-in agents) |
//!
//! Chat relay settings are separate, see [`fanar_abm_core::RelayConfig`].

use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "config/gateway.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Directory served for every path that is not an API route.
    pub public_dir: String,
    /// Optional TOML agent table replacing the built-in stakeholders.
    #[serde(default)]
    pub agents_path: Option<String>,
}

impl GatewayConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let path = std::env::var("FANAR_ABM_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&path), |name| std::env::var(name).ok())
    }

    pub fn load_from<F>(path: &Path, lookup: F) -> Result<Self, config::ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let builder = config::Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000_i64)?
            .set_default("public_dir", "public")?;

        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        builder
            .set_override_option("host", env("HOST"))?
            .set_override_option("port", env("PORT"))?
            .set_override_option("public_dir", env("PUBLIC_DIR"))?
            .set_override_option("agents_path", env("ABM_AGENTS"))?
            .build()?
            .try_deserialize()
    }
}
