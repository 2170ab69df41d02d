//! General application configuration.

use serde::{Deserialize, Serialize};

/// Environment name in which destructive developer tooling refuses to run.
pub const PRODUCTION: &str = "production";

fn default_environment() -> String {
    "development".to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Deployment environment (`development`, `staging`, `production`).
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Locale used for tree loads when none is requested.
    #[serde(default = "default_locale")]
    pub default_locale: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            default_locale: default_locale(),
        }
    }
}

impl GeneralConfig {
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case(PRODUCTION)
    }
}
