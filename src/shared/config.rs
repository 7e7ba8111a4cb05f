//! Application configuration. Paths and mock-latency knobs.

use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Where the session file lives. Read from ZW_DATA_DIR.
    pub data_dir: Option<String>,

    /// Session file path override. Read from ZW_SESSION_PATH.
    #[serde(default)]
    pub session_path: Option<String>,

    /// Simulated auth round-trip in ms (default 1000). Read from ZW_AUTH_DELAY_MS.
    #[serde(default)]
    pub auth_delay_ms: Option<u64>,

    /// Simulated scanner work per progress tick in ms (default 300). Read from ZW_SCAN_STEP_DELAY_MS.
    #[serde(default)]
    pub scan_step_delay_ms: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("ZW"));
        if let Ok(path) = std::env::var("ZW_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the data directory. Defaults to ./data.
    pub fn data_dir_or_default(&self) -> String {
        self.data_dir.clone().unwrap_or_else(|| "./data".to_string())
    }

    /// Returns the simulated auth delay in milliseconds. Defaults to 1000.
    pub fn auth_delay_ms_or_default(&self) -> u64 {
        self.auth_delay_ms.unwrap_or(1000)
    }

    /// Returns the simulated scan tick delay in milliseconds. Defaults to 300.
    pub fn scan_step_delay_ms_or_default(&self) -> u64 {
        self.scan_step_delay_ms.unwrap_or(300)
    }
}
