use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Fixed, well-known endpoint path of the console feed.
pub const CONSOLE_PATH: &str = "/ws/console";

fn default_host() -> String {
    "127.0.0.1:8022".to_string()
}

fn default_reconnect_delay_ms() -> u64 {
    3000
}

fn default_buffer_capacity() -> usize {
    500
}

fn default_follow_slack() -> u16 {
    3
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// `host[:port]` of the serving instance.
    #[serde(default = "default_host")]
    pub host: String,

    /// Use the secure transport scheme (wss). Matches a server behind TLS.
    #[serde(default)]
    pub secure: bool,

    /// Fixed delay before a dropped session is retried.
    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,

    /// In-memory message history bound.
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,

    /// How close to the bottom (in rows) the view must be for an append to
    /// auto-follow. UX tuning constant, not derived from anything.
    #[serde(default = "default_follow_slack")]
    pub follow_slack: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            secure: false,
            reconnect_delay_ms: default_reconnect_delay_ms(),
            buffer_capacity: default_buffer_capacity(),
            follow_slack: default_follow_slack(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::default_path();
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolve the config file path based on priority:
    /// 1. WIRELOG_CONFIG environment variable
    /// 2. Platform config directory
    /// 3. ~/.wirelog.toml (fallback for systems without XDG)
    pub fn default_path() -> PathBuf {
        if let Ok(env_path) = std::env::var("WIRELOG_CONFIG") {
            return PathBuf::from(env_path);
        }

        if let Some(config_dir) = dirs::config_dir() {
            return config_dir.join("wirelog").join("config.toml");
        }

        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".wirelog.toml");
        }

        PathBuf::from(".wirelog.toml")
    }

    /// Full session URL. The scheme upgrades to the secure variant in
    /// lockstep with the server's own scheme.
    pub fn endpoint_url(&self) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        format!("{}://{}{}", scheme, self.host, CONSOLE_PATH)
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }
}
