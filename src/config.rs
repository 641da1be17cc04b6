//! Runtime configuration.
//!
//! Values come from command line flags, then environment variables, then a
//! `.env` file in the working directory, then the defaults below.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, Parser)]
#[command(name = "owltune", version, about = "Browse, create and delete your playlists")]
pub struct Config {
    /// Base URL of the OwlTune web backend
    #[arg(long, env = "OWLTUNE_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    /// Value of the backend's `session` cookie (copy it from a logged-in browser)
    #[arg(long, env = "OWLTUNE_SESSION", hide_env_values = true)]
    pub session_cookie: Option<String>,

    /// Directory for rotated log files
    #[arg(long, env = "OWLTUNE_LOG_DIR", default_value = ".logs")]
    pub log_dir: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, env = "OWLTUNE_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

impl Config {
    /// Load `.env` (if present) and parse the command line.
    pub fn load() -> Self {
        // A missing .env is normal
        let _ = dotenvy::dotenv();
        Self::parse()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let config = Config::try_parse_from(["owltune"]).unwrap();
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.log_dir, PathBuf::from(".logs"));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "owltune",
            "--backend-url",
            "https://owltune.example",
            "--session-cookie",
            "abc",
            "--timeout-secs",
            "0",
        ])
        .unwrap();
        assert_eq!(config.backend_url, "https://owltune.example");
        assert_eq!(config.session_cookie.as_deref(), Some("abc"));
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }
}
