use std::env;
use std::time::Duration;

/// Connection settings for one device.
#[derive(Debug, Clone)]
pub struct Config {
    /// Device address, `ip` or `ip:port`.
    pub host: String,
    /// Uniform bound on every request, reads and command posts alike.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "10.0.0.48".to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

impl Config {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        let mut cfg = Config::default();

        if let Ok(v) = env::var("IKAMAND_HOST") {
            if !v.is_empty() {
                cfg.host = v;
            }
        }
        if let Ok(v) = env::var("IKAMAND_TIMEOUT_SECS") {
            if let Ok(secs) = v.parse::<u64>() {
                cfg.timeout = Duration::from_secs(secs);
            }
        }

        cfg
    }
}
