//! Ambient server configuration, layered env-var overrides on top of
//! compiled-in defaults. No config file format is mandated, so this is
//! the minimal faithful ambient layer around the pure `solve` core.

use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:7860";

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: SocketAddr,
}

impl Settings {
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("ROSTER_BIND_ADDR")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.parse().expect("default bind addr is valid"));

        Self { bind_addr }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bind_addr_parses() {
        let settings = Settings::default();
        assert_eq!(settings.bind_addr.port(), 7860);
    }
}
