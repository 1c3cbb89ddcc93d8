use log::debug;

pub const BASE_URL_VAR: &str = "POKER_SERVER_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

impl Config {
    /// Reads the server address from `POKER_SERVER_URL`, falling back to the local server.
    pub fn from_env() -> Self {
        let config = Self::from_value(std::env::var(BASE_URL_VAR).ok());
        debug!("using server at {}", config.base_url);
        config
    }

    fn from_value(value: Option<String>) -> Self {
        match value {
            Some(url) if !url.trim().is_empty() => Self::with_base_url(url.trim()),
            _ => Self::default(),
        }
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
