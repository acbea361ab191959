use yew::prelude::*;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub admin_email: Option<String>,
    pub log_level: log::Level,
}

impl Config {
    /// Values are baked in at build time, the browser has no process environment.
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("WORKLOG_API_BASE_URL"),
            option_env!("WORKLOG_ADMIN_EMAIL"),
            option_env!("WORKLOG_LOG_LEVEL"),
        )
    }

    pub fn from_values(
        api_base_url: Option<&str>,
        admin_email: Option<&str>,
        log_level: Option<&str>,
    ) -> Self {
        let api_base_url = api_base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Self {
            api_base_url,
            admin_email: admin_email
                .map(str::trim)
                .filter(|email| !email.is_empty())
                .map(str::to_string),
            log_level: log_level
                .and_then(|level| level.parse().ok())
                .unwrap_or(log::Level::Info),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

pub fn api_base_url() -> String {
    Config::from_env().api_base_url
}

/// Provided once by the app shell, views fall back to the build-time values.
#[hook]
pub fn use_config() -> Config {
    use_context::<Config>().unwrap_or_else(Config::from_env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_values(None, None, None);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.admin_email, None);
        assert_eq!(config.log_level, log::Level::Info);
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let config = Config::from_values(Some("https://tracker.example.com/"), Some("  "), Some("debug"));
        assert_eq!(config.api_base_url, "https://tracker.example.com");
        assert_eq!(config.endpoint("/api/logs"), "https://tracker.example.com/api/logs");
        assert_eq!(config.admin_email, None);
        assert_eq!(config.log_level, log::Level::Debug);
    }
}
