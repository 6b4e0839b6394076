//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::observability::{DefaultLogger, Logger, Severity, StaticErrorRouting};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener and request settings.
    pub server: ServerConfig,

    /// Logger settings.
    pub logger: LoggerConfig,

    /// Access-log middleware settings.
    pub access_log: AccessLogConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:3000").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Logger configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LoggerConfig {
    /// Instance context name, stored under the `context` key.
    pub context: Option<String>,

    /// Minimum severity. Unset logs everything.
    pub log_level: Option<Severity>,

    /// Force JSON (true) or styled (false) output. Unset reads `APP_ENV`.
    pub production: Option<bool>,

    /// Route `DefaultLogger::error` to WARN like older releases.
    pub static_error_as_warn: bool,
}

impl LoggerConfig {
    pub fn build(&self) -> Logger {
        Logger::builder()
            .context(self.context.clone())
            .log_level_opt(self.log_level)
            .production_opt(self.production)
            .build()
    }

    /// Default handle holding a logger built from this config.
    pub fn build_default(&self) -> DefaultLogger {
        let handle = DefaultLogger::with_instance(std::sync::Arc::new(self.build()));
        if self.static_error_as_warn {
            handle.set_error_routing(StaticErrorRouting::Warn);
        }
        handle
    }
}

/// Access-log configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AccessLogConfig {
    /// Wrap the router in the logging layer.
    pub enabled: bool,

    /// Component name recorded for every request. Unset uses the matched route.
    pub component: Option<String>,
}

impl Default for AccessLogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            component: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind_address, "127.0.0.1:3000");
        assert_eq!(config.server.request_timeout_secs, 30);
        assert!(config.logger.log_level.is_none());
        assert!(config.access_log.enabled);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [logger]
            context = "App"
            log_level = "warn"
            production = true

            [access_log]
            component = "AppController"
            "#,
        )
        .unwrap();

        assert_eq!(config.logger.context.as_deref(), Some("App"));
        assert_eq!(config.logger.log_level, Some(Severity::Warn));
        assert_eq!(config.access_log.component.as_deref(), Some("AppController"));
        assert_eq!(config.server.request_timeout_secs, 30);

        let logger = config.logger.build();
        assert!(logger.is_production());
        assert_eq!(logger.log_level(), Some(Severity::Warn));
    }

    #[test]
    fn test_build_default_routing() {
        let config = LoggerConfig {
            static_error_as_warn: true,
            production: Some(true),
            ..Default::default()
        };
        let handle = config.build_default();
        assert!(handle.is_installed());
        assert_eq!(handle.error_routing(), StaticErrorRouting::Warn);
    }
}
