use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Includes settings for the HTTP listener, the reference engine and logging.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub engine: EngineSettings,
    pub logging: LoggingSettings,
}

/// Configuration settings for the server.
///
/// Defines the host and port the contest server posts to.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Requests declaring a larger `Content-Length` are not read.
    pub max_body_bytes: u64,
}

/// Configuration settings for the in-memory reference engine.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// How many recent items are remembered per domain.
    pub max_items_per_domain: usize,
    /// Result size used when a request carries no `limit`.
    pub default_limit: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub server: Option<PartialServerSettings>,
    pub engine: Option<PartialEngineSettings>,
    pub logging: Option<PartialLoggingSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub max_body_bytes: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct PartialEngineSettings {
    pub max_items_per_domain: Option<usize>,
    pub default_limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_items_per_domain: 100,
            default_limit: 6,
        }
    }
}

/// Provides default values for `Settings`.
///
/// Ensures the application has sensible defaults if no configuration is provided.
impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
                max_body_bytes: 1024 * 1024,
            },
            engine: EngineSettings::default(),
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}

impl PartialSettings {
    /// Fills every value missing from `self` with the matching default.
    pub fn merge_with_defaults(self) -> Settings {
        let default = Settings::default();
        let server = self.server;
        let engine = self.engine;
        let logging = self.logging;

        Settings {
            server: ServerSettings {
                host: server
                    .as_ref()
                    .and_then(|s| s.host.clone())
                    .unwrap_or(default.server.host),
                port: server
                    .as_ref()
                    .and_then(|s| s.port)
                    .unwrap_or(default.server.port),
                max_body_bytes: server
                    .as_ref()
                    .and_then(|s| s.max_body_bytes)
                    .unwrap_or(default.server.max_body_bytes),
            },
            engine: EngineSettings {
                max_items_per_domain: engine
                    .as_ref()
                    .and_then(|e| e.max_items_per_domain)
                    .unwrap_or(default.engine.max_items_per_domain),
                default_limit: engine
                    .as_ref()
                    .and_then(|e| e.default_limit)
                    .unwrap_or(default.engine.default_limit),
            },
            logging: LoggingSettings {
                level: logging
                    .and_then(|l| l.level)
                    .unwrap_or(default.logging.level),
            },
        }
    }
}
