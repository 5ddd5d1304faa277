use std::collections::BTreeMap;
use std::time::Duration;

use clap::ValueEnum;
use serde::Deserialize;

use crate::error::SqlitePluginError;
use crate::facade::SqliteClient;

/// Path that opens a private in-memory database.
pub const IN_MEMORY: &str = ":memory:";

/// Busy timeout applied when none is configured.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Deployment environment of the host application.
///
/// Only `Prod` counts as production; every other value keeps per-statement
/// timing enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Developer machine
    Local,
    /// Test runs
    Unittest,
    /// No environment given
    #[default]
    Default,
    /// Production
    Prod,
}

impl Environment {
    #[must_use]
    pub fn is_production(self) -> bool {
        self == Environment::Prod
    }

    /// Parse an environment name. Matching is exact: `"PROD"` or `" prod "`
    /// are unknown names and fall back to `Default`.
    #[must_use]
    pub fn from_env_str(value: &str) -> Self {
        <Environment as ValueEnum>::from_str(value, false).unwrap_or_default()
    }

    /// Read `SQLITE_PLUGIN_ENV`, falling back to `APP_ENV`.
    #[must_use]
    pub fn from_process_env() -> Self {
        std::env::var("SQLITE_PLUGIN_ENV")
            .or_else(|_| std::env::var("APP_ENV"))
            .map(|v| Self::from_env_str(&v))
            .unwrap_or_default()
    }
}

/// Options for opening a `SQLite` client.
#[derive(Debug, Clone, PartialEq)]
pub struct SqliteOptions {
    pub db_path: String,
    pub read_only: bool,
    pub file_must_exist: bool,
    pub busy_timeout: Duration,
    pub camel_case: bool,
    pub environment: Environment,
}

impl Default for SqliteOptions {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl SqliteOptions {
    #[must_use]
    pub fn new(db_path: String) -> Self {
        Self {
            db_path,
            read_only: false,
            file_must_exist: false,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            camel_case: false,
            environment: Environment::Default,
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY.to_string())
    }

    #[must_use]
    pub fn with_camel_case(mut self, camel_case: bool) -> Self {
        self.camel_case = camel_case;
        self
    }

    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.db_path == IN_MEMORY
    }
}

/// Fluent builder for `SQLite` options.
#[derive(Debug, Clone)]
pub struct SqliteOptionsBuilder {
    opts: SqliteOptions,
}

impl SqliteOptionsBuilder {
    #[must_use]
    pub fn new(db_path: String) -> Self {
        Self {
            opts: SqliteOptions::new(db_path),
        }
    }

    #[must_use]
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.opts.read_only = read_only;
        self
    }

    #[must_use]
    pub fn file_must_exist(mut self, file_must_exist: bool) -> Self {
        self.opts.file_must_exist = file_must_exist;
        self
    }

    #[must_use]
    pub fn busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.opts.busy_timeout = busy_timeout;
        self
    }

    #[must_use]
    pub fn camel_case(mut self, camel_case: bool) -> Self {
        self.opts.camel_case = camel_case;
        self
    }

    #[must_use]
    pub fn environment(mut self, environment: Environment) -> Self {
        self.opts.environment = environment;
        self
    }

    #[must_use]
    pub fn finish(self) -> SqliteOptions {
        self.opts
    }

    /// Open a client with these options.
    ///
    /// # Errors
    ///
    /// Returns `SqlitePluginError::ConnectionError` if the database cannot be opened.
    pub fn open(self) -> Result<SqliteClient, SqlitePluginError> {
        SqliteClient::open(self.finish())
    }
}

/// Engine options block of a client config (`readonly`, `fileMustExist`, `timeout` in ms).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionOptions {
    pub readonly: Option<bool>,
    pub file_must_exist: Option<bool>,
    pub timeout: Option<u64>,
}

impl ConnectionOptions {
    /// Field-wise merge: values set on `self` win over `base`.
    #[must_use]
    pub fn merged_over(&self, base: &ConnectionOptions) -> ConnectionOptions {
        ConnectionOptions {
            readonly: self.readonly.or(base.readonly),
            file_must_exist: self.file_must_exist.or(base.file_must_exist),
            timeout: self.timeout.or(base.timeout),
        }
    }
}

/// One client entry: a database path plus engine options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    pub path: Option<String>,
    pub options: Option<ConnectionOptions>,
}

impl ClientConfig {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            options: None,
        }
    }

    /// Overlay this entry on `base` (usually the plugin's `default` block).
    #[must_use]
    pub fn merged_over(&self, base: &ClientConfig) -> ClientConfig {
        let options = match (&self.options, &base.options) {
            (Some(own), Some(base)) => Some(own.merged_over(base)),
            (own, base) => own.clone().or_else(|| base.clone()),
        };
        ClientConfig {
            path: self.path.clone().or_else(|| base.path.clone()),
            options,
        }
    }

    /// Resolve into concrete open options.
    #[must_use]
    pub fn to_options(&self, camel_case: bool, environment: Environment) -> SqliteOptions {
        let engine = self.options.clone().unwrap_or_default();
        SqliteOptions {
            db_path: self.path.clone().unwrap_or_else(|| IN_MEMORY.to_string()),
            read_only: engine.readonly.unwrap_or(false),
            file_must_exist: engine.file_must_exist.unwrap_or(false),
            busy_timeout: engine
                .timeout
                .map_or(DEFAULT_BUSY_TIMEOUT, Duration::from_millis),
            camel_case,
            environment,
        }
    }
}

/// The plugin's configuration block.
///
/// ```json
/// {
///   "default": { "path": ":memory:", "options": null },
///   "camelCase": false,
///   "client": { "path": "app.db" }
/// }
/// ```
///
/// Set either `client` (one database) or `clients` (several, by name). With
/// neither, a single client is built from `default`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    #[serde(default)]
    pub default: ClientConfig,
    #[serde(default)]
    pub camel_case: bool,
    pub client: Option<ClientConfig>,
    pub clients: Option<BTreeMap<String, ClientConfig>>,
}

impl PluginConfig {
    /// Parse a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns `SqlitePluginError::ConfigError` if the document is not a valid config.
    pub fn from_json_str(json: &str) -> Result<Self, SqlitePluginError> {
        serde_json::from_str(json)
            .map_err(|e| SqlitePluginError::ConfigError(format!("invalid sqlite config: {e}")))
    }
}
