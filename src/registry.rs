//! The named singleton a host application registers the plugin under.
//!
//! A host builds one `SqliteRegistry` from its `sqlite` config block at
//! startup and keeps it for the life of the process. With a single `client`
//! entry the registry holds one database; with `clients` it holds one per
//! name.

use std::collections::BTreeMap;

use crate::error::SqlitePluginError;
use crate::facade::SqliteClient;
use crate::sqlite::config::{ClientConfig, Environment, PluginConfig};

/// Name the service is registered under in the host.
pub const SINGLETON_NAME: &str = "sqlite";

/// Key used for the client built from a single `client` (or bare `default`) entry.
pub const DEFAULT_CLIENT: &str = "default";

#[derive(Debug)]
pub struct SqliteRegistry {
    clients: BTreeMap<String, SqliteClient>,
}

impl SqliteRegistry {
    /// Open every client described by `config`.
    ///
    /// The `camelCase` flag is read here, once, and copied into each client.
    ///
    /// Unlike a host that skips the singleton when no client is configured,
    /// a config with neither `client` nor `clients` still opens one client
    /// from `default`, and an empty `clients` map is rejected.
    ///
    /// # Errors
    /// Returns `SqlitePluginError::ConfigError` if both `client` and `clients`
    /// are set or `clients` is empty, and `SqlitePluginError::ConnectionError`
    /// if any database fails to open.
    pub fn from_config(
        config: &PluginConfig,
        environment: Environment,
    ) -> Result<Self, SqlitePluginError> {
        let entries: Vec<(String, &ClientConfig)> = match (&config.client, &config.clients) {
            (Some(_), Some(_)) => {
                return Err(SqlitePluginError::ConfigError(
                    "sqlite config sets both `client` and `clients`".into(),
                ));
            }
            (Some(client), None) => vec![(DEFAULT_CLIENT.to_string(), client)],
            (None, Some(clients)) if clients.is_empty() => {
                return Err(SqlitePluginError::ConfigError(
                    "sqlite config `clients` is empty".into(),
                ));
            }
            (None, Some(clients)) => clients
                .iter()
                .map(|(name, client)| (name.clone(), client))
                .collect(),
            (None, None) => vec![(DEFAULT_CLIENT.to_string(), &config.default)],
        };

        let mut clients = BTreeMap::new();
        for (name, entry) in entries {
            let opts = entry
                .merged_over(&config.default)
                .to_options(config.camel_case, environment);
            tracing::debug!(client = %name, path = %opts.db_path, "creating sqlite client");
            clients.insert(name, SqliteClient::open(opts)?);
        }
        Ok(Self { clients })
    }

    /// Registry holding a single, already opened client.
    #[must_use]
    pub fn single(client: SqliteClient) -> Self {
        let mut clients = BTreeMap::new();
        clients.insert(DEFAULT_CLIENT.to_string(), client);
        Self { clients }
    }

    /// Name the registry is exposed under in the host.
    #[must_use]
    pub fn name(&self) -> &'static str {
        SINGLETON_NAME
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SqliteClient> {
        self.clients.get(name)
    }

    /// The only client, when exactly one is configured.
    ///
    /// # Errors
    /// Returns `SqlitePluginError::ConfigError` when several clients are
    /// configured; pick one with [`get`](Self::get) instead.
    pub fn client(&self) -> Result<&SqliteClient, SqlitePluginError> {
        let mut iter = self.clients.values();
        match (iter.next(), iter.next()) {
            (Some(client), None) => Ok(client),
            _ => Err(SqlitePluginError::ConfigError(format!(
                "{} sqlite clients configured; select one by name",
                self.clients.len()
            ))),
        }
    }

    /// Configured client names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.clients.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
