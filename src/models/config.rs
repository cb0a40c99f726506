use serde::Deserialize;

/// Configuration options specific to the blog service.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface the HTTP server binds to.
    pub address: String,
    /// TCP port the HTTP server listens on.
    pub port: u16,
    /// Path to the SQLite database file.
    pub database_url: String,
}
