//! Core library exports for the blog service.
//!
//! Categories, posts and tags are stored together with their per-language
//! translations. Every write runs in a single transaction and reports
//! business-rule failures through [`services::Envelope`].

use diesel_migrations::{EmbeddedMigrations, embed_migrations};

pub mod domain;
pub mod models;
pub mod repository;
pub mod schema;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

/// Schema and catalog seed, applied at startup and by the test harness.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

#[cfg(feature = "server")]
pub use server::run;

#[cfg(feature = "server")]
mod server {
    use actix_web::middleware::Logger;
    use actix_web::{App, HttpServer, web};
    use diesel_migrations::MigrationHarness;
    use pushkind_common::db::establish_connection_pool;

    use crate::models::config::ServerConfig;
    use crate::repository::DieselRepository;
    use crate::routes;

    /// Open the database, apply pending migrations and serve the API.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        let pool = match establish_connection_pool(&server_config.database_url) {
            Ok(pool) => pool,
            Err(e) => {
                log::error!("Failed to establish database connection: {e}");
                return Err(std::io::Error::other(e.to_string()));
            }
        };

        {
            let mut conn = pool.get().map_err(|e| {
                log::error!("Failed to get a database connection: {e}");
                std::io::Error::other(e.to_string())
            })?;
            match conn.run_pending_migrations(crate::MIGRATIONS) {
                Ok(applied) => log::info!("Applied {} pending migration(s)", applied.len()),
                Err(e) => {
                    log::error!("Failed to run migrations: {e}");
                    return Err(std::io::Error::other(e.to_string()));
                }
            }
        }

        let repo = DieselRepository::new(pool);
        let address = server_config.address.clone();
        let port = server_config.port;
        log::info!("Starting server at http://{address}:{port}");

        HttpServer::new(move || {
            App::new()
                .wrap(Logger::default())
                .app_data(web::Data::new(repo.clone()))
                .app_data(routes::json_config())
                .configure(routes::configure)
        })
        .bind((address, port))?
        .run()
        .await
    }
}
