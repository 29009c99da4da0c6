pub mod models;
#[cfg(any(feature = "server", test))]
pub mod error;
#[cfg(any(feature = "server", test))]
pub mod query;
#[cfg(all(any(feature = "server", test), not(target_arch = "wasm32")))]
pub mod catalog;
#[cfg(all(any(feature = "server", test), not(target_arch = "wasm32")))]
pub mod seed;

#[cfg(all(any(feature = "server", test), not(target_arch = "wasm32")))]
pub use service::*;

#[cfg(all(any(feature = "server", test), not(target_arch = "wasm32")))]
mod service {
    use std::path::PathBuf;
    use std::sync::OnceLock;

    use super::catalog::Catalog;
    use super::error::{DirectoryError, DirectoryResult};
    use super::models::{ServerQuery, ServerView};
    use super::query::{ServerFilter, Viewer};
    use super::seed::Seed;

    pub const DB_PATH_ENV: &str = "SERVERHUB_DB";
    pub const SEED_PATH_ENV: &str = "SERVERHUB_SEED";
    pub const DEFAULT_DB_PATH: &str = "serverhub.db";

    static CATALOG: OnceLock<Catalog> = OnceLock::new();

    #[derive(Debug, Clone, PartialEq)]
    pub struct DirectoryConfig {
        pub db_path: PathBuf,
        /// JSON seed applied when the catalog has no categories yet.
        pub seed_path: Option<PathBuf>,
    }

    impl DirectoryConfig {
        pub fn from_env() -> Self {
            Self::from_values(
                std::env::var(DB_PATH_ENV).ok(),
                std::env::var(SEED_PATH_ENV).ok(),
            )
        }

        // Empty values count as unset.
        pub fn from_values(db_path: Option<String>, seed_path: Option<String>) -> Self {
            let db_path = db_path
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
            Self {
                db_path: PathBuf::from(db_path),
                seed_path: seed_path.filter(|p| !p.is_empty()).map(PathBuf::from),
            }
        }
    }

    pub fn open_catalog(config: &DirectoryConfig) -> DirectoryResult<Catalog> {
        tracing::info!("Opening server catalog at {}", config.db_path.display());
        let catalog = Catalog::open(&config.db_path)?;

        if let Some(path) = &config.seed_path {
            if catalog.categories()?.is_empty() {
                let seed_error = |reason: String| DirectoryError::Seed {
                    path: path.display().to_string(),
                    reason,
                };
                let raw = std::fs::read_to_string(path).map_err(|e| seed_error(e.to_string()))?;
                let seed: Seed = serde_json::from_str(&raw).map_err(|e| seed_error(e.to_string()))?;
                catalog.load_seed(&seed)?;
            } else {
                tracing::debug!("Catalog already populated, skipping seed {}", path.display());
            }
        }

        Ok(catalog)
    }

    /// Process-wide catalog, opened on first use from [`DirectoryConfig::from_env`].
    pub fn shared_catalog() -> DirectoryResult<Catalog> {
        if let Some(catalog) = CATALOG.get() {
            return Ok(catalog.clone());
        }
        let catalog = open_catalog(&DirectoryConfig::from_env())?;
        Ok(CATALOG.get_or_init(|| catalog).clone())
    }

    pub fn query_servers(
        catalog: &Catalog,
        query: &ServerQuery,
        viewer: &Viewer,
    ) -> DirectoryResult<Vec<ServerView>> {
        let filter = query.resolve(viewer).map_err(|e| {
            tracing::warn!("Rejected server query {:?}: {}", query, e);
            e
        })?;
        let servers = catalog.select(&filter)?;

        // A limit may leave nothing behind even though the server exists.
        if let Some(id) = filter.server_id {
            if servers.is_empty() {
                let unlimited = ServerFilter { limit: None, ..filter.clone() };
                if catalog.select(&unlimited)?.is_empty() {
                    return Err(DirectoryError::Validation(format!(
                        "Server with id {} not found",
                        id
                    )));
                }
            }
        }

        tracing::debug!("Server query {:?} matched {} servers", filter, servers.len());
        Ok(servers)
    }

    /// Runs [`query_servers`] off the async executor.
    pub async fn select_servers(
        catalog: Catalog,
        query: ServerQuery,
        viewer: Viewer,
    ) -> DirectoryResult<Vec<ServerView>> {
        tokio::task::spawn_blocking(move || query_servers(&catalog, &query, &viewer))
            .await
            .map_err(|e| DirectoryError::Join(e.to_string()))?
    }

}
