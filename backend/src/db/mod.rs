//! Storage collaborator.
//!
//! ```text
//! services (schedule / directory)
//!         │  &dyn FullRepository
//!         ▼
//! repository traits ──► LocalRepository     (in-memory)
//!                   └─► PostgresRepository  (Diesel + r2d2, `postgres-repo`)
//! ```
//!
//! - `repository`: trait definitions and [`RepositoryError`]
//! - `repositories`: the two backends
//! - `factory`: backend selection from environment or `repository.toml`
//! - `repo_config`: the TOML configuration file

#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;

#[cfg(feature = "postgres-repo")]
pub use repositories::postgres::{PoolStats, PostgresConfig};

/// Placeholder so signatures stay identical when Postgres is compiled out.
#[cfg(not(feature = "postgres-repo"))]
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    _private: (),
}

pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{
    ErrorContext, FullRepository, LessonRepository, PersonRepository, RepositoryError,
    RepositoryResult,
};
