//! Postgres repository implementation using Diesel.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic retry for transient failures
//! - Connection health monitoring
//! - Automatic migration execution
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
//! - `PG_MAX_RETRIES`: Maximum retry attempts for transient failures (default: 3)
//! - `PG_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task;

use crate::db::repository::{
    ErrorContext, LessonRepository, PersonRepository, RepositoryError, RepositoryResult,
};
use crate::models::{Group, Lesson, LessonId, NewLesson, NewPerson, Person, PersonId, PersonKey};

mod models;
mod schema;

use models::*;
use schema::*;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
    /// Maximum number of retry attempts for transient failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    ///
    /// Only the connection string is required; every pool setting falls back
    /// to its default when unset or unparsable.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let defaults = Self::default();
        Ok(Self {
            database_url,
            max_pool_size: env_or("PG_POOL_MAX", defaults.max_pool_size),
            min_pool_size: env_or("PG_POOL_MIN", defaults.min_pool_size),
            connection_timeout_sec: env_or("PG_CONN_TIMEOUT_SEC", defaults.connection_timeout_sec),
            idle_timeout_sec: env_or("PG_IDLE_TIMEOUT_SEC", defaults.idle_timeout_sec),
            max_retries: env_or("PG_MAX_RETRIES", defaults.max_retries),
            retry_delay_ms: env_or("PG_RETRY_DELAY_MS", defaults.retry_delay_ms),
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Pool health statistics.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    pub connections_in_use: u32,
    pub idle_connections: u32,
    pub total_connections: u32,
    pub max_size: u32,
    pub total_queries: u64,
    pub failed_queries: u64,
    pub retried_operations: u64,
}

/// Diesel-backed repository for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
    total_queries: Arc<AtomicU64>,
    failed_queries: Arc<AtomicU64>,
    retried_operations: Arc<AtomicU64>,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
                RepositoryError::internal_with_context(
                    format!("Migration failed: {}", e),
                    ErrorContext::new("run_migrations"),
                )
            })?;
        }

        log::info!(
            "Postgres repository ready (pool max={}, min={})",
            config.max_pool_size,
            config.min_pool_size
        );

        Ok(Self {
            pool,
            config,
            total_queries: Arc::new(AtomicU64::new(0)),
            failed_queries: Arc::new(AtomicU64::new(0)),
            retried_operations: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Execute a database operation on a pooled connection.
    ///
    /// Runs on the blocking thread pool. Checkout failures and retryable query
    /// errors are retried up to `max_retries` times with exponential backoff.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let retry_delay_ms = self.config.retry_delay_ms;
        let total_queries = self.total_queries.clone();
        let failed_queries = self.failed_queries.clone();
        let retried_operations = self.retried_operations.clone();

        task::spawn_blocking(move || {
            let mut last_error = None;
            let mut retry_delay = Duration::from_millis(retry_delay_ms);

            for attempt in 0..=max_retries {
                if attempt > 0 {
                    retried_operations.fetch_add(1, Ordering::Relaxed);
                    std::thread::sleep(retry_delay);
                    retry_delay *= 2;
                }

                let mut conn = match pool.get() {
                    Ok(c) => c,
                    Err(e) => {
                        let err = RepositoryError::connection_with_context(
                            e.to_string(),
                            ErrorContext::new("get_connection")
                                .with_details(format!("attempt={}", attempt + 1)),
                        );
                        log::warn!("{}", err);
                        if attempt < max_retries {
                            last_error = Some(err);
                            continue;
                        }
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(err);
                    }
                };

                total_queries.fetch_add(1, Ordering::Relaxed);
                match f.clone()(&mut conn) {
                    Ok(result) => return Ok(result),
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        last_error = Some(e);
                        continue;
                    }
                    Err(e) => {
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(e);
                    }
                }
            }

            failed_queries.fetch_add(1, Ordering::Relaxed);
            Err(last_error.unwrap_or_else(|| {
                RepositoryError::internal("Max retries exceeded with no error captured")
            }))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }

    /// Current pool state and query counters.
    pub fn get_pool_stats(&self) -> PoolStats {
        let state = self.pool.state();
        PoolStats {
            connections_in_use: state.connections - state.idle_connections,
            idle_connections: state.idle_connections,
            total_connections: state.connections,
            max_size: self.config.max_pool_size,
            total_queries: self.total_queries.load(Ordering::Relaxed),
            failed_queries: self.failed_queries.load(Ordering::Relaxed),
            retried_operations: self.retried_operations.load(Ordering::Relaxed),
        }
    }
}

fn decode_lessons(rows: Vec<LessonRow>) -> RepositoryResult<Vec<Lesson>> {
    rows.into_iter().map(Lesson::try_from).collect()
}

#[async_trait]
impl LessonRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(|e| RepositoryError::from(e).with_operation("health_check"))
        })
        .await
    }

    async fn list_lessons(&self) -> RepositoryResult<Vec<Lesson>> {
        self.with_conn(|conn| {
            let rows = lessons::table
                .order(lessons::id.asc())
                .select(LessonRow::as_select())
                .load(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("list_lessons"))?;
            decode_lessons(rows)
        })
        .await
    }

    async fn list_lessons_by_group(&self, group: &str) -> RepositoryResult<Vec<Lesson>> {
        let group = group.to_string();
        self.with_conn(move |conn| {
            let rows = lessons::table
                .filter(lessons::group_name.eq(&group))
                .order(lessons::id.asc())
                .select(LessonRow::as_select())
                .load(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("list_lessons_by_group"))?;
            decode_lessons(rows)
        })
        .await
    }

    async fn get_lesson(&self, id: LessonId) -> RepositoryResult<Option<Lesson>> {
        self.with_conn(move |conn| {
            lessons::table
                .find(id)
                .select(LessonRow::as_select())
                .first(conn)
                .optional()
                .map_err(|e| RepositoryError::from(e).with_operation("get_lesson"))?
                .map(Lesson::try_from)
                .transpose()
        })
        .await
    }

    async fn replace_lesson(&self, id: LessonId, lesson: &NewLesson) -> RepositoryResult<Lesson> {
        let lesson = lesson.clone();
        self.with_conn(move |conn| {
            let row = conn
                .transaction(|tx| {
                    diesel::update(lessons::table.find(id))
                        .set(LessonChangeset::from(&lesson))
                        .returning(LessonRow::as_returning())
                        .get_result(tx)
                        .optional()
                })
                .map_err(|e| RepositoryError::from(e).with_operation("replace_lesson"))?;

            match row {
                Some(row) => Lesson::try_from(row),
                None => Err(RepositoryError::not_found_with_context(
                    format!("Lesson with id = {} not found", id),
                    ErrorContext::new("replace_lesson")
                        .with_entity("lesson")
                        .with_entity_id(id),
                )),
            }
        })
        .await
    }

    async fn list_groups(&self) -> RepositoryResult<Vec<Group>> {
        self.with_conn(|conn| {
            groups::table
                .select(groups::name)
                .order(groups::name.asc())
                .load::<String>(conn)
                .map(|names| names.into_iter().map(Group::new).collect())
                .map_err(|e| RepositoryError::from(e).with_operation("list_groups"))
        })
        .await
    }

    async fn register_group(&self, name: &str) -> RepositoryResult<Group> {
        let name = name.to_string();
        self.with_conn(move |conn| {
            diesel::insert_into(groups::table)
                .values(groups::name.eq(&name))
                .on_conflict_do_nothing()
                .execute(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("register_group"))?;
            Ok(Group::new(name))
        })
        .await
    }
}

#[async_trait]
impl PersonRepository for PostgresRepository {
    async fn list_persons(&self) -> RepositoryResult<Vec<Person>> {
        self.with_conn(|conn| {
            personalities::table
                .order(personalities::id.asc())
                .select(PersonRow::as_select())
                .load(conn)
                .map(|rows| rows.into_iter().map(Person::from).collect())
                .map_err(|e| RepositoryError::from(e).with_operation("list_persons"))
        })
        .await
    }

    async fn get_person_by(&self, key: PersonKey, value: &str) -> RepositoryResult<Option<Person>> {
        let value = value.to_string();
        self.with_conn(move |conn| {
            let query = personalities::table
                .order(personalities::id.asc())
                .select(PersonRow::as_select())
                .into_boxed();

            let query = match key {
                PersonKey::Id => match value.parse::<PersonId>() {
                    Ok(id) => query.filter(personalities::id.eq(id)),
                    Err(_) => return Ok(None),
                },
                PersonKey::Email => query.filter(personalities::email.eq(value)),
                PersonKey::Phone => query.filter(personalities::phone.eq(value)),
            };

            query
                .first(conn)
                .optional()
                .map(|row| row.map(Person::from))
                .map_err(|e| RepositoryError::from(e).with_operation("get_person_by"))
        })
        .await
    }

    async fn insert_person(&self, person: &NewPerson) -> RepositoryResult<Person> {
        let person = person.clone();
        self.with_conn(move |conn| {
            diesel::insert_into(personalities::table)
                .values(PersonChangeset::from(&person))
                .returning(PersonRow::as_returning())
                .get_result(conn)
                .map(Person::from)
                .map_err(|e| RepositoryError::from(e).with_operation("insert_person"))
        })
        .await
    }

    async fn replace_person(&self, id: PersonId, person: &NewPerson) -> RepositoryResult<Person> {
        let person = person.clone();
        self.with_conn(move |conn| {
            let row = conn
                .transaction(|tx| {
                    diesel::update(personalities::table.find(id))
                        .set(PersonChangeset::from(&person))
                        .returning(PersonRow::as_returning())
                        .get_result(tx)
                        .optional()
                })
                .map_err(|e| RepositoryError::from(e).with_operation("replace_person"))?;

            row.map(Person::from).ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Person with id = {} not found", id),
                    ErrorContext::new("replace_person")
                        .with_entity("person")
                        .with_entity_id(id),
                )
            })
        })
        .await
    }
}
