//! Movie catalog REST backend: users, movies, ratings and tags over PostgreSQL,
//! served by one descriptor-driven CRUD mechanism.

pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod mapping;
pub mod migration;
pub mod model;
pub mod pagination;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;

pub use config::AppConfig;
pub use db::{Database, InMemoryDatabase, PgDatabase};
pub use error::{AppError, ConfigError, ConversionError};
pub use migration::apply_migrations;
pub use routes::{app, common_routes, entity_routes};
pub use service::{CrudService, Repository};
pub use state::AppState;
