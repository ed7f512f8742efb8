//! Runtime orchestration for progression records.
//!
//! This crate wires the pure engine from `clouds-core` to persistent storage.
//! Consumers embed [`ProgressionService`] to apply actions for a user, and
//! subscribe to [`EventBus`] topics to react to unlocks.
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the service and its error type
//! - [`events`] provides the topic-based progression event bus
//! - [`repository`] provides versioned record storage reused by other crates
//! - [`config`] reads runtime settings from the environment
pub mod api;
pub mod config;
pub mod events;
pub mod repository;

pub use api::{Applied, LevelOverview, ProgressionService, Result, ServiceError};
pub use config::RuntimeConfig;
pub use events::{EventBus, ProgressionEvent, Topic};
pub use repository::{
    FileProgressionRepository, InMemoryProgressionRepo, ProgressionRepository, RepositoryError,
    UserId, Versioned,
};
