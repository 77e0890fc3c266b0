//! Repository trait definitions for database operations.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`measurement`]: Window and aggregate queries over observations
//! - [`station`]: Station listing
//!
//! Handlers depend on [`FullRepository`] so the SQLite store and the
//! in-memory store are interchangeable.

pub mod error;
pub mod measurement;
pub mod station;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

pub use measurement::MeasurementRepository;
pub use station::StationRepository;

/// Composite trait bound for a complete repository implementation.
pub trait FullRepository: MeasurementRepository + StationRepository {}

// Blanket implementation: any type implementing both traits is a FullRepository
impl<T> FullRepository for T where T: MeasurementRepository + StationRepository {}
