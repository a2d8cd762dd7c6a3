//! # Cluedo setup
//!
//! Prepares a Cluedo deduction game on an external OWL reasoning service.
//!
//! The setup loads the game ontology, registers every suspect, weapon and
//! room as an individual of its class, declares the individuals of each class
//! pairwise distinct, runs the reasoner, and finally publishes ten candidate
//! hypotheses to a shared parameter store for the processes that play the
//! game.
//!
//! ## Example
//!
//! ```rust,ignore
//! use cluedo_setup::{GameSetup, HttpReasoningService, FileParameterStore, SetupConfig};
//! use std::sync::Arc;
//!
//! let config = SetupConfig::load_default();
//! let service = Arc::new(HttpReasoningService::from_config(&config.service));
//! let store = Arc::new(FileParameterStore::new(&config.params_file)?);
//! let hypotheses = GameSetup::new(&config, service, store).run()?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod config;
pub mod models;
pub mod observability;
pub mod params;
pub mod reasoner;
pub mod services;

pub use config::SetupConfig;
pub use models::{
    Catalog, Catalogs, ClassTag, Command, Directive, DirectiveResponse, Hypothesis,
    HypothesisShape,
};
pub use params::{FileParameterStore, MemoryParameterStore, ParameterStore};
pub use reasoner::{HttpReasoningService, OntologyHandle, ReasoningService};
pub use services::{GameSetup, HypothesisGenerator};

/// Error type for setup operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Malformed configuration values, empty catalogs |
/// | `OperationFailed` | Transport errors, unreadable replies, store I/O failures |
/// | `ServiceUnavailable` | The reasoning service did not come up within the wait timeout |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - The reasoning service cannot be reached or returns a non-2xx status
    /// - A service reply cannot be decoded
    /// - The parameter store cannot be written
    /// - Configuration files cannot be read or parsed
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// The reasoning service never became available.
    #[error("service '{service}' unavailable after {waited_ms}ms")]
    ServiceUnavailable {
        /// Name of the service that was awaited.
        service: String,
        /// How long the caller waited, in milliseconds.
        waited_ms: u64,
    },
}

/// Result type alias for setup operations.
pub type Result<T> = std::result::Result<T, Error>;
