//! TaskData Mapper Library
//!
//! A Rust library for converting ISO 11783-10 TaskData tasks to and from a
//! canonical agricultural operations model.
//!
//! This library provides tools for:
//! - Reconciling document string identifiers with canonical reference ids
//! - Encoding and decoding logged quantities through a DDI dictionary
//! - Aggregating logged time entries into stamped summaries
//! - Importing and exporting work orders and logged data records
//! - Delegating worker, guidance, comment, prescription and time log content
//!   to pluggable sub-mappers

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod collaborators;
        pub mod identifier_map;
        pub mod quantity_dictionary;
        pub mod session;
        pub mod summary_aggregator;
        pub mod task_mapper;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::canonical::{DataModel, LoggedData, ReferenceId, WorkItem, WorkStatus};
pub use app::models::document::{IsoTask, IsoTaskData, IsoTaskStatus};
pub use app::services::identifier_map::IdentifierMap;
pub use app::services::quantity_dictionary::QuantityDictionary;
pub use app::services::session::ConversionSession;
pub use config::ConversionConfig;

/// Result type alias for the TaskData mapper
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for TaskData conversion operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An identifier pair contradicts an existing registration
    #[error(
        "Conflicting identifier: cannot bind '{external}' to {internal} ({existing})"
    )]
    ConflictingIdentifier {
        external: String,
        internal: ReferenceId,
        existing: String,
    },

    /// No reference id is left below the lowest one in use
    #[error("Reference ids exhausted: no id left below {lowest}")]
    IdentifiersExhausted { lowest: ReferenceId },

    /// DDI export text could not be parsed
    #[error("DDI dictionary error at line {line}: {message}")]
    DictionaryParse { line: usize, message: String },

    /// A sub-mapper failed while building a nested structure
    #[error("{collaborator} mapping failed: {message}")]
    Collaborator {
        collaborator: String,
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create a conflicting identifier error
    pub fn conflicting_identifier(
        external: impl Into<String>,
        internal: ReferenceId,
        existing: impl Into<String>,
    ) -> Self {
        Self::ConflictingIdentifier {
            external: external.into(),
            internal,
            existing: existing.into(),
        }
    }

    /// Create an exhausted reference id error
    pub fn identifiers_exhausted(lowest: ReferenceId) -> Self {
        Self::IdentifiersExhausted { lowest }
    }

    /// Create a dictionary parse error
    pub fn dictionary_parse(line: usize, message: impl Into<String>) -> Self {
        Self::DictionaryParse {
            line,
            message: message.into(),
        }
    }

    /// Create a collaborator error
    pub fn collaborator(collaborator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Collaborator {
            collaborator: collaborator.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Whether this error must abort the whole conversion call instead of
    /// degrading a single mapping stage
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ConflictingIdentifier { .. }
                | Self::IdentifiersExhausted { .. }
                | Self::Configuration { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}
