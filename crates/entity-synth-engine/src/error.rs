// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generation failure classification.
//!
//! Only conditions that abort an artifact (or the whole run) are errors.
//! Per-member problems such as a missing accessor or an unresolvable
//! method type are logged through `tracing` and the member is skipped.
//!
//! | Variant | Scope |
//! |---------|-------|
//! | `MissingPrimaryKey` | DAO of a concrete entity |
//! | `DuplicateArtifact` | artifact being defined |
//! | `UnknownEntity` | root lookup |
//! | `InheritanceCycle` | supertype recursion |
//! | `Cancelled` | run |
//! | `Source` | metadata extraction |
//! | `Config` | run setup |
//! | `WorkerPanicked` | parallel run |

use thiserror::Error;

use crate::config::ConfigError;

/// Error raised while synthesizing artifacts.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A concrete entity has no primary-key field in its supertype chain.
    #[error("No @Id field found for class: {entity}")]
    MissingPrimaryKey {
        /// Fully-qualified entity name.
        entity: String
    },

    /// Two artifacts (or two converter overloads) resolved to the same name.
    #[error("artifact `{name}` is already defined")]
    DuplicateArtifact {
        /// Qualified artifact name or method signature.
        name: String
    },

    /// A root or supertype name is not known to the metadata provider.
    #[error("entity `{name}` is not known to the metadata provider")]
    UnknownEntity {
        /// Requested name.
        name: String
    },

    /// The supertype chain loops back onto itself.
    #[error("inheritance cycle: {}", chain.join(" -> "))]
    InheritanceCycle {
        /// Entity names in traversal order, ending with the repeated one.
        chain: Vec<String>
    },

    /// The run was cancelled before all roots were processed.
    #[error("generation cancelled")]
    Cancelled,

    /// The metadata source could not be read.
    #[error("metadata source error: {0}")]
    Source(String),

    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A parallel worker thread panicked.
    #[error("generation worker panicked")]
    WorkerPanicked
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, GenerationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_message_lists_chain() {
        let err = GenerationError::InheritanceCycle {
            chain: vec!["a.A".into(), "a.B".into(), "a.A".into()]
        };
        assert_eq!(err.to_string(), "inheritance cycle: a.A -> a.B -> a.A");
    }

    #[test]
    fn missing_key_message() {
        let err = GenerationError::MissingPrimaryKey {
            entity: "app.model.Order".into()
        };
        assert_eq!(err.to_string(), "No @Id field found for class: app.model.Order");
    }

    #[test]
    fn config_error_is_transparent() {
        let err: GenerationError = ConfigError::MissingOption("basePackage").into();
        assert_eq!(
            err.to_string(),
            ConfigError::MissingOption("basePackage").to_string()
        );
    }
}
