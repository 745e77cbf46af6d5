// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Conversion failure classification.

use thiserror::Error;

/// Error raised by converter dispatch.
///
/// Both the runtime [`ConversionTable`](crate::ConversionTable) and the
/// engine-side dispatch index report through this type, so callers see one
/// classified failure kind regardless of where dispatch happened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// No conversion is registered for the runtime type of the value.
    #[error("Conversion method not found: {type_name}")]
    MethodNotFound {
        /// Name of the offending runtime type.
        type_name: String
    },

    /// The matched conversion ran and failed.
    ///
    /// The message of the underlying failure is kept verbatim.
    #[error("{message}")]
    Failed {
        /// Name of the runtime type being converted.
        type_name: String,
        /// Message of the original failure.
        message:   String
    }
}

impl ConversionError {
    /// Create a [`ConversionError::MethodNotFound`] for `type_name`.
    pub fn not_found(type_name: impl Into<String>) -> Self {
        Self::MethodNotFound {
            type_name: type_name.into()
        }
    }

    /// Check if this is a dispatch miss.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::MethodNotFound { .. })
    }

    /// Name of the runtime type the failure refers to.
    pub fn type_name(&self) -> &str {
        match self {
            Self::MethodNotFound {
                type_name
            }
            | Self::Failed {
                type_name, ..
            } => type_name
        }
    }
}
