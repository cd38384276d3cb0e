//! Unified error type for Accord operations.
//!
//! Protocol violations terminate the current update, are written once to the
//! host's invalid-record sink, and re-raised unchanged. Capability failures
//! (signer, storage, decider) pass through without being logged as invalid
//! records.

use crate::types::MemberKey;
use serde::{Deserialize, Serialize};

/// Error type for all Accord protocol operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ProtocolError {
    /// A transaction or session code failed the configured randomness check.
    #[error("code entropy too low for {field}")]
    CodeEntropyTooLow {
        /// Which code failed ("transactionCode" or "sessionCode")
        field: String,
    },

    /// A record deadline is inconsistent with the clock or timing policy.
    #[error("temporal violation: {message}")]
    TemporalViolation {
        /// What the record got wrong
        message: String,
    },

    /// Prior and incoming records disagree on an immutable field.
    #[error("immutable field mismatch: {field}")]
    FieldMismatch {
        /// Name of the first mismatching field
        field: String,
    },

    /// The same key appears more than once in a signature set.
    #[error("duplicate signature from {key}")]
    DuplicateSignature {
        /// The offending signer key
        key: MemberKey,
    },

    /// A signature was produced by a key outside the required role set.
    #[error("{key} is not a {role} of this topology")]
    UnknownSigner {
        /// The offending signer key
        key: MemberKey,
        /// The role the signature requires ("participant" or "referee")
        role: String,
    },

    /// A signature did not verify against the record digest for its key.
    #[error("signature from {key} failed verification")]
    BadSignature {
        /// The offending signer key
        key: MemberKey,
    },

    /// Commits are present before every participant has promised.
    #[error("commits present before all promises")]
    OutOfPhaseCommit,

    /// Merge saw the same key with a different (type, value) pair.
    #[error("conflicting signature from {key}")]
    SignatureMutated {
        /// The offending signer key
        key: MemberKey,
    },

    /// Canonical serialization failed.
    #[error("serialization error: {message}")]
    Serialization {
        /// Details of the failure
        message: String,
    },

    /// Signer capability failure (passthrough).
    #[error("signer error: {message}")]
    Signer {
        /// Details from the host signer
        message: String,
    },

    /// Storage capability failure (passthrough).
    #[error("storage error: {message}")]
    Storage {
        /// Details from the host storage
        message: String,
    },

    /// Decider capability failure (passthrough).
    #[error("decider error: {message}")]
    Decider {
        /// Details from the host decider
        message: String,
    },
}

impl ProtocolError {
    /// Create a temporal violation error
    pub fn temporal(message: impl Into<String>) -> Self {
        Self::TemporalViolation {
            message: message.into(),
        }
    }

    /// Create a field mismatch error
    pub fn field_mismatch(field: impl Into<String>) -> Self {
        Self::FieldMismatch {
            field: field.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a signer capability error
    pub fn signer(message: impl Into<String>) -> Self {
        Self::Signer {
            message: message.into(),
        }
    }

    /// Create a storage capability error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a decider capability error
    pub fn decider(message: impl Into<String>) -> Self {
        Self::Decider {
            message: message.into(),
        }
    }

    /// True for violations of the protocol itself, false for capability
    /// passthrough. Only violations are written to the invalid-record sink.
    pub fn is_protocol_violation(&self) -> bool {
        !matches!(
            self,
            Self::Signer { .. } | Self::Storage { .. } | Self::Decider { .. }
        )
    }
}

impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

/// Standard Result type for Accord operations
pub type Result<T> = std::result::Result<T, ProtocolError>;
