//! String-backed identifier types.
//!
//! Identifiers are generated with a declarative macro to keep the trait
//! surface uniform: member keys and signature values are base64 strings in
//! the default signer, transaction and session codes are host-generated
//! high-entropy strings validated by `CodeOptions`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Generate a string-backed identifier type with standard traits.
macro_rules! string_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            /// Create a new identifier
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the inner string
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(
    /// Public key identifying a member of a topology.
    MemberKey
);

string_id!(
    /// Globally unique, high-entropy identifier of a transaction.
    TransactionCode
);

string_id!(
    /// High-entropy identifier scoping per-transaction node keys, so node
    /// identity is not linkable across transactions.
    SessionCode
);

string_id!(
    /// A signer's signature over a record digest.
    SignatureValue
);
