//! Promise and commit signatures, and the set-union merge over them.

use crate::errors::{ProtocolError, Result};
use crate::types::{MemberKey, SignatureValue};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four signature kinds, encoded on the wire as a signed integer.
///
/// Positive values approve, negative values decline; the absolute value
/// selects the phase (1 = promise, 2 = commit). The decimal string of the
/// integer is the extra datum bound into the digest a signer signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum SignatureType {
    /// The signer will honor the transaction if committed (+1)
    Promise,
    /// The signer declines to honor the transaction (−1)
    NoPromise,
    /// A referee's affirmative final vote (+2)
    Commit,
    /// A referee's negative final vote (−2)
    NoCommit,
}

impl SignatureType {
    /// The promise-phase type for an approval decision
    pub fn promise_kind(approved: bool) -> Self {
        if approved {
            Self::Promise
        } else {
            Self::NoPromise
        }
    }

    /// The commit-phase type for an approval decision
    pub fn commit_kind(approved: bool) -> Self {
        if approved {
            Self::Commit
        } else {
            Self::NoCommit
        }
    }

}

impl From<SignatureType> for i8 {
    fn from(value: SignatureType) -> Self {
        match value {
            SignatureType::Promise => 1,
            SignatureType::NoPromise => -1,
            SignatureType::Commit => 2,
            SignatureType::NoCommit => -2,
        }
    }
}

impl TryFrom<i8> for SignatureType {
    type Error = String;

    fn try_from(value: i8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Promise),
            -1 => Ok(Self::NoPromise),
            2 => Ok(Self::Commit),
            -2 => Ok(Self::NoCommit),
            other => Err(format!("unknown signature type {other}")),
        }
    }
}

impl fmt::Display for SignatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", i8::from(*self))
    }
}

/// One signer's entry in a record's promise or commit set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSignature {
    /// Signature kind
    #[serde(rename = "type")]
    pub sig_type: SignatureType,
    /// The signer's public key
    pub key: MemberKey,
    /// The signature over the digest for this kind
    pub value: SignatureValue,
}

impl RecordSignature {
    /// Create a signature entry
    pub fn new(
        sig_type: SignatureType,
        key: impl Into<MemberKey>,
        value: impl Into<SignatureValue>,
    ) -> Self {
        Self {
            sig_type,
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Merge two signature sets into their key-union.
///
/// Prior entries are retained in order; incoming entries with novel keys are
/// appended in their own order. A key present on both sides must carry the
/// identical `(type, value)` pair, otherwise the merge fails with
/// `SignatureMutated`: a signer never has two distinct signatures in one
/// record.
pub fn merge_signatures(
    prior: &[RecordSignature],
    incoming: &[RecordSignature],
) -> Result<Vec<RecordSignature>> {
    let mut merged: Vec<RecordSignature> = prior.to_vec();
    for entry in incoming {
        match merged.iter().find(|s| s.key == entry.key) {
            Some(existing) => {
                if existing.sig_type != entry.sig_type || existing.value != entry.value {
                    return Err(ProtocolError::SignatureMutated {
                        key: entry.key.clone(),
                    });
                }
            }
            None => merged.push(entry.clone()),
        }
    }
    Ok(merged)
}
