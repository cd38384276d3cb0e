//! Accord Core
//!
//! Core types for the Accord promise-then-commit transaction protocol:
//! - **TrxRecord**: the protocol message and unit of storage
//! - **Topology**: members, links, and the derived participant/referee views
//! - **RecordSignature**: per-key promise and commit signatures with merge
//! - **Digest**: deterministic SHA-256 digests over canonical record bytes
//! - **Effects**: capability traits supplied by the host (signer, state,
//!   decider, clock)
//! - **Config**: code randomness and timing policy
//!
//! This crate contains no protocol logic; the participant state machine lives
//! in `accord-protocol` and default effect handlers in `accord-effects`.

pub mod canonical;
pub mod config;
pub mod digest;
pub mod effects;
pub mod encoding;
pub mod errors;
pub mod types;

pub use config::{CodeOptions, DeadlineRule, ProtocolConfig, TimingOptions};
pub use digest::{commit_digest, promise_digest};
pub use errors::{ProtocolError, Result};
pub use types::{
    Link, Member, MemberEndpoint, MemberKey, RecordSignature, SessionCode, SignatureType,
    SignatureValue, Topology, TransactionCode, TrxRecord, TrxRecordBuilder,
};
