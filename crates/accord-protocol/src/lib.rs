//! Accord Protocol
//!
//! The per-node participant state machine for promise-then-commit
//! transactions. One entry point drives everything: a node receives a
//! proposed or updated record from a peer, validates it against its stored
//! prior and the cryptographic invariants, merges the signature sets,
//! computes its own role and what it must now sign, and gossips the result to
//! reachable peers.
//!
//! All side effects go through the capability traits in
//! `accord_core::effects`; the engine holds no state of its own between
//! `update` calls.

pub mod participant;
pub mod state;
pub mod validate;

pub use participant::TrxParticipant;
pub use state::{evaluate_record_state, RecordState};
pub use validate::{merge_records, validate_new, validate_update};
