//! The transaction record: the protocol message and the unit of storage.

use crate::types::{MemberKey, RecordSignature, SessionCode, Topology, TransactionCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One multi-party transaction, as gossiped between nodes.
///
/// Everything except the two signature sets is immutable for the life of the
/// transaction; a record is a value, and every signature append produces a
/// new record. Timestamps are integer milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrxRecord {
    /// Globally unique, high-entropy transaction identifier
    pub transaction_code: TransactionCode,
    /// High-entropy session identifier for per-session node keys
    pub session_code: SessionCode,
    /// What the parties are agreeing to; opaque to the protocol
    pub payload: serde_json::Value,
    /// The fixed member-and-link structure
    pub topology: Topology,
    /// When the transaction was opened
    pub start: u64,
    /// Deadline for promises
    pub promises_due: u64,
    /// Deadline for commits
    pub commits_due: u64,
    /// Participant promises, insertion-ordered, at most one per key
    #[serde(default)]
    pub promises: Vec<RecordSignature>,
    /// Referee commits, insertion-ordered, at most one per key
    #[serde(default)]
    pub commits: Vec<RecordSignature>,
}

impl TrxRecord {
    /// Whether `key` has already promised (positively or negatively)
    pub fn has_promise_from(&self, key: &MemberKey) -> bool {
        self.promises.iter().any(|s| &s.key == key)
    }

    /// Whether `key` has already committed (positively or negatively)
    pub fn has_commit_from(&self, key: &MemberKey) -> bool {
        self.commits.iter().any(|s| &s.key == key)
    }

    /// Whether every key in `participants` appears in the promise set
    pub fn covers_participants(&self, participants: &BTreeSet<MemberKey>) -> bool {
        participants.iter().all(|k| self.has_promise_from(k))
    }

    /// A new record with `signature` appended to the promise set
    pub fn with_promise(&self, signature: RecordSignature) -> Self {
        let mut next = self.clone();
        next.promises.push(signature);
        next
    }

    /// A new record with `signature` appended to the commit set
    pub fn with_commit(&self, signature: RecordSignature) -> Self {
        let mut next = self.clone();
        next.commits.push(signature);
        next
    }

    /// Whether `other` carries fewer signatures than this record in at least
    /// one of the two sets. This is the staleness test for gossip targets.
    pub fn is_newer_than(&self, other: &TrxRecord) -> bool {
        other.promises.len() < self.promises.len() || other.commits.len() < self.commits.len()
    }
}

/// Builder for originating transaction records.
#[derive(Debug, Clone)]
pub struct TrxRecordBuilder {
    transaction_code: TransactionCode,
    session_code: SessionCode,
    payload: serde_json::Value,
    topology: Topology,
    start: u64,
    promises_due: u64,
    commits_due: u64,
}

impl TrxRecordBuilder {
    /// Start a builder from the two identifying codes
    pub fn new(
        transaction_code: impl Into<TransactionCode>,
        session_code: impl Into<SessionCode>,
    ) -> Self {
        Self {
            transaction_code: transaction_code.into(),
            session_code: session_code.into(),
            payload: serde_json::Value::Null,
            topology: Topology::new(),
            start: 0,
            promises_due: 0,
            commits_due: 0,
        }
    }

    /// Set the opaque payload
    pub fn payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// Set the topology
    pub fn topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    /// Set the three deadlines
    pub fn schedule(mut self, start: u64, promises_due: u64, commits_due: u64) -> Self {
        self.start = start;
        self.promises_due = promises_due;
        self.commits_due = commits_due;
        self
    }

    /// Build the record with empty signature sets
    pub fn build(self) -> TrxRecord {
        TrxRecord {
            transaction_code: self.transaction_code,
            session_code: self.session_code,
            payload: self.payload,
            topology: self.topology,
            start: self.start,
            promises_due: self.promises_due,
            commits_due: self.commits_due,
            promises: Vec::new(),
            commits: Vec::new(),
        }
    }
}
