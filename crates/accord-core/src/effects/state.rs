//! Storage capability: prior records, peer-last-known records, gossip push,
//! and the invalid-record sink.

use crate::errors::{ProtocolError, Result};
use crate::types::{MemberKey, TransactionCode, TrxRecord};
use async_trait::async_trait;

/// Durable participant state, supplied by the host.
///
/// The protocol reads and writes only through this trait and caches nothing
/// across `update` calls; whatever locking discipline the host needs is
/// implemented here. `push_peer_record` doubles as the transport hook;
/// how a record physically reaches the peer is opaque to the protocol.
/// Note there is no transaction write: persisting a node's own merged copy
/// is the host's concern (commonly a push addressed to the node itself).
#[async_trait]
pub trait StateEffects: Send + Sync {
    /// The stored record for a transaction, if any
    async fn transaction(&self, code: &TransactionCode) -> Result<Option<TrxRecord>>;

    /// Record the last version observed from a peer (idempotent)
    async fn set_peer_record(&self, peer: &MemberKey, record: &TrxRecord) -> Result<()>;

    /// The last version observed from a peer for a transaction, if any
    async fn peer_record(
        &self,
        peer: &MemberKey,
        code: &TransactionCode,
    ) -> Result<Option<TrxRecord>>;

    /// Push a record to a peer (the transport hook)
    async fn push_peer_record(&self, peer: &MemberKey, record: &TrxRecord) -> Result<()>;

    /// Log a record that failed validation, with the violation
    async fn log_invalid(&self, record: &TrxRecord, error: &ProtocolError) -> Result<()>;
}
