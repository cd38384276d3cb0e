//! In-memory participant state.

use accord_core::effects::StateEffects;
use accord_core::{MemberKey, ProtocolError, Result, TransactionCode, TrxRecord};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory `StateEffects` handler with a gossip outbox.
///
/// Clones share state, so a test can keep a handle for assertions while the
/// participant driver owns another. Pushes addressed to other peers land in
/// the outbox for the harness to deliver; a push addressed to this node's own
/// key persists the transaction copy instead, which is how a node whose own
/// member entry is directly addressable retains its merged record.
#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    our_key: Option<MemberKey>,
    transactions: Arc<RwLock<HashMap<TransactionCode, TrxRecord>>>,
    peer_records: Arc<RwLock<HashMap<(MemberKey, TransactionCode), TrxRecord>>>,
    outbox: Arc<RwLock<Vec<(MemberKey, TrxRecord)>>>,
    invalid: Arc<RwLock<Vec<(TrxRecord, ProtocolError)>>>,
}

impl MemoryState {
    /// State for a harness with no node identity
    pub fn new() -> Self {
        Self::default()
    }

    /// State for the node holding `our_key`; self-pushes persist locally
    pub fn for_node(our_key: MemberKey) -> Self {
        Self {
            our_key: Some(our_key),
            ..Self::default()
        }
    }

    /// Persist a transaction record (the host-side write)
    pub async fn insert_transaction(&self, record: TrxRecord) {
        self.transactions
            .write()
            .await
            .insert(record.transaction_code.clone(), record);
    }

    /// Take everything pushed to other peers since the last drain
    pub async fn drain_outbox(&self) -> Vec<(MemberKey, TrxRecord)> {
        std::mem::take(&mut *self.outbox.write().await)
    }

    /// Records rejected by validation, with their violations
    pub async fn invalid_log(&self) -> Vec<(TrxRecord, ProtocolError)> {
        self.invalid.read().await.clone()
    }
}

#[async_trait]
impl StateEffects for MemoryState {
    async fn transaction(&self, code: &TransactionCode) -> Result<Option<TrxRecord>> {
        Ok(self.transactions.read().await.get(code).cloned())
    }

    async fn set_peer_record(&self, peer: &MemberKey, record: &TrxRecord) -> Result<()> {
        self.peer_records.write().await.insert(
            (peer.clone(), record.transaction_code.clone()),
            record.clone(),
        );
        Ok(())
    }

    async fn peer_record(
        &self,
        peer: &MemberKey,
        code: &TransactionCode,
    ) -> Result<Option<TrxRecord>> {
        Ok(self
            .peer_records
            .read()
            .await
            .get(&(peer.clone(), code.clone()))
            .cloned())
    }

    async fn push_peer_record(&self, peer: &MemberKey, record: &TrxRecord) -> Result<()> {
        if self.our_key.as_ref() == Some(peer) {
            self.insert_transaction(record.clone()).await;
        } else {
            self.outbox
                .write()
                .await
                .push((peer.clone(), record.clone()));
        }
        Ok(())
    }

    async fn log_invalid(&self, record: &TrxRecord, error: &ProtocolError) -> Result<()> {
        self.invalid
            .write()
            .await
            .push((record.clone(), error.clone()));
        Ok(())
    }
}
