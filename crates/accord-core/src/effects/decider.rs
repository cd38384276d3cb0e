//! Decision capability: whether this node approves a promise or commit.

use crate::errors::Result;
use crate::types::TrxRecord;
use async_trait::async_trait;

/// Approval policy, supplied by the host.
///
/// The protocol turns a negative (or late) decision into a `nopromise` or
/// `nocommit` signature; declining is a signed statement, never an error.
#[async_trait]
pub trait DeciderEffects: Send + Sync {
    /// Whether this node approves promising on the record
    async fn should_promise(&self, record: &TrxRecord) -> Result<bool>;

    /// Whether this node approves committing the record
    async fn should_commit(&self, record: &TrxRecord) -> Result<bool>;
}
