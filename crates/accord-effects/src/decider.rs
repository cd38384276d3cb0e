//! Approval policy handlers.

use accord_core::effects::DeciderEffects;
use accord_core::{Result, TrxRecord};
use async_trait::async_trait;

/// A decider with fixed answers.
#[derive(Debug, Clone, Copy)]
pub struct StaticDecider {
    promise: bool,
    commit: bool,
}

impl StaticDecider {
    /// Fixed answers for each phase
    pub fn new(promise: bool, commit: bool) -> Self {
        Self { promise, commit }
    }

    /// Approve everything
    pub fn approve_all() -> Self {
        Self::new(true, true)
    }

    /// Decline everything
    pub fn reject_all() -> Self {
        Self::new(false, false)
    }
}

#[async_trait]
impl DeciderEffects for StaticDecider {
    async fn should_promise(&self, _record: &TrxRecord) -> Result<bool> {
        Ok(self.promise)
    }

    async fn should_commit(&self, _record: &TrxRecord) -> Result<bool> {
        Ok(self.commit)
    }
}

/// A decider driven by host closures over the record.
pub struct FnDecider {
    promise: Box<dyn Fn(&TrxRecord) -> bool + Send + Sync>,
    commit: Box<dyn Fn(&TrxRecord) -> bool + Send + Sync>,
}

impl FnDecider {
    /// Build from one closure per phase
    pub fn new(
        promise: impl Fn(&TrxRecord) -> bool + Send + Sync + 'static,
        commit: impl Fn(&TrxRecord) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            promise: Box::new(promise),
            commit: Box::new(commit),
        }
    }
}

#[async_trait]
impl DeciderEffects for FnDecider {
    async fn should_promise(&self, record: &TrxRecord) -> Result<bool> {
        Ok((self.promise)(record))
    }

    async fn should_commit(&self, record: &TrxRecord) -> Result<bool> {
        Ok((self.commit)(record))
    }
}
