//! The participant driver: the single entry point a host wires transport to.

use crate::state::evaluate_record_state;
use crate::validate::merge_records;
use accord_core::effects::{ClockEffects, DeciderEffects, SignerEffects, StateEffects};
use accord_core::{
    commit_digest, promise_digest, MemberKey, ProtocolConfig, RecordSignature, Result,
    SignatureType, TrxRecord,
};
use futures::future::join_all;

/// Per-node protocol driver.
///
/// Owns nothing but its capabilities and configuration; every `update` call
/// is self-contained and the storage capability is the serialization point
/// for concurrent updates to the same transaction.
pub struct TrxParticipant<S, St, D, C> {
    signer: S,
    state: St,
    decider: D,
    clock: C,
    config: ProtocolConfig,
}

impl<S, St, D, C> TrxParticipant<S, St, D, C>
where
    S: SignerEffects,
    St: StateEffects,
    D: DeciderEffects,
    C: ClockEffects,
{
    /// Assemble a driver from its capabilities
    pub fn new(signer: S, state: St, decider: D, clock: C, config: ProtocolConfig) -> Self {
        Self {
            signer,
            state,
            decider,
            clock,
            config,
        }
    }

    /// The active configuration
    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    /// Process a record received from a peer (or injected by the host).
    ///
    /// Validates against the stored prior, merges signature sets, signs this
    /// node's promise or commit when the record calls for one, and gossips
    /// the result to reachable peers with a stale or missing copy. Returns
    /// the final merged record; persisting the node's own copy is the host's
    /// concern.
    ///
    /// Protocol violations are logged once to the invalid sink and re-raised;
    /// capability errors propagate unchanged. Nothing is gossiped on failure.
    pub async fn update(
        &self,
        record: &TrxRecord,
        from_key: Option<&MemberKey>,
    ) -> Result<TrxRecord> {
        if let Some(peer) = from_key {
            self.state.set_peer_record(peer, record).await?;
        }
        let prior = self.state.transaction(&record.transaction_code).await?;
        let now_ms = self.clock.now_ms().await;

        let merged = match self.advance(prior.as_ref(), record, now_ms).await {
            Ok(merged) => merged,
            Err(err) => {
                if err.is_protocol_violation() {
                    tracing::warn!(
                        transaction = %record.transaction_code,
                        %err,
                        "rejecting invalid record"
                    );
                    self.state.log_invalid(record, &err).await?;
                }
                return Err(err);
            }
        };

        self.gossip(&merged).await?;
        Ok(merged)
    }

    /// Merge, evaluate, and append this node's signatures as required.
    ///
    /// A promise append can complete the promise set, so the state is
    /// re-evaluated afterwards: a node that is both participant and referee
    /// promises and commits in the same update.
    async fn advance(
        &self,
        prior: Option<&TrxRecord>,
        incoming: &TrxRecord,
        now_ms: u64,
    ) -> Result<TrxRecord> {
        let mut merged = merge_records(prior, incoming, now_ms, &self.config)?;
        let mut state = evaluate_record_state(&merged, &self.signer).await?;

        if state.our_promise_needed() {
            merged = self.append_promise(merged, now_ms).await?;
            state = evaluate_record_state(&merged, &self.signer).await?;
        }
        if state.our_commit_needed() {
            merged = self.append_commit(merged, now_ms).await?;
        }
        Ok(merged)
    }

    async fn append_promise(&self, record: TrxRecord, now_ms: u64) -> Result<TrxRecord> {
        let approved = self.decider.should_promise(&record).await?
            && self
                .config
                .timing
                .promise_rule
                .satisfied(now_ms, record.promises_due);
        let sig_type = SignatureType::promise_kind(approved);
        let digest = promise_digest(&record, &[sig_type.to_string()])?;
        let value = self.signer.sign(&record.session_code, &digest).await?;
        let our_key = self.signer.our_key(&record.session_code).await?;
        tracing::debug!(
            transaction = %record.transaction_code,
            key = %our_key,
            approved,
            "appending promise"
        );
        Ok(record.with_promise(RecordSignature::new(sig_type, our_key, value)))
    }

    async fn append_commit(&self, record: TrxRecord, now_ms: u64) -> Result<TrxRecord> {
        let approved = self.decider.should_commit(&record).await?
            && self
                .config
                .timing
                .commit_rule
                .satisfied(now_ms, record.commits_due);
        let sig_type = SignatureType::commit_kind(approved);
        let digest = commit_digest(&record, &[sig_type.to_string()])?;
        let value = self.signer.sign(&record.session_code, &digest).await?;
        let our_key = self.signer.our_key(&record.session_code).await?;
        tracing::debug!(
            transaction = %record.transaction_code,
            key = %our_key,
            approved,
            "appending commit"
        );
        Ok(record.with_commit(RecordSignature::new(sig_type, our_key, value)))
    }

    /// Push the record to every reachable peer with an absent or stale copy.
    ///
    /// Pushes run concurrently; the first failure propagates only after all
    /// have settled, so one dead peer does not starve the rest.
    async fn gossip(&self, record: &TrxRecord) -> Result<()> {
        let our_key = self.signer.our_key(&record.session_code).await?;
        let peers = record.topology.reachable_peers(&our_key);
        let pushes = peers.iter().map(|peer| self.push_if_stale(peer, record));
        let results = join_all(pushes).await;
        for result in results {
            result?;
        }
        Ok(())
    }

    async fn push_if_stale(&self, peer: &MemberKey, record: &TrxRecord) -> Result<()> {
        let known = self
            .state
            .peer_record(peer, &record.transaction_code)
            .await?;
        let stale = match known {
            None => true,
            Some(known) => record.is_newer_than(&known),
        };
        if stale {
            tracing::debug!(
                transaction = %record.transaction_code,
                peer = %peer,
                "pushing record"
            );
            self.state.push_peer_record(peer, record).await?;
        }
        Ok(())
    }
}
