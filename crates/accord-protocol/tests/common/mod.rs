//! Shared fixtures: deterministic nodes wired over in-memory effects.
#![allow(dead_code)]

use accord_core::{
    Member, MemberEndpoint, MemberKey, ProtocolConfig, SessionCode, Topology, TrxRecord,
    TrxRecordBuilder,
};
use accord_effects::{Ed25519Signer, MemoryState, SimulatedClock, StaticDecider};
use accord_protocol::TrxParticipant;
use serde_json::json;

/// High-entropy codes that pass the default randomness check.
pub const TRX_CODE: &str = "f3a9c1e7b2d8046a5c1e9f7300b6d842";
pub const SESSION_CODE: &str = "8c2e5a19d7f4b3062e9a1c8d55f0e7b4";

pub const START_MS: u64 = 1_000;
pub const PROMISES_DUE_MS: u64 = 61_000;
pub const COMMITS_DUE_MS: u64 = 120_000;

pub type MemoryParticipant = TrxParticipant<Ed25519Signer, MemoryState, StaticDecider, SimulatedClock>;

/// One node with handles kept for assertions.
pub struct TestNode {
    pub key: MemberKey,
    pub signer: Ed25519Signer,
    pub state: MemoryState,
    pub driver: MemoryParticipant,
}

impl TestNode {
    /// A node with its own signer seed, sharing the harness clock.
    pub fn new(seed: u8, decider: StaticDecider, clock: &SimulatedClock) -> Self {
        Self::with_config(seed, decider, clock, ProtocolConfig::default())
    }

    pub fn with_config(
        seed: u8,
        decider: StaticDecider,
        clock: &SimulatedClock,
        config: ProtocolConfig,
    ) -> Self {
        let signer = Ed25519Signer::new([seed; 32]);
        let key = signer.public_key(&SessionCode::new(SESSION_CODE));
        let state = MemoryState::for_node(key.clone());
        let driver = TrxParticipant::new(
            signer.clone(),
            state.clone(),
            decider,
            clock.clone(),
            config,
        );
        Self {
            key,
            signer,
            state,
            driver,
        }
    }

    /// A participant-role member entry for this node, directly addressable.
    pub fn participant_member(&self, name: &str) -> Member {
        Member::new(self.key.clone())
            .as_participant()
            .with_endpoint(MemberEndpoint::direct(name, format!("{name}.test:9000")))
    }

    /// A referee-role member entry for this node, directly addressable.
    pub fn referee_member(&self, name: &str) -> Member {
        Member::new(self.key.clone())
            .as_referee()
            .with_endpoint(MemberEndpoint::direct(name, format!("{name}.test:9000")))
    }

    /// Deliver every record pushed to `peer` from this node's outbox.
    pub async fn pushes_to(&self, peer: &MemberKey) -> Vec<TrxRecord> {
        self.state
            .drain_outbox()
            .await
            .into_iter()
            .filter(|(to, _)| to == peer)
            .map(|(_, record)| record)
            .collect()
    }
}

/// A bare record over the given topology with the standard schedule.
pub fn bare_record(topology: Topology) -> TrxRecord {
    TrxRecordBuilder::new(TRX_CODE, SESSION_CODE)
        .payload(json!({"agreement": "exchange", "amount": 25}))
        .topology(topology)
        .schedule(START_MS, PROMISES_DUE_MS, COMMITS_DUE_MS)
        .build()
}
