//! Transaction topology: links, members, and the derived protocol views.

use crate::types::{Member, MemberKey};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A directed, anonymized adjacency between two member keys.
///
/// Links exist for gossip reach; they carry no votes or value themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// Key of the link's source member
    pub source_key: MemberKey,
    /// Key of the link's target member
    pub target_key: MemberKey,
    /// Anonymizing nonce
    pub nonce: String,
    /// Opaque link terms; not interpreted by the protocol
    pub terms: serde_json::Value,
}

impl Link {
    /// Create a link with empty terms
    pub fn new(
        source_key: impl Into<MemberKey>,
        target_key: impl Into<MemberKey>,
        nonce: impl Into<String>,
    ) -> Self {
        Self {
            source_key: source_key.into(),
            target_key: target_key.into(),
            nonce: nonce.into(),
            terms: serde_json::Value::Null,
        }
    }

    /// Set the opaque terms
    pub fn with_terms(mut self, terms: serde_json::Value) -> Self {
        self.terms = terms;
        self
    }

    /// The opposite endpoint, if `key` is one of this link's endpoints
    pub fn other_endpoint(&self, key: &MemberKey) -> Option<&MemberKey> {
        if &self.source_key == key {
            Some(&self.target_key)
        } else if &self.target_key == key {
            Some(&self.source_key)
        } else {
            None
        }
    }
}

/// The fixed member-and-link structure of one transaction.
///
/// Immutable for the life of the transaction: any topology change to an
/// in-flight transaction is a hard error. Members are keyed in a `BTreeMap`
/// so iteration and canonical serialization are deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Topology {
    /// Gossip adjacencies
    pub links: Vec<Link>,
    /// Members by key
    pub members: BTreeMap<MemberKey, Member>,
}

impl Topology {
    /// An empty topology
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member, keyed by its own key
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.insert(member.key.clone(), member);
        self
    }

    /// Add a link
    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    /// Keys of all members carrying the participant role
    pub fn participants(&self) -> BTreeSet<MemberKey> {
        self.members
            .values()
            .filter(|m| m.participant)
            .map(|m| m.key.clone())
            .collect()
    }

    /// Keys of all members carrying the referee role
    pub fn referees(&self) -> BTreeSet<MemberKey> {
        self.members
            .values()
            .filter(|m| m.referee)
            .map(|m| m.key.clone())
            .collect()
    }

    /// Gossip targets for a node: every directly addressable member, plus the
    /// other endpoint of every link incident to `our_key`. Deduplicated.
    pub fn reachable_peers(&self, our_key: &MemberKey) -> Vec<MemberKey> {
        let mut peers: BTreeSet<MemberKey> = self
            .members
            .values()
            .filter(|m| m.is_directly_addressable())
            .map(|m| m.key.clone())
            .collect();
        for link in &self.links {
            if let Some(other) = link.other_endpoint(our_key) {
                peers.insert(other.clone());
            }
        }
        peers.into_iter().collect()
    }
}
