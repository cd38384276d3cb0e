//! Member identity, roles, and addressing.

use crate::types::MemberKey;
use serde::{Deserialize, Serialize};

/// How a member can be reached for gossip.
///
/// Every member carries a logical name; only members with a physical address
/// are directly addressable. Members without one are reachable solely through
/// topology links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberEndpoint {
    /// Logical name of the member
    pub logical: String,
    /// Physical network address, when directly addressable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical: Option<String>,
}

impl MemberEndpoint {
    /// A logical-only endpoint
    pub fn logical(name: impl Into<String>) -> Self {
        Self {
            logical: name.into(),
            physical: None,
        }
    }

    /// An endpoint with a physical address
    pub fn direct(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            logical: name.into(),
            physical: Some(address.into()),
        }
    }

    /// Whether this endpoint carries a physical address
    pub fn is_direct(&self) -> bool {
        self.physical.is_some()
    }
}

/// A node in a transaction topology, identified by its public key.
///
/// Roles are a flag set: a member may be a participant, a referee, both, or
/// neither (a bare relay). Any member may forward gossip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Public key identifying this member
    pub key: MemberKey,
    /// Addressing, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<MemberEndpoint>,
    /// Opaque agent-local secret; not interpreted by the protocol
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_secret: Option<String>,
    /// Whether this member's promise is required
    #[serde(default)]
    pub participant: bool,
    /// Whether this member's commit vote counts toward consensus
    #[serde(default)]
    pub referee: bool,
}

impl Member {
    /// Create a bare relay member with no roles
    pub fn new(key: impl Into<MemberKey>) -> Self {
        Self {
            key: key.into(),
            endpoint: None,
            agent_secret: None,
            participant: false,
            referee: false,
        }
    }

    /// Set the endpoint
    pub fn with_endpoint(mut self, endpoint: MemberEndpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Set the opaque agent secret
    pub fn with_agent_secret(mut self, secret: impl Into<String>) -> Self {
        self.agent_secret = Some(secret.into());
        self
    }

    /// Grant the participant role
    pub fn as_participant(mut self) -> Self {
        self.participant = true;
        self
    }

    /// Grant the referee role
    pub fn as_referee(mut self) -> Self {
        self.referee = true;
        self
    }

    /// Whether this member can be pushed to without a link
    pub fn is_directly_addressable(&self) -> bool {
        self.endpoint.as_ref().is_some_and(MemberEndpoint::is_direct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_default_to_relay() {
        let member = Member::new("k1");
        assert!(!member.participant);
        assert!(!member.referee);
        assert!(!member.is_directly_addressable());
    }

    #[test]
    fn direct_addressability_requires_physical() {
        let logical = Member::new("k1").with_endpoint(MemberEndpoint::logical("node-a"));
        assert!(!logical.is_directly_addressable());

        let direct =
            Member::new("k1").with_endpoint(MemberEndpoint::direct("node-a", "10.0.0.1:9000"));
        assert!(direct.is_directly_addressable());
    }

    #[test]
    fn wire_names_are_camel_case() {
        let member = Member::new("k1").as_participant().with_agent_secret("s");
        let json = serde_json::to_value(&member).unwrap();
        assert_eq!(json["agentSecret"], "s");
        assert_eq!(json["participant"], true);
        assert_eq!(json["referee"], false);
    }
}
