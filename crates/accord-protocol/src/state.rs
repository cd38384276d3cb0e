//! Role evaluation: what this node must do next for a record.

use accord_core::effects::SignerEffects;
use accord_core::{
    commit_digest, promise_digest, MemberKey, ProtocolError, RecordSignature, Result,
    SignatureType, TrxRecord,
};
use std::collections::{BTreeSet, HashMap};

/// Where a record stands from this node's point of view.
///
/// Evaluation is fatal on any invariant break; a returned state means the
/// record is internally consistent and every signature verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// This node is a participant and has not promised yet
    PromiseNeeded,
    /// Other participants still owe promises; nothing for this node to sign
    AwaitingPromises,
    /// Every participant has signed a promise
    Promised {
        /// This node is a referee and has not committed yet
        our_commit_needed: bool,
        /// At least ⌈|referees|/2⌉ referees have committed
        consensus_committed: bool,
        /// Every referee has committed
        fully_committed: bool,
    },
}

impl RecordState {
    /// Whether this node owes a promise
    pub fn our_promise_needed(&self) -> bool {
        matches!(self, Self::PromiseNeeded)
    }

    /// Whether every participant has signed a promise
    pub fn fully_promised(&self) -> bool {
        matches!(self, Self::Promised { .. })
    }

    /// Whether this node owes a commit
    pub fn our_commit_needed(&self) -> bool {
        matches!(
            self,
            Self::Promised {
                our_commit_needed: true,
                ..
            }
        )
    }

    /// Whether a referee majority has committed
    pub fn consensus_committed(&self) -> bool {
        matches!(
            self,
            Self::Promised {
                consensus_committed: true,
                ..
            }
        )
    }

    /// Whether every referee has committed
    pub fn fully_committed(&self) -> bool {
        matches!(
            self,
            Self::Promised {
                fully_committed: true,
                ..
            }
        )
    }
}

/// Check a signature set for duplicate keys and role membership, in order.
fn check_signature_set(
    signatures: &[RecordSignature],
    allowed: &BTreeSet<MemberKey>,
    role: &str,
) -> Result<()> {
    let mut seen: BTreeSet<&MemberKey> = BTreeSet::new();
    for entry in signatures {
        if !seen.insert(&entry.key) {
            return Err(ProtocolError::DuplicateSignature {
                key: entry.key.clone(),
            });
        }
        if !allowed.contains(&entry.key) {
            return Err(ProtocolError::UnknownSigner {
                key: entry.key.clone(),
                role: role.into(),
            });
        }
    }
    Ok(())
}

/// Verify every signature in a set against its type-bound digest.
///
/// The signing side binds the signature type's decimal string into the
/// digest, so verification recomputes the digest per type present (memoized,
/// since a set holds at most two types).
async fn verify_signature_set<S, F>(
    signer: &S,
    signatures: &[RecordSignature],
    mut digest_for: F,
) -> Result<()>
where
    S: SignerEffects + ?Sized,
    F: FnMut(SignatureType) -> Result<String>,
{
    let mut digests: HashMap<SignatureType, String> = HashMap::new();
    for entry in signatures {
        let digest = match digests.get(&entry.sig_type) {
            Some(d) => d.clone(),
            None => {
                let d = digest_for(entry.sig_type)?;
                digests.insert(entry.sig_type, d.clone());
                d
            }
        };
        if !signer.verify(&entry.key, &digest, &entry.value).await? {
            return Err(ProtocolError::BadSignature {
                key: entry.key.clone(),
            });
        }
    }
    Ok(())
}

/// Compute the record's state from this node's point of view.
///
/// Checks run in a fixed order and any failure aborts the update: promise
/// set legality and signature verification first, then (only once every
/// participant has promised) commit set legality and commit signature
/// verification. Commits present in any earlier phase are out-of-phase.
pub async fn evaluate_record_state<S>(record: &TrxRecord, signer: &S) -> Result<RecordState>
where
    S: SignerEffects + ?Sized,
{
    let participants = record.topology.participants();
    let referees = record.topology.referees();

    check_signature_set(&record.promises, &participants, "participant")?;
    verify_signature_set(signer, &record.promises, |sig_type| {
        promise_digest(record, &[sig_type.to_string()])
    })
    .await?;

    let our_key = signer.our_key(&record.session_code).await?;

    let our_promise_needed =
        participants.contains(&our_key) && !record.has_promise_from(&our_key);
    if our_promise_needed {
        if !record.commits.is_empty() {
            return Err(ProtocolError::OutOfPhaseCommit);
        }
        return Ok(RecordState::PromiseNeeded);
    }

    if !record.covers_participants(&participants) {
        if !record.commits.is_empty() {
            return Err(ProtocolError::OutOfPhaseCommit);
        }
        return Ok(RecordState::AwaitingPromises);
    }

    check_signature_set(&record.commits, &referees, "referee")?;
    verify_signature_set(signer, &record.commits, |sig_type| {
        commit_digest(record, &[sig_type.to_string()])
    })
    .await?;

    let our_commit_needed = referees.contains(&our_key) && !record.has_commit_from(&our_key);
    let consensus_committed = record.commits.len() >= referees.len().div_ceil(2);
    let fully_committed = record.commits.len() == referees.len();

    Ok(RecordState::Promised {
        our_commit_needed,
        consensus_committed,
        fully_committed,
    })
}
