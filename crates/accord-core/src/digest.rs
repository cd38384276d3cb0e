//! Deterministic record digests.
//!
//! Both digests are a base64-encoded SHA-256 over the UTF-8 concatenation of
//! the record's identifying fields in a fixed order: transaction code,
//! session code, canonical JSON of the payload, canonical JSON of the
//! topology, then the three deadlines as decimal strings, then any extra
//! data. The commit digest additionally binds the canonical JSON of every
//! stored promise signature, in stored order, ahead of the caller's extras,
//! so a commit signature pins the exact promise set it voted over.

use crate::canonical::to_canonical_json;
use crate::encoding::ToBase64;
use crate::errors::Result;
use crate::types::TrxRecord;
use sha2::{Digest, Sha256};

fn base_digest<I>(record: &TrxRecord, additional: I) -> Result<String>
where
    I: IntoIterator<Item = String>,
{
    let mut hasher = Sha256::new();
    hasher.update(record.transaction_code.as_str().as_bytes());
    hasher.update(record.session_code.as_str().as_bytes());
    hasher.update(to_canonical_json(&record.payload)?.as_bytes());
    hasher.update(to_canonical_json(&record.topology)?.as_bytes());
    hasher.update(record.start.to_string().as_bytes());
    hasher.update(record.promises_due.to_string().as_bytes());
    hasher.update(record.commits_due.to_string().as_bytes());
    for datum in additional {
        hasher.update(datum.as_bytes());
    }
    Ok(hasher.finalize().as_slice().to_base64())
}

/// The digest a participant signs (or verifies) for a promise.
///
/// `extras` is the signature type's decimal string when producing or checking
/// a concrete signature, empty when a caller only needs the base form.
pub fn promise_digest(record: &TrxRecord, extras: &[String]) -> Result<String> {
    base_digest(record, extras.iter().cloned())
}

/// The digest a referee signs (or verifies) for a commit.
///
/// Binds every stored promise signature, in stored order, before `extras`.
pub fn commit_digest(record: &TrxRecord, extras: &[String]) -> Result<String> {
    let mut additional = Vec::with_capacity(record.promises.len() + extras.len());
    for promise in &record.promises {
        additional.push(to_canonical_json(promise)?);
    }
    additional.extend(extras.iter().cloned());
    base_digest(record, additional)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        Member, RecordSignature, SignatureType, Topology, TrxRecordBuilder,
    };
    use serde_json::json;

    fn demo_record() -> TrxRecord {
        TrxRecordBuilder::new("trx-digest", "sess-digest")
            .payload(json!({"b": 2, "a": 1}))
            .topology(
                Topology::new()
                    .with_member(Member::new("ka").as_participant())
                    .with_member(Member::new("kb").as_referee()),
            )
            .schedule(1_000, 61_000, 120_000)
            .build()
    }

    #[test]
    fn digest_is_deterministic() {
        let a = promise_digest(&demo_record(), &[]).unwrap();
        let b = promise_digest(&demo_record(), &[]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn payload_key_order_does_not_matter() {
        let mut reordered = demo_record();
        reordered.payload = json!({"a": 1, "b": 2});
        assert_eq!(
            promise_digest(&demo_record(), &[]).unwrap(),
            promise_digest(&reordered, &[]).unwrap()
        );
    }

    #[test]
    fn extras_change_the_digest() {
        let bare = promise_digest(&demo_record(), &[]).unwrap();
        let typed =
            promise_digest(&demo_record(), &[SignatureType::Promise.to_string()]).unwrap();
        assert_ne!(bare, typed);
        // And the two signature signs produce distinct digests.
        let declined =
            promise_digest(&demo_record(), &[SignatureType::NoPromise.to_string()]).unwrap();
        assert_ne!(typed, declined);
    }

    #[test]
    fn any_field_changes_the_digest() {
        let base = promise_digest(&demo_record(), &[]).unwrap();

        let mut other = demo_record();
        other.payload = json!({"a": 1, "b": 3});
        assert_ne!(base, promise_digest(&other, &[]).unwrap());

        let mut other = demo_record();
        other.commits_due = 120_001;
        assert_ne!(base, promise_digest(&other, &[]).unwrap());
    }

    #[test]
    fn commit_digest_binds_promise_order() {
        let record = demo_record();
        let one = record.with_promise(RecordSignature::new(SignatureType::Promise, "ka", "va"));
        let two = one.with_promise(RecordSignature::new(SignatureType::Promise, "kb", "vb"));

        let mut swapped = two.clone();
        swapped.promises.reverse();

        assert_ne!(
            commit_digest(&two, &[]).unwrap(),
            commit_digest(&swapped, &[]).unwrap()
        );
        assert_ne!(
            commit_digest(&one, &[]).unwrap(),
            commit_digest(&two, &[]).unwrap()
        );
    }

    #[test]
    fn commit_digest_without_promises_matches_base() {
        let record = demo_record();
        assert_eq!(
            commit_digest(&record, &[]).unwrap(),
            promise_digest(&record, &[]).unwrap()
        );
    }

    #[test]
    fn output_is_base64_sha256() {
        let digest = promise_digest(&demo_record(), &[]).unwrap();
        // 32 bytes -> 44 base64 chars with padding.
        assert_eq!(digest.len(), 44);
        assert!(digest.ends_with('='));
    }
}
