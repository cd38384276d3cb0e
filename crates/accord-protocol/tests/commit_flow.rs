//! End-to-end promise/commit flows over in-memory effects.

mod common;

use accord_core::effects::StateEffects;
use accord_core::{DeadlineRule, ProtocolConfig, SignatureType, Topology};
use accord_effects::{SimulatedClock, StaticDecider};
use accord_protocol::{evaluate_record_state, RecordState};
use common::{bare_record, TestNode, COMMITS_DUE_MS, PROMISES_DUE_MS};

/// Config for flows that promise and commit inside one window: commits are
/// approved up to their deadline instead of after it.
fn fast_commit_config() -> ProtocolConfig {
    let mut config = ProtocolConfig::default();
    config.timing.commit_rule = DeadlineRule::BeforeDeadline;
    config
}

#[tokio::test]
async fn two_participants_one_referee_commit_in_one_pass() {
    let clock = SimulatedClock::at(5_000);
    let p1 = TestNode::with_config(1, StaticDecider::approve_all(), &clock, fast_commit_config());
    let p2 = TestNode::with_config(2, StaticDecider::approve_all(), &clock, fast_commit_config());

    // P1 is participant and referee; P2 is a plain participant.
    let topology = Topology::new()
        .with_member(p1.participant_member("p1").as_referee())
        .with_member(p2.participant_member("p2"));
    let record = bare_record(topology);

    // Originator hands the bare record to P2.
    let after_p2 = p2.driver.update(&record, None).await.unwrap();
    assert_eq!(after_p2.promises.len(), 1);
    assert_eq!(after_p2.promises[0].sig_type, SignatureType::Promise);
    assert_eq!(after_p2.promises[0].key, p2.key);
    assert!(after_p2.commits.is_empty());

    // P2 persisted its own copy (self is directly addressable) and pushed P1.
    let stored = p2
        .state
        .transaction(&record.transaction_code)
        .await
        .unwrap();
    assert_eq!(stored, Some(after_p2.clone()));
    let pushed = p2.pushes_to(&p1.key).await;
    assert_eq!(pushed, vec![after_p2.clone()]);

    // P1 promises and, being the only referee, commits in the same update.
    let after_p1 = p1.driver.update(&after_p2, Some(&p2.key)).await.unwrap();
    assert_eq!(after_p1.promises.len(), 2);
    assert_eq!(after_p1.commits.len(), 1);
    assert_eq!(after_p1.commits[0].sig_type, SignatureType::Commit);
    assert_eq!(after_p1.commits[0].key, p1.key);

    let state = evaluate_record_state(&after_p1, &p1.signer).await.unwrap();
    assert_eq!(
        state,
        RecordState::Promised {
            our_commit_needed: false,
            consensus_committed: true,
            fully_committed: true,
        }
    );

    // The committed record flows back to P2 and settles.
    let settled = p2.driver.update(&after_p1, Some(&p1.key)).await.unwrap();
    assert_eq!(settled, after_p1);
    let stored = p2
        .state
        .transaction(&record.transaction_code)
        .await
        .unwrap();
    assert_eq!(stored, Some(after_p1));
}

#[tokio::test]
async fn referee_majority_reaches_consensus_before_full_commit() {
    let clock = SimulatedClock::at(5_000);
    let config = fast_commit_config;
    let a = TestNode::with_config(1, StaticDecider::approve_all(), &clock, config());
    let b = TestNode::with_config(2, StaticDecider::approve_all(), &clock, config());
    let r1 = TestNode::with_config(3, StaticDecider::approve_all(), &clock, config());
    let r2 = TestNode::with_config(4, StaticDecider::approve_all(), &clock, config());
    let r3 = TestNode::with_config(5, StaticDecider::approve_all(), &clock, config());

    let topology = Topology::new()
        .with_member(a.participant_member("a"))
        .with_member(b.participant_member("b"))
        .with_member(r1.referee_member("r1"))
        .with_member(r2.referee_member("r2"))
        .with_member(r3.referee_member("r3"));
    let record = bare_record(topology);

    let record = a.driver.update(&record, None).await.unwrap();
    let record = b.driver.update(&record, Some(&a.key)).await.unwrap();
    assert_eq!(record.promises.len(), 2);
    assert!(record.commits.is_empty());
    let state = evaluate_record_state(&record, &b.signer).await.unwrap();
    assert!(state.fully_promised());
    assert!(!state.consensus_committed());

    // One commit of three referees: no consensus yet.
    let record = r1.driver.update(&record, Some(&b.key)).await.unwrap();
    assert_eq!(record.commits.len(), 1);
    let state = evaluate_record_state(&record, &r1.signer).await.unwrap();
    assert!(!state.consensus_committed());
    assert!(!state.fully_committed());

    // Two of three: ⌈3/2⌉ = 2, consensus reached, not yet full.
    let record = r2.driver.update(&record, Some(&r1.key)).await.unwrap();
    assert_eq!(record.commits.len(), 2);
    let state = evaluate_record_state(&record, &r2.signer).await.unwrap();
    assert!(state.consensus_committed());
    assert!(!state.fully_committed());

    // All three: fully committed.
    let record = r3.driver.update(&record, Some(&r2.key)).await.unwrap();
    assert_eq!(record.commits.len(), 3);
    let state = evaluate_record_state(&record, &r3.signer).await.unwrap();
    assert!(state.consensus_committed());
    assert!(state.fully_committed());
}

#[tokio::test]
async fn missed_deadlines_downgrade_to_negative_signatures() {
    // Default timing: promises approved up to their deadline, commits only
    // after theirs.
    let clock = SimulatedClock::at(5_000);
    let a = TestNode::new(1, StaticDecider::approve_all(), &clock);
    let b = TestNode::new(2, StaticDecider::approve_all(), &clock);
    let r1 = TestNode::new(3, StaticDecider::approve_all(), &clock);
    let r2 = TestNode::new(4, StaticDecider::approve_all(), &clock);

    let topology = Topology::new()
        .with_member(a.participant_member("a"))
        .with_member(b.participant_member("b"))
        .with_member(r1.referee_member("r1"))
        .with_member(r2.referee_member("r2"));
    let record = bare_record(topology);

    // A promises inside the window.
    let record = a.driver.update(&record, None).await.unwrap();
    assert_eq!(record.promises[0].sig_type, SignatureType::Promise);

    // B only sees the record after the promise deadline: it still signs, but
    // negatively, and the record still becomes fully promised.
    clock.set(PROMISES_DUE_MS + 1);
    let record = b.driver.update(&record, Some(&a.key)).await.unwrap();
    assert_eq!(record.promises.len(), 2);
    assert_eq!(record.promises[1].sig_type, SignatureType::NoPromise);
    let state = evaluate_record_state(&record, &b.signer).await.unwrap();
    assert!(state.fully_promised());

    // R2 votes before the commit deadline: under the after-deadline rule that
    // is a negative commit.
    let record = r2.driver.update(&record, Some(&b.key)).await.unwrap();
    assert_eq!(record.commits[0].sig_type, SignatureType::NoCommit);

    // Two referees, so one vote is already a majority.
    let state = evaluate_record_state(&record, &r2.signer).await.unwrap();
    assert!(state.consensus_committed());
    assert!(!state.fully_committed());

    // R1 votes after the deadline: affirmative, and the record is settled.
    clock.set(COMMITS_DUE_MS);
    let record = r1.driver.update(&record, Some(&r2.key)).await.unwrap();
    assert_eq!(record.commits.len(), 2);
    assert_eq!(record.commits[1].sig_type, SignatureType::Commit);
    let state = evaluate_record_state(&record, &r1.signer).await.unwrap();
    assert!(state.fully_committed());
}

#[tokio::test]
async fn update_is_idempotent_and_signatures_are_monotonic() {
    let clock = SimulatedClock::at(5_000);
    let p1 = TestNode::new(1, StaticDecider::approve_all(), &clock);
    let p2 = TestNode::new(2, StaticDecider::approve_all(), &clock);

    let topology = Topology::new()
        .with_member(p1.participant_member("p1"))
        .with_member(p2.participant_member("p2"));
    let record = bare_record(topology);

    let first = p2.driver.update(&record, None).await.unwrap();
    let stored_first = p2
        .state
        .transaction(&record.transaction_code)
        .await
        .unwrap();

    // Replaying the original bare record changes nothing: the stored merge
    // already covers it and our promise is already present.
    let second = p2.driver.update(&record, None).await.unwrap();
    let stored_second = p2
        .state
        .transaction(&record.transaction_code)
        .await
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(stored_first, stored_second);

    // Replaying our own merged record is equally idempotent.
    let third = p2.driver.update(&first, None).await.unwrap();
    assert_eq!(first, third);

    // Signature counts never regress, even when a peer re-sends the bare
    // record with no signatures at all.
    assert_eq!(second.promises.len(), 1);
    assert!(second.promises.len() >= record.promises.len());
}
