//! Record validation and merging.

use accord_core::types::merge_signatures;
use accord_core::{ProtocolConfig, ProtocolError, Result, TrxRecord};

/// Validate a record seen for the first time (no stored prior).
///
/// Both codes must pass the configured randomness check, the start time must
/// not be in the future, and the promise window must be at least the
/// configured minimum.
pub fn validate_new(record: &TrxRecord, now_ms: u64, config: &ProtocolConfig) -> Result<()> {
    if !config.codes.check(record.transaction_code.as_str()) {
        return Err(ProtocolError::CodeEntropyTooLow {
            field: "transactionCode".into(),
        });
    }
    if !config.codes.check(record.session_code.as_str()) {
        return Err(ProtocolError::CodeEntropyTooLow {
            field: "sessionCode".into(),
        });
    }
    if record.start > now_ms {
        return Err(ProtocolError::temporal(format!(
            "start {} is after now {}",
            record.start, now_ms
        )));
    }
    let earliest_due = record.start + config.timing.min_promise_time_ms;
    if record.promises_due < earliest_due {
        return Err(ProtocolError::temporal(format!(
            "promisesDue {} is before start + minPromiseTime {}",
            record.promises_due, earliest_due
        )));
    }
    Ok(())
}

/// Validate an update against the stored prior.
///
/// Every field outside the two signature sets is immutable for the life of
/// the transaction; the first mismatch is fatal.
pub fn validate_update(prior: &TrxRecord, incoming: &TrxRecord) -> Result<()> {
    if prior.transaction_code != incoming.transaction_code {
        return Err(ProtocolError::field_mismatch("transactionCode"));
    }
    if prior.session_code != incoming.session_code {
        return Err(ProtocolError::field_mismatch("sessionCode"));
    }
    if prior.payload != incoming.payload {
        return Err(ProtocolError::field_mismatch("payload"));
    }
    if prior.topology != incoming.topology {
        return Err(ProtocolError::field_mismatch("topology"));
    }
    if prior.start != incoming.start {
        return Err(ProtocolError::field_mismatch("start"));
    }
    if prior.promises_due != incoming.promises_due {
        return Err(ProtocolError::field_mismatch("promisesDue"));
    }
    if prior.commits_due != incoming.commits_due {
        return Err(ProtocolError::field_mismatch("commitsDue"));
    }
    Ok(())
}

/// Merge an incoming record with the stored prior, if any.
///
/// With no prior the incoming record is taken as-is (after `validate_new`);
/// otherwise the result carries the common immutable fields and the
/// signature-set union of both sides.
pub fn merge_records(
    prior: Option<&TrxRecord>,
    incoming: &TrxRecord,
    now_ms: u64,
    config: &ProtocolConfig,
) -> Result<TrxRecord> {
    let Some(prior) = prior else {
        validate_new(incoming, now_ms, config)?;
        return Ok(incoming.clone());
    };
    validate_update(prior, incoming)?;
    let mut merged = prior.clone();
    merged.promises = merge_signatures(&prior.promises, &incoming.promises)?;
    merged.commits = merge_signatures(&prior.commits, &incoming.commits)?;
    Ok(merged)
}
