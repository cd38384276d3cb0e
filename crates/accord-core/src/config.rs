//! Protocol configuration: code randomness requirements and timing policy.

use serde::{Deserialize, Serialize};

/// Randomness requirements for transaction and session codes.
///
/// Codes are host-generated; the protocol only refuses codes that are too
/// short or too predictable to serve as globally unique identifiers. The
/// estimate is Shannon entropy over the code's bytes times its length, so a
/// repeated-character code scores near zero however long it is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeOptions {
    /// Minimum code length in bytes
    pub min_length: usize,
    /// Minimum total Shannon entropy in bits
    pub min_entropy_bits: f64,
}

impl Default for CodeOptions {
    fn default() -> Self {
        Self {
            min_length: 16,
            min_entropy_bits: 64.0,
        }
    }
}

impl CodeOptions {
    /// Check a code against the configured randomness requirements.
    pub fn check(&self, code: &str) -> bool {
        code.len() >= self.min_length && shannon_entropy_bits(code.as_bytes()) >= self.min_entropy_bits
    }
}

/// Total Shannon entropy of a byte string in bits (per-symbol entropy of the
/// observed byte distribution, times the length).
fn shannon_entropy_bits(bytes: &[u8]) -> f64 {
    if bytes.is_empty() {
        return 0.0;
    }
    let mut counts = [0usize; 256];
    for b in bytes {
        counts[*b as usize] += 1;
    }
    let len = bytes.len() as f64;
    let per_symbol: f64 = counts
        .iter()
        .filter(|c| **c > 0)
        .map(|c| {
            let p = *c as f64 / len;
            -p * p.log2()
        })
        .sum();
    per_symbol * len
}

/// Which side of a deadline counts as approval for a signing phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeadlineRule {
    /// Approve only while the deadline has not passed (hard cut-off)
    BeforeDeadline,
    /// Approve only once the deadline has passed (assembly window)
    AfterDeadline,
}

impl DeadlineRule {
    /// Whether `now` satisfies this rule against `due`.
    pub fn satisfied(&self, now_ms: u64, due_ms: u64) -> bool {
        match self {
            Self::BeforeDeadline => now_ms <= due_ms,
            Self::AfterDeadline => now_ms >= due_ms,
        }
    }
}

/// Timing policy for record acceptance and signing approval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingOptions {
    /// Minimum gap between `start` and `promises_due` for a new record
    pub min_promise_time_ms: u64,
    /// Deadline rule applied to promise approval
    pub promise_rule: DeadlineRule,
    /// Deadline rule applied to commit approval
    pub commit_rule: DeadlineRule,
}

impl Default for TimingOptions {
    fn default() -> Self {
        Self {
            min_promise_time_ms: 60_000,
            promise_rule: DeadlineRule::BeforeDeadline,
            commit_rule: DeadlineRule::AfterDeadline,
        }
    }
}

/// Full protocol configuration handed to the participant driver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// Randomness requirements for transaction and session codes
    pub codes: CodeOptions,
    /// Timing policy
    pub timing: TimingOptions,
}
