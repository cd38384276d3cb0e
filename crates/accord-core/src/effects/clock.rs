//! Clock capability.

use async_trait::async_trait;

/// Wall-clock time in integer milliseconds since the Unix epoch.
///
/// Deadlines in records are absolute, so tests inject a simulated clock
/// rather than stubbing the records.
#[async_trait]
pub trait ClockEffects: Send + Sync {
    /// Current time in milliseconds since the epoch
    async fn now_ms(&self) -> u64;
}
