//! Accord Effects
//!
//! Default handlers for the capability traits in `accord-core::effects`:
//! - **Ed25519Signer**: per-session Ed25519 keys derived from a root secret
//! - **MemoryState**: in-memory participant state with a gossip outbox
//! - **StaticDecider / FnDecider**: constant and closure-driven policies
//! - **SystemClock / SimulatedClock**: wall clock and test clock
//!
//! Hosts embedding the protocol in production supply their own `StateEffects`
//! over durable storage and real transport; these handlers are the reference
//! behavior and the test substrate.

pub mod clock;
pub mod decider;
pub mod signer;
pub mod state;

pub use clock::{SimulatedClock, SystemClock};
pub use decider::{FnDecider, StaticDecider};
pub use signer::Ed25519Signer;
pub use state::MemoryState;
