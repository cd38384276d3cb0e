//! Core data model for the promise/commit protocol.

pub mod keys;
pub mod member;
pub mod record;
pub mod signature;
pub mod topology;

pub use keys::{MemberKey, SessionCode, SignatureValue, TransactionCode};
pub use member::{Member, MemberEndpoint};
pub use record::{TrxRecord, TrxRecordBuilder};
pub use signature::{merge_signatures, RecordSignature, SignatureType};
pub use topology::{Link, Topology};
