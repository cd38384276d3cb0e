//! Signer capability: session-scoped keys and digest signatures.

use crate::errors::Result;
use crate::types::{MemberKey, SessionCode, SignatureValue};
use async_trait::async_trait;

/// Key management and signing, supplied by the host.
///
/// Keys are scoped by session code so node identity is not linkable across
/// transactions; how a session code maps to a key is the host's business.
/// Implementations must be deterministic per `(session, digest)` so that a
/// re-signed record merges cleanly with the first copy.
#[async_trait]
pub trait SignerEffects: Send + Sync {
    /// This node's public key for the given session
    async fn our_key(&self, session_code: &SessionCode) -> Result<MemberKey>;

    /// Sign a digest with the session's key
    async fn sign(&self, session_code: &SessionCode, digest: &str) -> Result<SignatureValue>;

    /// Verify a signature over a digest under the given public key.
    ///
    /// A malformed key or signature is a failed verification, not an error.
    async fn verify(
        &self,
        key: &MemberKey,
        digest: &str,
        value: &SignatureValue,
    ) -> Result<bool>;
}
