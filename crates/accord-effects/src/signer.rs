//! Ed25519 signer with per-session key derivation.

use accord_core::effects::SignerEffects;
use accord_core::encoding::{FromBase64, ToBase64};
use accord_core::{MemberKey, Result, SessionCode, SignatureValue};
use async_trait::async_trait;
use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use sha2::{Digest, Sha256};

/// Default signer: a per-session Ed25519 key derived from a root secret.
///
/// The session key is SHA-256(root secret ‖ session code), so the same node
/// presents unlinkable keys across sessions without storing per-session key
/// material. Keys and signature values travel as standard base64.
#[derive(Debug, Clone)]
pub struct Ed25519Signer {
    root_secret: [u8; 32],
}

impl Ed25519Signer {
    /// Create a signer from a 32-byte root secret
    pub fn new(root_secret: [u8; 32]) -> Self {
        Self { root_secret }
    }

    fn session_key(&self, session_code: &SessionCode) -> SigningKey {
        let mut hasher = Sha256::new();
        hasher.update(self.root_secret);
        hasher.update(session_code.as_str().as_bytes());
        SigningKey::from_bytes(&hasher.finalize().into())
    }

    /// The public key this signer presents for a session
    pub fn public_key(&self, session_code: &SessionCode) -> MemberKey {
        let verifying = self.session_key(session_code).verifying_key();
        MemberKey::new(verifying.to_bytes().to_base64())
    }
}

#[async_trait]
impl SignerEffects for Ed25519Signer {
    async fn our_key(&self, session_code: &SessionCode) -> Result<MemberKey> {
        Ok(self.public_key(session_code))
    }

    async fn sign(&self, session_code: &SessionCode, digest: &str) -> Result<SignatureValue> {
        let signature = self.session_key(session_code).sign(digest.as_bytes());
        Ok(SignatureValue::new(signature.to_bytes().to_base64()))
    }

    async fn verify(
        &self,
        key: &MemberKey,
        digest: &str,
        value: &SignatureValue,
    ) -> Result<bool> {
        let Ok(key_bytes) = Vec::<u8>::from_base64(key.as_str()) else {
            return Ok(false);
        };
        let Ok(key_bytes) = <[u8; 32]>::try_from(key_bytes.as_slice()) else {
            return Ok(false);
        };
        let Ok(verifying) = VerifyingKey::from_bytes(&key_bytes) else {
            return Ok(false);
        };
        let Ok(sig_bytes) = Vec::<u8>::from_base64(value.as_str()) else {
            return Ok(false);
        };
        let Ok(sig_bytes) = <[u8; 64]>::try_from(sig_bytes.as_slice()) else {
            return Ok(false);
        };
        let signature = Signature::from_bytes(&sig_bytes);
        Ok(verifying.verify_strict(digest.as_bytes(), &signature).is_ok())
    }
}
