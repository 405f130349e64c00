//! Gateway notification signature verification.
//!
//! The gateway signs each notification with
//! `sha512(order_id + status_code + gross_amount + server_key)`, hex encoded,
//! with no separators between the parts.

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha512};
use subtle::ConstantTimeEq;

/// Whether a server key is usable; blank or whitespace-only keys are not.
pub fn server_key_configured(server_key: &SecretString) -> bool {
    !server_key.expose_secret().trim().is_empty()
}

/// Verifies notification signatures against the shared server key.
pub struct SignatureVerifier {
    server_key: SecretString,
}

impl SignatureVerifier {
    pub fn new(server_key: SecretString) -> Self {
        Self { server_key }
    }

    /// False when no server key was configured.
    ///
    /// An unconfigured verifier rejects every signature.
    pub fn is_configured(&self) -> bool {
        server_key_configured(&self.server_key)
    }

    /// Computes the lowercase hex signature for the given fields.
    pub fn sign(&self, order_id: &str, status_code: &str, gross_amount: &str) -> String {
        hex::encode(self.digest(order_id, status_code, gross_amount))
    }

    /// Checks `provided` against the expected signature.
    ///
    /// Fails closed: an unconfigured key, non-hex input or a length mismatch
    /// all return false.
    pub fn verify(
        &self,
        order_id: &str,
        status_code: &str,
        gross_amount: &str,
        provided: &str,
    ) -> bool {
        if !self.is_configured() {
            return false;
        }
        let provided = match hex::decode(provided.trim()) {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };
        let expected = self.digest(order_id, status_code, gross_amount);
        constant_time_compare(&expected, &provided)
    }

    fn digest(&self, order_id: &str, status_code: &str, gross_amount: &str) -> Vec<u8> {
        let mut hasher = Sha512::new();
        hasher.update(order_id.as_bytes());
        hasher.update(status_code.as_bytes());
        hasher.update(gross_amount.as_bytes());
        hasher.update(self.server_key.expose_secret().as_bytes());
        hasher.finalize().to_vec()
    }
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("configured", &self.is_configured())
            .finish()
    }
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
