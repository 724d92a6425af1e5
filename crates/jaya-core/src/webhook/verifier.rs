//! Webhook signature verification.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::crypto::{check_hub_signature, verify_hub_signature};
use crate::error::{RelayError, Result};

/// Shared secret used as the HMAC key for inbound deliveries.
///
/// Loaded once at startup and shared read-only between request handlers.
#[derive(Clone)]
pub struct WebhookSecret(Arc<SecretString>);

impl WebhookSecret {
    /// Wraps a secret value. Empty secrets are rejected.
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(RelayError::Configuration(
                "Webhook secret must not be empty".to_string(),
            ));
        }
        Ok(Self(Arc::new(SecretString::from(secret))))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.expose_secret().as_bytes()
    }
}

impl std::fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("WebhookSecret([REDACTED])")
    }
}

/// Verifier for `X-Hub-Signature` webhook signatures.
pub struct HubSignatureVerifier<'a> {
    secret: &'a WebhookSecret,
}

impl<'a> HubSignatureVerifier<'a> {
    /// Creates a new verifier with the webhook secret.
    pub fn new(secret: &'a WebhookSecret) -> Self {
        Self { secret }
    }

    /// Verifies a webhook signature.
    ///
    /// # Arguments
    /// * `signature` - The X-Hub-Signature header value
    /// * `body` - The raw request body
    pub fn verify(&self, signature: &str, body: &[u8]) -> bool {
        verify_hub_signature(self.secret.as_bytes(), signature, body)
    }

    /// Like [`verify`](Self::verify), but reports why a signature was rejected.
    pub fn check(&self, signature: &str, body: &[u8]) -> Result<()> {
        check_hub_signature(self.secret.as_bytes(), signature, body)
    }

    /// Signs a body the way a sender would.
    pub fn sign(&self, body: &[u8]) -> String {
        crate::crypto::sign_body(self.secret.as_bytes(), body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hub_verifier() {
        let secret = WebhookSecret::new("test-secret").unwrap();
        let body = b"test payload";
        let verifier = HubSignatureVerifier::new(&secret);
        let signature = verifier.sign(body);

        assert!(verifier.verify(&signature, body));
        assert!(!verifier.verify("sha1=invalid", body));
        assert!(matches!(
            verifier.check("sha1=invalid", body),
            Err(RelayError::InvalidSignatureFormat)
        ));
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            WebhookSecret::new(""),
            Err(RelayError::Configuration(_))
        ));
    }

    #[test]
    fn test_secret_is_redacted() {
        let secret = WebhookSecret::new("itsasecret").unwrap();
        let printed = format!("{:?}", secret);

        assert!(!printed.contains("itsasecret"));
        assert!(printed.contains("REDACTED"));
    }
}
