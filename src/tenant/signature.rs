//! HMAC-SHA256 verification of the tenant headers.
//!
//! The gateway signs `x-dv-baseuri ‖ x-dv-tenant-id ‖ <forwarding header>` (in that
//! order, no separator, missing values contribute `""`) and sends the base64 MAC in
//! `x-dv-sig-1`. This module knows nothing about axum: it works on plain strings so the
//! resolver and its tests can drive it directly.

use std::fmt;
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    /// Server misconfiguration, not the caller's fault.
    #[error("missing signature secret key: tenant headers cannot be verified")]
    MissingSecret,
    #[error("signature secret key rejected by hmac: {0}")]
    InvalidKey(hmac::digest::InvalidLength),
    #[error("missing signature header")]
    MissingSignature,
    #[error("illegal base64 data in signature header: {0}")]
    IllegalBase64(#[from] base64::DecodeError),
    #[error("signature mismatch: tenant headers were not signed with the configured key")]
    Mismatch,
}

impl SignatureError {
    /// `true` when the failure lies with this service rather than with the caller.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::MissingSecret | Self::InvalidKey(_))
    }
}

/// Shared secret used to sign tenant headers.
///
/// An empty key is not a key: [`SigningKey::new`] returns `None` for it so that
/// "not configured" stays distinguishable from "configured but wrong".
#[derive(Clone)]
pub struct SigningKey(Arc<[u8]>);

impl SigningKey {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Option<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            None
        } else {
            Some(Self(bytes.into()))
        }
    }

    /// Decode a key given as standard base64 (the form used in configuration).
    pub fn from_base64(encoded: &str) -> Result<Option<Self>, base64::DecodeError> {
        let encoded = encoded.trim();
        if encoded.is_empty() {
            return Ok(None);
        }
        Ok(Self::new(STANDARD.decode(encoded)?))
    }

    /// Base64 HMAC-SHA256 of `message`, as expected in the signature header.
    pub fn sign(&self, message: &[u8]) -> Result<String, SignatureError> {
        let mut mac = self.mac()?;
        mac.update(message);
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }

    fn mac(&self) -> Result<HmacSha256, SignatureError> {
        HmacSha256::new_from_slice(&self.0).map_err(SignatureError::InvalidKey)
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningKey(<{} bytes redacted>)", self.0.len())
    }
}

/// The header values covered by the signature, in signing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignedHeaders<'a> {
    pub system_base_uri: &'a str,
    pub tenant_id: &'a str,
    pub forwarded: &'a str,
}

impl SignedHeaders<'_> {
    pub fn message(&self) -> String {
        [self.system_base_uri, self.tenant_id, self.forwarded].concat()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignatureVerifier {
    key: Option<SigningKey>,
}

impl SignatureVerifier {
    pub fn new(key: Option<SigningKey>) -> Self {
        Self { key }
    }

    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    /// Check `signature` (base64, as received) against the MAC of `signed`.
    ///
    /// The comparison runs in constant time (`Mac::verify_slice`).
    pub fn verify(
        &self,
        signed: &SignedHeaders<'_>,
        signature: Option<&str>,
    ) -> Result<(), SignatureError> {
        let key = self.key.as_ref().ok_or(SignatureError::MissingSecret)?;
        let signature = signature.ok_or(SignatureError::MissingSignature)?;
        let expected = STANDARD.decode(signature.trim())?;

        let mut mac = key.mac()?;
        mac.update(signed.message().as_bytes());
        mac.verify_slice(&expected)
            .map_err(|_| SignatureError::Mismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> SigningKey {
        SigningKey::new(*b"Jefe").unwrap()
    }

    #[test]
    fn sign_matches_rfc4231_vector() {
        let sig = key().sign(b"what do ya want for nothing?").unwrap();
        assert_eq!(sig, "W9zBRr9gdU5qBCQmCJV1x1oAPwidJzmDnexYuWTsOEM=");
    }

    #[test]
    fn message_concatenates_in_fixed_order() {
        let signed = SignedHeaders {
            system_base_uri: "https://a.example.com",
            tenant_id: "t1",
            forwarded: "host=b.example.com",
        };
        assert_eq!(signed.message(), "https://a.example.comt1host=b.example.com");
        assert_eq!(SignedHeaders::default().message(), "");
    }

    #[test]
    fn verify_accepts_matching_signature() {
        let signed = SignedHeaders {
            system_base_uri: "https://a.example.com",
            tenant_id: "t1",
            forwarded: "",
        };
        let sig = key().sign(signed.message().as_bytes()).unwrap();
        let verifier = SignatureVerifier::new(Some(key()));
        assert!(verifier.verify(&signed, Some(&sig)).is_ok());
    }

    #[test]
    fn verify_rejects_wrong_order() {
        let signed = SignedHeaders {
            system_base_uri: "https://a.example.com",
            tenant_id: "t1",
            forwarded: "",
        };
        let sig = key().sign(b"t1https://a.example.com").unwrap();
        let verifier = SignatureVerifier::new(Some(key()));
        assert!(matches!(
            verifier.verify(&signed, Some(&sig)),
            Err(SignatureError::Mismatch)
        ));
    }

    #[test]
    fn verify_without_key_is_server_error() {
        let verifier = SignatureVerifier::new(None);
        let err = verifier
            .verify(&SignedHeaders::default(), Some("AAAA"))
            .unwrap_err();
        assert!(matches!(err, SignatureError::MissingSecret));
        assert!(err.is_server_error());
        assert!(err.to_string().contains("secret"));
    }

    #[test]
    fn verify_reports_missing_signature() {
        let verifier = SignatureVerifier::new(Some(key()));
        let err = verifier.verify(&SignedHeaders::default(), None).unwrap_err();
        assert!(matches!(err, SignatureError::MissingSignature));
        assert!(!err.is_server_error());
        assert!(err.to_string().contains("signature"));
    }

    #[test]
    fn verify_reports_illegal_base64() {
        let verifier = SignatureVerifier::new(Some(key()));
        let err = verifier
            .verify(&SignedHeaders::default(), Some("abc+(9-!"))
            .unwrap_err();
        assert!(matches!(err, SignatureError::IllegalBase64(_)));
        assert!(err.to_string().contains("illegal base64"));
    }

    #[test]
    fn verify_rejects_truncated_mac() {
        let verifier = SignatureVerifier::new(Some(key()));
        let full = key().sign(b"").unwrap();
        let decoded = STANDARD.decode(full).unwrap();
        let truncated = STANDARD.encode(&decoded[..16]);
        assert!(matches!(
            verifier.verify(&SignedHeaders::default(), Some(&truncated)),
            Err(SignatureError::Mismatch)
        ));
    }

    #[test]
    fn empty_key_is_absent() {
        assert!(SigningKey::new(Vec::new()).is_none());
        assert!(SigningKey::from_base64("  ").unwrap().is_none());
        assert!(SigningKey::from_base64("not base64!").is_err());
    }

    #[test]
    fn debug_does_not_print_key_bytes() {
        let rendered = format!("{:?}", key());
        assert!(!rendered.contains("Jefe"));
    }
}
