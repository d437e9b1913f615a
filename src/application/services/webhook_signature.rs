use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, PartialEq, Eq)]
pub enum SignatureError {
    Missing,
    Mismatch,
}

impl std::fmt::Display for SignatureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignatureError::Missing => write!(f, "Signature header missing"),
            SignatureError::Mismatch => write!(f, "Invalid signature"),
        }
    }
}

impl std::error::Error for SignatureError {}

/// HMAC-SHA256 verification over the exact bytes received, before any JSON
/// decoding: re-serialization can change the byte representation, so the
/// digest must be computed on the raw body. Comparison goes through the MAC
/// verifier, which is constant-time.
pub struct WebhookSignatureVerifier {
    secret: Vec<u8>,
}

impl WebhookSignatureVerifier {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verifies a bare hex digest header (processing-service convention).
    pub fn verify_hex(
        &self,
        raw_body: &[u8],
        signature: Option<&str>,
    ) -> Result<(), SignatureError> {
        let signature = signature.ok_or(SignatureError::Missing)?;
        let provided = hex::decode(signature.trim()).map_err(|_| SignatureError::Mismatch)?;

        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size");
        mac.update(raw_body);
        mac.verify_slice(&provided).map_err(|_| SignatureError::Mismatch)
    }

    /// Verifies a `sha256=<hex>` formatted header (crawler convention).
    pub fn verify_prefixed(
        &self,
        raw_body: &[u8],
        signature: Option<&str>,
    ) -> Result<(), SignatureError> {
        let signature = signature.ok_or(SignatureError::Missing)?;
        let hex_part = signature
            .strip_prefix("sha256=")
            .ok_or(SignatureError::Mismatch)?;
        self.verify_hex(raw_body, Some(hex_part))
    }

    pub fn sign_hex(&self, raw_body: &[u8]) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size");
        mac.update(raw_body);
        hex::encode(mac.finalize().into_bytes())
    }
}

/// Event identity for the idempotency ledger: the digest of the raw body.
/// Two deliveries of the same event carry identical bytes and collapse to
/// one ledger row.
pub fn event_digest(raw_body: &[u8]) -> String {
    hex::encode(Sha256::digest(raw_body))
}
