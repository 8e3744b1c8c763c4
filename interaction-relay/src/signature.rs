use crate::Error;
use ed25519_dalek::{PublicKey, Signature, Verifier};

/// Whether inbound interactions are authenticated. `Disabled` is the
/// explicit development-mode opt-out; it is never inferred from a missing
/// key (see [`crate::Config::verification_mode`]).
#[derive(Debug, Clone, Copy)]
pub enum VerificationMode {
    Verify(PublicKey),
    Disabled,
}

impl VerificationMode {
    /// Verifies `signature` over `timestamp || body`, the exact bytes as
    /// received. Re-serializing the parsed payload would change the byte
    /// content and break verification.
    pub fn verify(
        &self,
        timestamp: Option<&str>,
        body: &[u8],
        signature: Option<&Signature>,
    ) -> Result<(), Error> {
        let public_key = match self {
            VerificationMode::Verify(public_key) => public_key,
            VerificationMode::Disabled => return Ok(()),
        };

        let (timestamp, signature) = match (timestamp, signature) {
            (Some(timestamp), Some(signature)) => (timestamp, signature),
            _ => return Err(Error::MissingSignatureHeaders),
        };

        let message: Vec<u8> = timestamp
            .as_bytes()
            .iter()
            .copied()
            .chain(body.iter().copied())
            .collect();

        public_key
            .verify(&message[..], signature)
            .map_err(Error::InvalidSignature)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use ed25519_dalek::{ExpandedSecretKey, SecretKey};

    pub(crate) struct TestKey {
        pub public_key: PublicKey,
        expanded: ExpandedSecretKey,
    }

    impl TestKey {
        pub(crate) fn new() -> TestKey {
            let secret = SecretKey::from_bytes(&[7u8; 32]).unwrap();
            let public_key = PublicKey::from(&secret);
            let expanded = ExpandedSecretKey::from(&secret);

            TestKey {
                public_key,
                expanded,
            }
        }

        pub(crate) fn sign(&self, timestamp: &str, body: &[u8]) -> Signature {
            let message: Vec<u8> = timestamp
                .as_bytes()
                .iter()
                .copied()
                .chain(body.iter().copied())
                .collect();

            self.expanded.sign(&message[..], &self.public_key)
        }
    }

    #[test]
    fn test_valid_signature_verifies() {
        let key = TestKey::new();
        let body = br#"{"type":1}"#;
        let signature = key.sign("1693000000", body);

        let mode = VerificationMode::Verify(key.public_key);
        assert!(mode
            .verify(Some("1693000000"), body, Some(&signature))
            .is_ok());
    }

    #[test]
    fn test_mutated_body_fails() {
        let key = TestKey::new();
        let signature = key.sign("1693000000", br#"{"type":1}"#);

        let mode = VerificationMode::Verify(key.public_key);
        let result = mode.verify(Some("1693000000"), br#"{"type":2}"#, Some(&signature));
        assert!(matches!(result, Err(Error::InvalidSignature(_))));
    }

    #[test]
    fn test_mutated_timestamp_fails() {
        let key = TestKey::new();
        let body = br#"{"type":1}"#;
        let signature = key.sign("1693000000", body);

        let mode = VerificationMode::Verify(key.public_key);
        let result = mode.verify(Some("1693000001"), body, Some(&signature));
        assert!(matches!(result, Err(Error::InvalidSignature(_))));
    }

    #[test]
    fn test_corrupted_signature_fails() {
        let key = TestKey::new();
        let body = br#"{"type":1}"#;
        let mut bytes = key.sign("1693000000", body).to_bytes();
        bytes[0] ^= 0x01;
        let signature = Signature::try_from(&bytes[..]).unwrap();

        let mode = VerificationMode::Verify(key.public_key);
        let result = mode.verify(Some("1693000000"), body, Some(&signature));
        assert!(matches!(result, Err(Error::InvalidSignature(_))));
    }

    #[test]
    fn test_missing_headers_fail_when_verifying() {
        let key = TestKey::new();
        let mode = VerificationMode::Verify(key.public_key);

        let result = mode.verify(None, br#"{"type":1}"#, None);
        assert!(matches!(result, Err(Error::MissingSignatureHeaders)));
    }

    #[test]
    fn test_disabled_mode_accepts_anything() {
        assert!(VerificationMode::Disabled
            .verify(None, br#"{"type":1}"#, None)
            .is_ok());
    }
}
