use crate::signature::VerificationMode;
use ed25519_dalek::PublicKey;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Config {
    pub server_addr: String,
    pub public_key: Option<String>,
    pub forward_url: Option<String>,
    #[serde(default = "default_forward_timeout_ms")]
    pub forward_timeout_ms: u64,
    #[serde(default)]
    pub disable_signature_verification: bool,
}

// Strictly under Discord's interaction reply deadline, so a slow target
// still degrades to the fallback reply in time.
fn default_forward_timeout_ms() -> u64 {
    8_000
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("error while reading config from environment: {0}")]
    EnvyError(#[from] envy::Error),

    #[error("PUBLIC_KEY was not valid hex: {0}")]
    InvalidKeyFormat(#[from] hex::FromHexError),

    #[error("PUBLIC_KEY was not a valid ed25519 public key: {0}")]
    InvalidKey(#[from] ed25519_dalek::SignatureError),

    #[error(
        "PUBLIC_KEY was missing; refusing to serve unauthenticated traffic. \
         Set DISABLE_SIGNATURE_VERIFICATION=true to opt out explicitly"
    )]
    MissingKey,
}

impl Config {
    pub fn from_envvar() -> Result<Config, ConfigError> {
        envy::from_env().map_err(ConfigError::EnvyError)
    }

    /// Reject-by-default: a missing key is a startup failure unless the
    /// bypass flag was set explicitly.
    pub fn verification_mode(&self) -> Result<VerificationMode, ConfigError> {
        if self.disable_signature_verification {
            return Ok(VerificationMode::Disabled);
        }

        let key = self.public_key.as_deref().ok_or(ConfigError::MissingKey)?;

        let mut bytes = [0u8; 32];
        hex::decode_to_slice(key, &mut bytes)?;

        Ok(VerificationMode::Verify(PublicKey::from_bytes(&bytes)?))
    }
}
