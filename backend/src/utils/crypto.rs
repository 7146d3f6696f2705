//! Deterministic token encryption using AES-256-GCM with a synthetic nonce.
//!
//! Stored tokens are looked up by ciphertext equality, so the same plaintext
//! must always encrypt to the same ciphertext under a given key. The nonce is
//! therefore derived from the plaintext with HMAC-SHA256 instead of being
//! drawn at random, and checked again on decryption.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let cipher = TokenCipher::from_key_str(&config.encryption_key)?;
//! let stored = cipher.encrypt_token(token.as_bytes())?;
//! let plain = cipher.decrypt_token(&stored)?;
//! ```

use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, KeyInit},
};
use base64::{Engine as _, engine::general_purpose};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;
const NONCE_KEY_LABEL: &[u8] = b"moneybox/token-nonce/v1";

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    InvalidKey,
    EncryptionFailed,
    DecryptionFailed,
    InvalidData,
}

impl std::fmt::Display for CryptoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CryptoError::InvalidKey => write!(f, "Invalid encryption key"),
            CryptoError::EncryptionFailed => write!(f, "Encryption failed"),
            CryptoError::DecryptionFailed => write!(f, "Decryption failed"),
            CryptoError::InvalidData => write!(f, "Invalid data format"),
        }
    }
}

impl std::error::Error for CryptoError {}

/// AES-256-GCM cipher for bearer tokens.
#[derive(Clone)]
pub struct TokenCipher {
    cipher: Aes256Gcm,
    nonce_key: [u8; KEY_LEN],
}

impl TokenCipher {
    /// Builds a cipher from exactly 32 key bytes.
    pub fn new(key_bytes: &[u8]) -> Result<Self, CryptoError> {
        if key_bytes.len() != KEY_LEN {
            return Err(CryptoError::InvalidKey);
        }

        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key_bytes));

        let digest = Sha256::new()
            .chain_update(NONCE_KEY_LABEL)
            .chain_update(key_bytes)
            .finalize();
        let mut nonce_key = [0u8; KEY_LEN];
        nonce_key.copy_from_slice(&digest);

        Ok(Self { cipher, nonce_key })
    }

    /// Builds a cipher from the configured key string.
    ///
    /// A 44 character value is treated as a base64 encoded 256-bit key; any
    /// other value is used as raw bytes, zero padded or truncated to 32 bytes.
    pub fn from_key_str(key_str: &str) -> Result<Self, CryptoError> {
        if key_str.is_empty() {
            return Err(CryptoError::InvalidKey);
        }

        let key_bytes = if key_str.len() == 44 {
            general_purpose::STANDARD
                .decode(key_str)
                .map_err(|_| CryptoError::InvalidKey)?
        } else {
            let mut bytes = vec![0u8; KEY_LEN];
            let input_bytes = key_str.as_bytes();
            let copy_len = std::cmp::min(input_bytes.len(), KEY_LEN);
            bytes[..copy_len].copy_from_slice(&input_bytes[..copy_len]);
            bytes
        };

        Self::new(&key_bytes)
    }

    fn synthetic_nonce(&self, plaintext: &[u8]) -> Result<[u8; NONCE_LEN], CryptoError> {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(&self.nonce_key)
            .map_err(|_| CryptoError::InvalidKey)?;
        mac.update(plaintext);
        let tag = mac.finalize().into_bytes();

        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&tag[..NONCE_LEN]);
        Ok(nonce)
    }

    /// Encrypts a token and returns base64(nonce || ciphertext).
    pub fn encrypt_token(&self, plaintext: &[u8]) -> Result<String, CryptoError> {
        let nonce_bytes = self.synthetic_nonce(plaintext)?;

        let ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
            .map_err(|_| CryptoError::EncryptionFailed)?;

        let mut result = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        result.extend_from_slice(&nonce_bytes);
        result.extend_from_slice(&ciphertext);

        Ok(general_purpose::STANDARD.encode(result))
    }

    /// Inverse of [`TokenCipher::encrypt_token`].
    pub fn decrypt_ciphertext(&self, encoded: &str) -> Result<Vec<u8>, CryptoError> {
        let data = general_purpose::STANDARD
            .decode(encoded)
            .map_err(|_| CryptoError::InvalidData)?;

        if data.len() < NONCE_LEN {
            return Err(CryptoError::InvalidData);
        }

        let (nonce_bytes, ciphertext) = data.split_at(NONCE_LEN);

        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| CryptoError::DecryptionFailed)?;

        if self.synthetic_nonce(&plaintext)? != nonce_bytes {
            return Err(CryptoError::DecryptionFailed);
        }

        Ok(plaintext)
    }

    /// Decrypts a stored token back into its UTF-8 form.
    pub fn decrypt_token(&self, encoded: &str) -> Result<String, CryptoError> {
        let plaintext = self.decrypt_ciphertext(encoded)?;
        String::from_utf8(plaintext).map_err(|_| CryptoError::InvalidData)
    }
}

impl std::fmt::Debug for TokenCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TokenCipher(<redacted>)")
    }
}
