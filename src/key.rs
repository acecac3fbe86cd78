//! Key types, and keys tagged with their type.
//!
//! The [`sign`](crate::sign) and [`curve25519`](crate::curve25519) modules each have their own
//! fixed-size key types. When the type of a key is only known at runtime (for instance when it
//! arrives from another peer alongside a [`KeyType`] tag), the enums in this module carry it:
//! each variant holds the correctly-sized key for its type, so a [`KeyPair`], [`PrivateKey`] or
//! [`PublicKey`] can never hold a buffer of the wrong length. Lengths are checked once, by the
//! `from_bytes` constructors, and never again.

use crate::{curve25519, sign, CryptoError};
use std::fmt;

/// The curve a key belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "use-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyType {
    /// Ed25519, the twisted Edwards curve used for signatures.
    Ed25519,

    /// Curve25519, the Montgomery curve used for key agreement.
    Curve25519,
}

impl KeyType {
    /// The length of a public key of this type, in bytes.
    pub const fn public_key_length(self) -> usize {
        match self {
            Self::Ed25519 => sign::PUBLIC_KEY_LENGTH,
            Self::Curve25519 => curve25519::PUBLIC_KEY_LENGTH,
        }
    }

    /// The length of a private key of this type, in bytes.
    pub const fn private_key_length(self) -> usize {
        match self {
            Self::Ed25519 => sign::PRIVATE_KEY_LENGTH,
            Self::Curve25519 => curve25519::PRIVATE_KEY_LENGTH,
        }
    }

    /// The length of a signature made with a key of this type, or `None` if keys of this type
    /// cannot sign.
    pub const fn signature_length(self) -> Option<usize> {
        match self {
            Self::Ed25519 => Some(sign::SIGNATURE_LENGTH),
            Self::Curve25519 => None,
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ed25519 => "Ed25519",
            Self::Curve25519 => "Curve25519",
        })
    }
}

fn check_length(expected: usize, bytes: &[u8]) -> Result<(), CryptoError> {
    if bytes.len() != expected {
        tracing::debug!(expected, actual = bytes.len(), "rejected key of wrong length");
        return Err(CryptoError::InvalidKeyLength {
            expected,
            actual: bytes.len(),
        });
    }

    Ok(())
}

/// A keypair of either type.
///
/// Created by [`generate_key_pair`](crate::generate_key_pair) (always Ed25519) or by converting
/// another keypair with [`convert_key_pair`](crate::convert_key_pair). Never modified in place.
#[derive(Debug, Eq, PartialEq)]
pub enum KeyPair {
    /// A signing identity.
    Ed25519(sign::Keypair),

    /// A key-agreement keypair.
    Curve25519(curve25519::Keypair),
}

impl KeyPair {
    /// The type of both halves of this keypair.
    pub fn key_type(&self) -> KeyType {
        match self {
            Self::Ed25519(_) => KeyType::Ed25519,
            Self::Curve25519(_) => KeyType::Curve25519,
        }
    }

    /// The public key, `self.key_type().public_key_length()` bytes long.
    pub fn public_key(&self) -> &[u8] {
        match self {
            Self::Ed25519(keypair) => &keypair.public_key()[..],
            Self::Curve25519(keypair) => &keypair.public_key()[..],
        }
    }

    /// The private key, `self.key_type().private_key_length()` bytes long.
    pub fn private_key(&self) -> &[u8] {
        match self {
            Self::Ed25519(keypair) => &keypair.private_key()[..],
            Self::Curve25519(keypair) => &keypair.private_key()[..],
        }
    }

    /// Copy this keypair into newly allocated hardened memory.
    pub fn try_clone(&self) -> Result<Self, CryptoError> {
        Ok(match self {
            Self::Ed25519(keypair) => Self::Ed25519(keypair.try_clone()?),
            Self::Curve25519(keypair) => Self::Curve25519(keypair.try_clone()?),
        })
    }
}

impl From<sign::Keypair> for KeyPair {
    fn from(keypair: sign::Keypair) -> Self {
        Self::Ed25519(keypair)
    }
}

impl From<curve25519::Keypair> for KeyPair {
    fn from(keypair: curve25519::Keypair) -> Self {
        Self::Curve25519(keypair)
    }
}

/// A private key of either type.
#[derive(Debug, Eq, PartialEq)]
pub enum PrivateKey {
    /// An Ed25519 signing key.
    Ed25519(sign::PrivateKey),

    /// A Curve25519 key-agreement scalar.
    Curve25519(curve25519::PrivateKey),
}

impl PrivateKey {
    /// Copy `bytes` into a private key of type `key_type`.
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] unless `bytes` is exactly
    /// `key_type.private_key_length()` bytes long.
    pub fn from_bytes(key_type: KeyType, bytes: &[u8]) -> Result<Self, CryptoError> {
        check_length(key_type.private_key_length(), bytes)?;

        Ok(match key_type {
            KeyType::Ed25519 => Self::Ed25519(sign::PrivateKey::try_from(bytes)?),
            KeyType::Curve25519 => Self::Curve25519(curve25519::PrivateKey::try_from(bytes)?),
        })
    }

    /// The type of this key.
    pub fn key_type(&self) -> KeyType {
        match self {
            Self::Ed25519(_) => KeyType::Ed25519,
            Self::Curve25519(_) => KeyType::Curve25519,
        }
    }

    /// The key's bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Ed25519(key) => &key[..],
            Self::Curve25519(key) => &key[..],
        }
    }

    /// Copy this key into newly allocated hardened memory.
    pub fn try_clone(&self) -> Result<Self, CryptoError> {
        Ok(match self {
            Self::Ed25519(key) => Self::Ed25519(key.try_clone()?),
            Self::Curve25519(key) => Self::Curve25519(key.try_clone()?),
        })
    }
}

/// A public key of either type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "use-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PublicKey {
    /// An Ed25519 verification key.
    Ed25519(sign::PublicKey),

    /// A Curve25519 key-agreement key.
    Curve25519(curve25519::PublicKey),
}

impl PublicKey {
    /// Copy `bytes` into a public key of type `key_type`.
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] unless `bytes` is exactly
    /// `key_type.public_key_length()` bytes long. No check is made that the bytes encode a point
    /// on the curve.
    pub fn from_bytes(key_type: KeyType, bytes: &[u8]) -> Result<Self, CryptoError> {
        check_length(key_type.public_key_length(), bytes)?;

        Ok(match key_type {
            KeyType::Ed25519 => {
                let mut key = [0u8; sign::PUBLIC_KEY_LENGTH];
                key.copy_from_slice(bytes);
                Self::Ed25519(key)
            }
            KeyType::Curve25519 => {
                let mut key = [0u8; curve25519::PUBLIC_KEY_LENGTH];
                key.copy_from_slice(bytes);
                Self::Curve25519(key)
            }
        })
    }

    /// The type of this key.
    pub fn key_type(&self) -> KeyType {
        match self {
            Self::Ed25519(_) => KeyType::Ed25519,
            Self::Curve25519(_) => KeyType::Curve25519,
        }
    }

    /// The key's bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Ed25519(key) => &key[..],
            Self::Curve25519(key) => &key[..],
        }
    }
}
