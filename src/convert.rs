//! Conversion of Ed25519 identity keys into Curve25519 key-agreement keys.
//!
//! Ed25519 (a twisted Edwards curve) and Curve25519 (a Montgomery curve) are birationally
//! equivalent, so a peer's signing identity can be mapped onto a key-agreement keypair. Other
//! peers who know the Ed25519 public key can compute the matching Curve25519 public key
//! themselves, without it ever being sent.
//!
//! # Algorithm Details
//! These functions wrap `crypto_sign_ed25519_sk_to_curve25519` and
//! `crypto_sign_ed25519_pk_to_curve25519` from Sodium.
//!
//! * Private keys: the first 32 bytes of the Ed25519 private key (the seed) are hashed with
//!   SHA-512, and the first 32 bytes of the hash are clamped (`s[0] &= 248; s[31] &= 127; s[31]
//!   |= 64`). This is the same secret scalar Ed25519 signs with.
//! * Public keys: the Edwards point `(x, y)` is mapped to the Montgomery u-coordinate
//!   `u = (1 + y) / (1 - y) mod 2^255 - 19`, encoded little-endian.
//!
//! Only Ed25519 → Curve25519 is supported, along with converting a key to its own type (which
//! simply copies it). The Montgomery u-coordinate drops the sign of `x`, so the reverse mapping
//! is ambiguous, and Sodium does not provide it: asking for it returns
//! [`ConvertError::UnsupportedConversion`].
//!
//! # Examples
//! ```rust
//! use meshkey::{convert, curve25519, sign};
//!
//! let identity = sign::Keypair::generate().unwrap();
//! let agreement = convert::keypair_to_curve25519(&identity).unwrap();
//!
//! // a peer who only knows our Ed25519 public key derives the same Curve25519 public key
//! let derived = convert::public_key_to_curve25519(identity.public_key()).unwrap();
//! assert_eq!(&derived, agreement.public_key());
//! ```

use crate::key::{KeyPair, KeyType, PrivateKey, PublicKey};
use crate::{check_sodium, curve25519, require_init, sign, CryptoError};
use libsodium_sys as sodium;
use thiserror::Error;

/// Error type returned if something went wrong in the convert module.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ConvertError {
    /// There is no mapping from keys of type `from` to keys of type `to`.
    #[error("unsupported key conversion: {from} to {to}")]
    UnsupportedConversion {
        /// The type of the key provided.
        from: KeyType,

        /// The type requested.
        to: KeyType,
    },

    /// The Ed25519 public key is not a valid point in the main subgroup of the curve (it may be
    /// of small order, not on the curve at all, or non-canonically encoded).
    #[error("invalid Ed25519 public key")]
    InvalidPublicKey,
}

/// Check that keys of type `from` can be converted to type `to`.
///
/// Succeeds for Ed25519 → Curve25519 and for any type to itself.
pub fn check_supported(from: KeyType, to: KeyType) -> Result<(), CryptoError> {
    match (from, to) {
        (KeyType::Ed25519, KeyType::Curve25519) => Ok(()),
        (from, to) if from == to => Ok(()),
        (from, to) => {
            tracing::debug!(%from, %to, "rejected unsupported key conversion");
            Err(ConvertError::UnsupportedConversion { from, to }.into())
        }
    }
}

/// Convert an Ed25519 private key to the equivalent Curve25519 private key.
pub fn private_key_to_curve25519(
    private_key: &sign::PrivateKey,
) -> Result<curve25519::PrivateKey, CryptoError> {
    require_init()?;

    let mut converted = curve25519::PrivateKey::new_empty()?;

    let conversion_result = unsafe {
        // SAFETY: `converted` is valid for writes of `crypto_scalarmult_curve25519_BYTES` bytes.
        // `private_key` is `crypto_sign_ed25519_SECRETKEYBYTES` bytes long, of which Sodium only
        // reads the seed half.
        sodium::crypto_sign_ed25519_sk_to_curve25519(converted.as_mut_ptr(), private_key.as_ptr())
    };
    check_sodium!(conversion_result, "crypto_sign_ed25519_sk_to_curve25519");

    Ok(converted)
}

/// Convert an Ed25519 public key to the equivalent Curve25519 public key.
///
/// Returns [`ConvertError::InvalidPublicKey`] if `public_key` does not encode a point in the main
/// subgroup of Ed25519. Keys generated by [`sign::Keypair::generate`] always do; a key received
/// from a peer might not.
pub fn public_key_to_curve25519(
    public_key: &sign::PublicKey,
) -> Result<curve25519::PublicKey, CryptoError> {
    require_init()?;

    let mut converted = [0u8; curve25519::PUBLIC_KEY_LENGTH];

    let conversion_result = unsafe {
        // SAFETY: `converted` is valid for writes of `crypto_scalarmult_curve25519_BYTES` bytes,
        // and `public_key` for reads of `crypto_sign_ed25519_PUBLICKEYBYTES` bytes.
        sodium::crypto_sign_ed25519_pk_to_curve25519(converted.as_mut_ptr(), public_key.as_ptr())
    };

    if conversion_result != 0 {
        tracing::warn!("rejected ed25519 public key outside the main subgroup");
        return Err(ConvertError::InvalidPublicKey.into());
    }

    Ok(converted)
}

/// Convert both halves of an Ed25519 identity keypair to a Curve25519 keypair.
pub fn keypair_to_curve25519(keypair: &sign::Keypair) -> Result<curve25519::Keypair, CryptoError> {
    let public_key = public_key_to_curve25519(keypair.public_key())?;
    let private_key = private_key_to_curve25519(keypair.private_key())?;

    Ok(curve25519::Keypair::from_parts(private_key, public_key))
}

/// Convert `private_key` to type `to`.
///
/// Converting a key to its own type returns a copy.
pub fn private_key(private_key: &PrivateKey, to: KeyType) -> Result<PrivateKey, CryptoError> {
    check_supported(private_key.key_type(), to)?;

    match (private_key, to) {
        (PrivateKey::Ed25519(key), KeyType::Curve25519) => {
            Ok(PrivateKey::Curve25519(private_key_to_curve25519(key)?))
        }
        _ => private_key.try_clone(),
    }
}

/// Convert `public_key` to type `to`.
///
/// Converting a key to its own type returns a copy, without checking that it is a valid point.
pub fn public_key(public_key: &PublicKey, to: KeyType) -> Result<PublicKey, CryptoError> {
    check_supported(public_key.key_type(), to)?;

    match (public_key, to) {
        (PublicKey::Ed25519(key), KeyType::Curve25519) => {
            Ok(PublicKey::Curve25519(public_key_to_curve25519(key)?))
        }
        _ => Ok(*public_key),
    }
}

/// Convert `keypair` to type `to`, returning a new keypair.
///
/// Either both halves are converted, or an error is returned: a half-converted keypair is never
/// produced.
pub fn key_pair(keypair: &KeyPair, to: KeyType) -> Result<KeyPair, CryptoError> {
    check_supported(keypair.key_type(), to)?;

    match (keypair, to) {
        (KeyPair::Ed25519(identity), KeyType::Curve25519) => {
            let converted = keypair_to_curve25519(identity)?;
            tracing::debug!("converted ed25519 identity to curve25519");
            Ok(KeyPair::Curve25519(converted))
        }
        _ => keypair.try_clone(),
    }
}
