//! [Curve25519](https://cr.yp.to/ecdh.html) key-agreement keys.
//!
//! This module corresponds to the [`crypto_scalarmult_curve25519`
//! API](https://doc.libsodium.org/advanced/scalar_multiplication) from Sodium.
//!
//! Peers never generate Curve25519 keys of their own: a peer's key-agreement keypair is derived
//! from its Ed25519 identity with [`crate::convert`], so that the signing public key everyone
//! already knows doubles as the key-agreement public key. This module holds the resulting key
//! types, and the raw X25519 function [`scalar_mult`], which two peers use to arrive at the same
//! shared point.
//!
//! # Security Considerations
//! The output of [`scalar_mult`] is a curve point, not a uniformly random key. Hash it (together
//! with both public keys) before using it as a symmetric key. Deriving session keys is left to
//! the chat protocol.
//!
//! # Examples
//! ```rust
//! use meshkey::{convert, curve25519, sign};
//!
//! let alice = convert::keypair_to_curve25519(&sign::Keypair::generate().unwrap()).unwrap();
//! let bob = convert::keypair_to_curve25519(&sign::Keypair::generate().unwrap()).unwrap();
//!
//! let alice_view = curve25519::scalar_mult(alice.private_key(), bob.public_key()).unwrap();
//! let bob_view = curve25519::scalar_mult(bob.private_key(), alice.public_key()).unwrap();
//! assert_eq!(alice_view, bob_view);
//! ```

use crate::mem::hardened_buffer;
use crate::{check_sodium, require_init, CryptoError};
use libsodium_sys as sodium;
use thiserror::Error;

/// Error type returned if something went wrong in the curve25519 module.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum Curve25519Error {
    /// The peer's public key is of low order, so the shared point would be the identity.
    ///
    /// Agreeing a key with such a point would leak information about the private key, and the
    /// "shared" secret would be known to everyone. This should be treated as an attack.
    #[error("insecure public key")]
    PublicKeyInsecure,
}

/// The length of a private key, in bytes.
pub const PRIVATE_KEY_LENGTH: usize = sodium::crypto_scalarmult_curve25519_SCALARBYTES as usize;

/// The length of a public key, in bytes.
pub const PUBLIC_KEY_LENGTH: usize = sodium::crypto_scalarmult_curve25519_BYTES as usize;

/// The length of the shared point computed by [`scalar_mult`], in bytes.
pub const SHARED_SECRET_LENGTH: usize = sodium::crypto_scalarmult_curve25519_BYTES as usize;

hardened_buffer! {
    /// A private scalar used for key agreement.
    ///
    /// Obtain one by converting an Ed25519 private key with
    /// [`convert::private_key_to_curve25519`](crate::convert::private_key_to_curve25519). The
    /// result is already clamped.
    ///
    /// This is a hardened buffer type (see [`crate::mem`]), zeroed on drop.
    pub PrivateKey(PRIVATE_KEY_LENGTH);

    /// The raw shared point resulting from [`scalar_mult`].
    ///
    /// This is a hardened buffer type (see [`crate::mem`]), zeroed on drop.
    pub SharedSecret(SHARED_SECRET_LENGTH);
}

/// A public key (Montgomery u-coordinate) used for key agreement.
pub type PublicKey = [u8; PUBLIC_KEY_LENGTH];

/// A Curve25519 ([`PrivateKey`], [`PublicKey`]) keypair.
#[derive(Debug, Eq, PartialEq)]
pub struct Keypair {
    private_key: PrivateKey,
    public_key: PublicKey,
}

impl Keypair {
    /// Pair up two halves which are already known to match.
    pub(crate) fn from_parts(private_key: PrivateKey, public_key: PublicKey) -> Self {
        Self {
            private_key,
            public_key,
        }
    }

    /// Build a keypair from its [`PrivateKey`], computing the public key as `private_key * 9`.
    pub fn from_private_key(private_key: &PrivateKey) -> Result<Self, CryptoError> {
        require_init()?;

        let mut public_key = [0u8; PUBLIC_KEY_LENGTH];

        let base_result = unsafe {
            // SAFETY: `public_key` is valid for writes of `crypto_scalarmult_curve25519_BYTES`
            // bytes, and `private_key` for reads of `crypto_scalarmult_curve25519_SCALARBYTES`.
            sodium::crypto_scalarmult_curve25519_base(public_key.as_mut_ptr(), private_key.as_ptr())
        };
        check_sodium!(base_result, "crypto_scalarmult_curve25519_base");

        Ok(Self {
            private_key: private_key.try_clone()?,
            public_key,
        })
    }

    /// The private half of this keypair.
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// The public half of this keypair.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Copy this keypair into newly allocated hardened memory.
    pub fn try_clone(&self) -> Result<Self, CryptoError> {
        Ok(Self {
            private_key: self.private_key.try_clone()?,
            public_key: self.public_key,
        })
    }
}

/// Compute the X25519 shared point between our `private_key` and a peer's `public_key`.
///
/// Both peers arrive at the same [`SharedSecret`]. Returns
/// [`Curve25519Error::PublicKeyInsecure`] if `public_key` is a low-order point.
pub fn scalar_mult(
    private_key: &PrivateKey,
    public_key: &PublicKey,
) -> Result<SharedSecret, CryptoError> {
    require_init()?;

    let mut shared = SharedSecret::new_empty()?;

    let mult_result = unsafe {
        // SAFETY: `shared` is valid for writes of `crypto_scalarmult_curve25519_BYTES` bytes,
        // `private_key` for reads of `crypto_scalarmult_curve25519_SCALARBYTES` bytes and
        // `public_key` for reads of `crypto_scalarmult_curve25519_BYTES` bytes.
        sodium::crypto_scalarmult_curve25519(
            shared.as_mut_ptr(),
            private_key.as_ptr(),
            public_key.as_ptr(),
        )
    };

    // Sodium returns -1 when the result is the all-zero point
    if mult_result != 0 {
        tracing::warn!("rejected low-order curve25519 public key");
        return Err(Curve25519Error::PublicKeyInsecure.into());
    }

    Ok(shared)
}
