//! [Ed25519](https://ed25519.cr.yp.to/) identity keys and message signatures.
//!
//! This module corresponds to the [`crypto_sign_ed25519`
//! API](https://doc.libsodium.org/public-key_cryptography/public-key_signatures) from Sodium.
//!
//! A peer's identity is an Ed25519 [`Keypair`]. The [`PrivateKey`] never leaves the device; the
//! [`PublicKey`] is announced to the mesh. Messages signed with the private key can be checked by
//! anyone holding the public key, but nobody without the private key can produce a new signature
//! which will verify.
//!
//! Two formats are supported:
//!
//! * Combined ([`sign`] / [`verify`]): the output is the 64-byte signature followed by the
//!   message, `signature ‖ message`. This is the format used for chat messages on the mesh.
//!   [`verify`] hands back the message part only if the signature checks out.
//! * Detached ([`sign_detached`] / [`verify_detached`]): the [`Signature`] is kept separately from
//!   the message it covers.
//!
//! Signing is deterministic: the same message and private key always produce the same signature.
//!
//! # Security Considerations
//! Ed25519 private keys must be
//! [clamped](https://www.jcraige.com/an-explainer-on-ed25519-clamping). [`Keypair::generate`] and
//! [`Keypair::from_seed`] take care of this; don't build a private key out of random bytes.
//!
//! Consider context when signing. A signature over "I agree" can be replayed against anything;
//! include enough of the conversation (peer IDs, message numbers) in the signed bytes that the
//! signature can't be lifted out of it.
//!
//! ## Secret Data
//! * Private keys ([`PrivateKey`]) and seeds ([`Seed`]) must be kept secret
//! * A [`Keypair`] contains a [`PrivateKey`], so it must be kept secret too
//!
//! ## Non-Secret Data
//! * Public keys ([`PublicKey`]) should be shared
//! * Signatures ([`Signature`]) reveal nothing about the message they cover
//!
//! # Examples
//! ```rust
//! use meshkey::sign;
//!
//! let keypair = sign::Keypair::generate().unwrap();
//!
//! let signed = sign::sign(b"meet at the north gate", keypair.private_key()).unwrap();
//! assert_eq!(signed.len(), 22 + sign::SIGNATURE_LENGTH);
//!
//! // ... the receiving peer knows our public key
//! let message = sign::verify(&signed, keypair.public_key()).unwrap();
//! assert_eq!(message, b"meet at the north gate");
//! ```

use crate::mem::hardened_buffer;
use crate::{check_sodium, require_init, CryptoError};
use libsodium_sys as sodium;
use std::ptr;
use thiserror::Error;

/// Error type returned if something went wrong in the sign module.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum SignError {
    /// The signature is not valid for this message and public key.
    ///
    /// The message may have been forged or corrupted in transit, or it was signed by a different
    /// identity than the one it is being checked against. Either way its origin is unknown and its
    /// contents must not be trusted.
    #[error("signature verification failed")]
    VerificationFailed,

    /// A signed payload was too short to even contain a signature.
    ///
    /// Signed payloads are at least [`SIGNATURE_LENGTH`] bytes long, even for an empty message.
    #[error("signed payload too short: {length} bytes")]
    MalformedPayload {
        /// The length of the payload received, in bytes.
        length: usize,
    },
}

/// The length of a private key, in bytes.
///
/// An Ed25519 private key in Sodium's format is the 32-byte seed followed by the 32-byte public
/// key.
pub const PRIVATE_KEY_LENGTH: usize = sodium::crypto_sign_ed25519_SECRETKEYBYTES as usize;

/// The length of a public key, in bytes.
pub const PUBLIC_KEY_LENGTH: usize = sodium::crypto_sign_ed25519_PUBLICKEYBYTES as usize;

/// The length of a signature, in bytes.
pub const SIGNATURE_LENGTH: usize = sodium::crypto_sign_ed25519_BYTES as usize;

/// The length of a seed for [`Keypair::from_seed`], in bytes.
pub const SEED_LENGTH: usize = sodium::crypto_sign_ed25519_SEEDBYTES as usize;

hardened_buffer! {
    /// A private key used to sign messages.
    ///
    /// Forms a [`Keypair`] together with a [`PublicKey`]. Generate one with
    /// [`Keypair::generate`] or [`Keypair::from_seed`]: random bytes are not a valid private key.
    ///
    /// This is a hardened buffer type (see [`crate::mem`]), zeroed on drop. It dereferences to a
    /// `[u8; PRIVATE_KEY_LENGTH]`.
    pub PrivateKey(PRIVATE_KEY_LENGTH);

    /// A seed from which a [`Keypair`] can be deterministically derived.
    ///
    /// Anyone holding the seed can rebuild the private key, so treat it exactly like one.
    ///
    /// This is a hardened buffer type (see [`crate::mem`]), zeroed on drop.
    pub Seed(SEED_LENGTH);
}

/// A public key used to verify signatures.
pub type PublicKey = [u8; PUBLIC_KEY_LENGTH];

/// A detached message signature.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "use-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Signature(
    #[cfg_attr(feature = "use-serde", serde(with = "serde_big_array::BigArray"))]
    pub  [u8; SIGNATURE_LENGTH],
);

/// An Ed25519 ([`PrivateKey`], [`PublicKey`]) identity keypair.
///
/// A keypair cannot be modified once created. Converting it for key agreement (see
/// [`crate::convert`]) produces a new keypair.
#[derive(Debug, Eq, PartialEq)]
pub struct Keypair {
    private_key: PrivateKey,
    public_key: PublicKey,
}

impl Keypair {
    /// Generate a new, random identity keypair.
    pub fn generate() -> Result<Self, CryptoError> {
        require_init()?;

        let mut private_key = PrivateKey::new_empty()?;
        let mut public_key = [0u8; PUBLIC_KEY_LENGTH];

        let keypair_result = unsafe {
            // SAFETY: `public_key` is valid for writes of `crypto_sign_ed25519_PUBLICKEYBYTES`
            // bytes and `private_key` for `crypto_sign_ed25519_SECRETKEYBYTES` bytes, which is
            // exactly what this function writes.
            sodium::crypto_sign_ed25519_keypair(
                public_key.as_mut_ptr(),
                private_key.as_mut_ptr(),
            )
        };
        check_sodium!(keypair_result, "crypto_sign_ed25519_keypair");

        tracing::debug!("generated new ed25519 identity");

        Ok(Self {
            private_key,
            public_key,
        })
    }

    /// Deterministically derive a keypair from a seed.
    ///
    /// The same seed always produces the same keypair. [`Keypair::get_seed`] returns the seed for
    /// an existing keypair.
    pub fn from_seed(seed: &Seed) -> Result<Self, CryptoError> {
        require_init()?;

        let mut private_key = PrivateKey::new_empty()?;
        let mut public_key = [0u8; PUBLIC_KEY_LENGTH];

        let keypair_result = unsafe {
            // SAFETY: The output buffers are sized as for `crypto_sign_ed25519_keypair`, and
            // `seed` is valid for reads of `crypto_sign_ed25519_SEEDBYTES` bytes.
            sodium::crypto_sign_ed25519_seed_keypair(
                public_key.as_mut_ptr(),
                private_key.as_mut_ptr(),
                seed.as_ptr(),
            )
        };
        check_sodium!(keypair_result, "crypto_sign_ed25519_seed_keypair");

        Ok(Self {
            private_key,
            public_key,
        })
    }

    /// Rebuild a keypair from its [`PrivateKey`], recomputing the public key.
    ///
    /// No clamping is applied, so `private_key` must have come from [`Keypair::generate`] or
    /// [`Keypair::from_seed`] originally.
    pub fn from_private_key(private_key: &PrivateKey) -> Result<Self, CryptoError> {
        require_init()?;

        let mut public_key = [0u8; PUBLIC_KEY_LENGTH];

        let sk_to_pk_result = unsafe {
            // SAFETY: `public_key` is valid for writes of `crypto_sign_ed25519_PUBLICKEYBYTES`
            // bytes, and `private_key` for reads of `crypto_sign_ed25519_SECRETKEYBYTES` bytes.
            sodium::crypto_sign_ed25519_sk_to_pk(public_key.as_mut_ptr(), private_key.as_ptr())
        };
        check_sodium!(sk_to_pk_result, "crypto_sign_ed25519_sk_to_pk");

        Ok(Self {
            private_key: private_key.try_clone()?,
            public_key,
        })
    }

    /// Returns the seed which derives this keypair via [`Keypair::from_seed`].
    pub fn get_seed(&self) -> Result<Seed, CryptoError> {
        let mut seed = Seed::new_empty()?;

        let sk_to_seed_result = unsafe {
            // SAFETY: `seed` is valid for writes of `crypto_sign_ed25519_SEEDBYTES` bytes, and
            // the private key for reads of `crypto_sign_ed25519_SECRETKEYBYTES` bytes.
            sodium::crypto_sign_ed25519_sk_to_seed(seed.as_mut_ptr(), self.private_key.as_ptr())
        };
        check_sodium!(sk_to_seed_result, "crypto_sign_ed25519_sk_to_seed");

        Ok(seed)
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

/// Sign `message` with `private_key`, returning `signature ‖ message`.
///
/// The output is always `message.len() + SIGNATURE_LENGTH` bytes long, and can be checked with
/// [`verify`] using the matching public key.
pub fn sign(message: &[u8], private_key: &PrivateKey) -> Result<Vec<u8>, CryptoError> {
    require_init()?;

    let mut signed = vec![0u8; message.len() + SIGNATURE_LENGTH];

    let sign_result = unsafe {
        // SAFETY: `signed` is valid for writes of `message.len() + crypto_sign_ed25519_BYTES`
        // bytes, the documented output size. Sodium ignores the NULL length pointer. `message` is
        // valid for reads of `message.len()` bytes, and `private_key` for reads of
        // `crypto_sign_ed25519_SECRETKEYBYTES` bytes.
        sodium::crypto_sign_ed25519(
            signed.as_mut_ptr(),
            ptr::null_mut(),
            message.as_ptr(),
            message.len() as libc::c_ulonglong,
            private_key.as_ptr(),
        )
    };
    check_sodium!(sign_result, "crypto_sign_ed25519");

    Ok(signed)
}

/// Sign `message` with `private_key`, returning the signature on its own.
///
/// Check the result with [`verify_detached`].
pub fn sign_detached(message: &[u8], private_key: &PrivateKey) -> Result<Signature, CryptoError> {
    require_init()?;

    let mut signature = [0u8; SIGNATURE_LENGTH];

    let sign_result = unsafe {
        // SAFETY: `signature` is valid for writes of `crypto_sign_ed25519_BYTES` bytes. Sodium
        // ignores the NULL length pointer. `message` and `private_key` are valid for reads of
        // their full lengths.
        sodium::crypto_sign_ed25519_detached(
            signature.as_mut_ptr(),
            ptr::null_mut(),
            message.as_ptr(),
            message.len() as libc::c_ulonglong,
            private_key.as_ptr(),
        )
    };
    check_sodium!(sign_result, "crypto_sign_ed25519_detached");

    Ok(Signature(signature))
}

/// Check a `signature ‖ message` payload produced by [`sign`] against `public_key`.
///
/// Returns the message part of `signed_message` if the signature is valid. Returns
/// [`SignError::MalformedPayload`] if `signed_message` is shorter than [`SIGNATURE_LENGTH`], or
/// [`SignError::VerificationFailed`] if the signature does not check out. A valid signature over
/// an empty message returns an empty slice, never an error.
pub fn verify<'a>(
    signed_message: &'a [u8],
    public_key: &PublicKey,
) -> Result<&'a [u8], CryptoError> {
    require_init()?;

    if signed_message.len() < SIGNATURE_LENGTH {
        tracing::debug!(length = signed_message.len(), "signed payload too short");
        return Err(SignError::MalformedPayload {
            length: signed_message.len(),
        }
        .into());
    }

    let verification_result = unsafe {
        // SAFETY: Sodium skips writing the message and its length when given NULL pointers. The
        // signed message is valid for reads of `signed_message.len()` bytes, and `public_key` for
        // reads of `crypto_sign_ed25519_PUBLICKEYBYTES` bytes.
        sodium::crypto_sign_ed25519_open(
            ptr::null_mut(),
            ptr::null_mut(),
            signed_message.as_ptr(),
            signed_message.len() as libc::c_ulonglong,
            public_key.as_ptr(),
        )
    };

    if verification_result == 0 {
        Ok(&signed_message[SIGNATURE_LENGTH..])
    } else {
        tracing::debug!(length = signed_message.len(), "signature verification failed");
        Err(SignError::VerificationFailed.into())
    }
}

/// Check a detached `signature` over `message` against `public_key`.
///
/// Returns [`SignError::VerificationFailed`] if the signature does not check out.
pub fn verify_detached(
    message: &[u8],
    signature: &Signature,
    public_key: &PublicKey,
) -> Result<(), CryptoError> {
    require_init()?;

    let verification_result = unsafe {
        // SAFETY: `signature.0` is `crypto_sign_ed25519_BYTES` bytes, `message` is valid for
        // reads of `message.len()` bytes, and `public_key` is
        // `crypto_sign_ed25519_PUBLICKEYBYTES` bytes.
        sodium::crypto_sign_ed25519_verify_detached(
            signature.0.as_ptr(),
            message.as_ptr(),
            message.len() as libc::c_ulonglong,
            public_key.as_ptr(),
        )
    };

    if verification_result == 0 {
        Ok(())
    } else {
        tracing::debug!(length = message.len(), "detached signature verification failed");
        Err(SignError::VerificationFailed.into())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        sign, sign_detached, verify, verify_detached, Keypair, SignError, Seed, Signature,
        PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH,
    };
    use crate::random::{fill_random, random_u32_in_range};
    use crate::CryptoError;

    #[test]
    fn generated_keypairs_have_expected_shape() -> Result<(), CryptoError> {
        assert_eq!(PRIVATE_KEY_LENGTH, 64);
        assert_eq!(PUBLIC_KEY_LENGTH, 32);
        assert_eq!(SIGNATURE_LENGTH, 64);

        let keypair = Keypair::generate()?;
        assert_eq!(keypair.private_key().len(), 64);
        assert_eq!(keypair.public_key().len(), 32);

        // Sodium's private key format ends with the public key
        assert_eq!(&keypair.private_key()[32..], &keypair.public_key()[..]);

        let rebuilt = Keypair::from_private_key(keypair.private_key())?;
        assert_eq!(rebuilt.public_key(), keypair.public_key());

        let other = Keypair::generate()?;
        assert_ne!(other.public_key(), keypair.public_key());

        Ok(())
    }

    #[test]
    fn keypair_from_seed_vectors() -> Result<(), CryptoError> {
        let seed = Seed::try_from(&[
            0x42, 0x11, 0x51, 0xa4, 0x59, 0xfa, 0xea, 0xde, 0x3d, 0x24, 0x71, 0x15, 0xf9, 0x4a,
            0xed, 0xae, 0x42, 0x31, 0x81, 0x24, 0x09, 0x5a, 0xfa, 0xbe, 0x4d, 0x14, 0x51, 0xa5,
            0x59, 0xfa, 0xed, 0xee,
        ])?;
        let keypair = Keypair::from_seed(&seed)?;

        assert_eq!(
            keypair.public_key(),
            &[
                0xb5, 0x07, 0x6a, 0x84, 0x74, 0xa8, 0x32, 0xda, 0xee, 0x4d, 0xd5, 0xb4, 0x04,
                0x09, 0x83, 0xb6, 0x62, 0x3b, 0x5f, 0x34, 0x4a, 0xca, 0x57, 0xd4, 0xd6, 0xee,
                0x4b, 0xaf, 0x3f, 0x25, 0x9e, 0x6e
            ]
        );
        assert_eq!(&keypair.private_key()[..32], &seed[..]);
        assert_eq!(keypair.get_seed()?, seed);

        Ok(())
    }

    #[test]
    fn sign_and_verify() -> Result<(), CryptoError> {
        let keypair = Keypair::generate()?;

        for length in [0, 1, 16, 128, 1024, 1 << 15] {
            let mut message = vec![0u8; length];
            fill_random(&mut message)?;

            let signed = sign(&message, keypair.private_key())?;
            assert_eq!(signed.len(), length + SIGNATURE_LENGTH);
            assert_eq!(&signed[SIGNATURE_LENGTH..], &message[..]);
            assert_eq!(verify(&signed, keypair.public_key())?, &message[..]);
        }

        Ok(())
    }

    #[test]
    fn signing_is_deterministic() -> Result<(), CryptoError> {
        let keypair = Keypair::generate()?;
        let a = sign(b"hello", keypair.private_key())?;
        let b = sign(b"hello", keypair.private_key())?;
        assert_eq!(a, b);
        let detached = sign_detached(b"hello", keypair.private_key())?;
        assert_eq!(&a[..SIGNATURE_LENGTH], &detached.0[..]);
        Ok(())
    }

    #[test]
    fn empty_message_is_not_a_failure() -> Result<(), CryptoError> {
        let keypair = Keypair::generate()?;
        let signed = sign(&[], keypair.private_key())?;
        assert_eq!(signed.len(), SIGNATURE_LENGTH);
        assert_eq!(verify(&signed, keypair.public_key())?, &[] as &[u8]);
        Ok(())
    }

    #[test]
    fn any_flipped_bit_fails_verification() -> Result<(), CryptoError> {
        let keypair = Keypair::generate()?;
        let signed = sign(b"the bridge is out, take the ford", keypair.private_key())?;

        for byte in 0..signed.len() {
            for bit in 0..8 {
                let mut tampered = signed.clone();
                tampered[byte] ^= 1 << bit;
                assert_eq!(
                    verify(&tampered, keypair.public_key()),
                    Err(CryptoError::Sign(SignError::VerificationFailed))
                );
            }
        }

        Ok(())
    }

    #[test]
    fn wrong_public_key_fails_verification() -> Result<(), CryptoError> {
        let alice = Keypair::generate()?;
        let mallory = Keypair::generate()?;

        let signed = sign(b"hello", alice.private_key())?;
        assert_eq!(
            verify(&signed, mallory.public_key()),
            Err(CryptoError::Sign(SignError::VerificationFailed))
        );

        Ok(())
    }

    #[test]
    fn short_payloads_are_malformed() -> Result<(), CryptoError> {
        let keypair = Keypair::generate()?;

        for length in [0, 1, SIGNATURE_LENGTH - 1] {
            let payload = vec![0u8; length];
            assert_eq!(
                verify(&payload, keypair.public_key()),
                Err(CryptoError::Sign(SignError::MalformedPayload { length }))
            );
        }

        // long enough to parse, but garbage
        let mut payload = vec![0u8; SIGNATURE_LENGTH + random_u32_in_range(0, 64)? as usize];
        fill_random(&mut payload)?;
        assert_eq!(
            verify(&payload, keypair.public_key()),
            Err(CryptoError::Sign(SignError::VerificationFailed))
        );

        Ok(())
    }

    #[test]
    fn sign_and_verify_detached() -> Result<(), CryptoError> {
        let keypair = Keypair::generate()?;

        for length in [0, 16, 128, 1024] {
            let mut message = vec![0u8; length];
            fill_random(&mut message)?;

            let signature = sign_detached(&message, keypair.private_key())?;
            verify_detached(&message, &signature, keypair.public_key())?;

            let mut forged = signature;
            forged.0[0] ^= 0x80;
            assert!(verify_detached(&message, &forged, keypair.public_key())
                .unwrap_err()
                .is_verification_failure());
        }

        Ok(())
    }

    #[test]
    fn single_part_test_vectors() -> Result<(), CryptoError> {
        // RFC 8032, section 7.1, test 1
        let seed = Seed::try_from(&[
            0x9d, 0x61, 0xb1, 0x9d, 0xef, 0xfd, 0x5a, 0x60, 0xba, 0x84, 0x4a, 0xf4, 0x92, 0xec,
            0x2c, 0xc4, 0x44, 0x49, 0xc5, 0x69, 0x7b, 0x32, 0x69, 0x19, 0x70, 0x3b, 0xac, 0x03,
            0x1c, 0xae, 0x7f, 0x60,
        ])?;
        let keypair = Keypair::from_seed(&seed)?;
        assert_eq!(
            keypair.public_key(),
            &[
                0xd7, 0x5a, 0x98, 0x01, 0x82, 0xb1, 0x0a, 0xb7, 0xd5, 0x4b, 0xfe, 0xd3, 0xc9,
                0x64, 0x07, 0x3a, 0x0e, 0xe1, 0x72, 0xf3, 0xda, 0xa6, 0x23, 0x25, 0xaf, 0x02,
                0x1a, 0x68, 0xf7, 0x07, 0x51, 0x1a
            ]
        );
        let expected = Signature([
            0xe5, 0x56, 0x43, 0x00, 0xc3, 0x60, 0xac, 0x72, 0x90, 0x86, 0xe2, 0xcc, 0x80, 0x6e,
            0x82, 0x8a, 0x84, 0x87, 0x7f, 0x1e, 0xb8, 0xe5, 0xd9, 0x74, 0xd8, 0x73, 0xe0, 0x65,
            0x22, 0x49, 0x01, 0x55, 0x5f, 0xb8, 0x82, 0x15, 0x90, 0xa3, 0x3b, 0xac, 0xc6, 0x1e,
            0x39, 0x70, 0x1c, 0xf9, 0xb4, 0x6b, 0xd2, 0x5b, 0xf5, 0xf0, 0x59, 0x5b, 0xbe, 0x24,
            0x65, 0x51, 0x41, 0x43, 0x8e, 0x7a, 0x10, 0x0b,
        ]);
        let signed = sign(&[], keypair.private_key())?;
        assert_eq!(&signed[..], &expected.0[..]);
        verify_detached(&[], &expected, keypair.public_key())?;

        let seed = Seed::try_from(&[
            0x0a, 0x47, 0xd1, 0x04, 0x52, 0xae, 0x2f, 0xeb, 0xec, 0x51, 0x8a, 0x1c, 0x7c, 0x36,
            0x28, 0x90, 0xc3, 0xfc, 0x1a, 0x49, 0xd3, 0x4b, 0x03, 0xb6, 0x46, 0x7d, 0x35, 0xc9,
            0x04, 0xa8, 0x36, 0x2d,
        ])?;
        let keypair = Keypair::from_seed(&seed)?;
        let expected = Signature([
            0x2a, 0x3d, 0x27, 0xdc, 0x40, 0xd0, 0xa8, 0x12, 0x79, 0x49, 0xa3, 0xb7, 0xf9, 0x08,
            0xb3, 0x68, 0x8f, 0x63, 0xb7, 0xf1, 0x4f, 0x65, 0x1a, 0xac, 0xd7, 0x15, 0x94, 0x0b,
            0xdb, 0xe2, 0x7a, 0x08, 0x09, 0xaa, 0xc1, 0x42, 0xf4, 0x7a, 0xb0, 0xe1, 0xe4, 0x4f,
            0xa4, 0x90, 0xba, 0x87, 0xce, 0x53, 0x92, 0xf3, 0x3a, 0x89, 0x15, 0x39, 0xca, 0xf1,
            0xef, 0x4c, 0x36, 0x7c, 0xae, 0x54, 0x50, 0x0c,
        ]);
        let message = [
            0xc9, 0x42, 0xfa, 0x7a, 0xc6, 0xb2, 0x3a, 0xb7, 0xff, 0x61, 0x2f, 0xdc, 0x8e, 0x68,
            0xef, 0x39,
        ];
        let actual = sign_detached(&message, keypair.private_key())?;
        assert_eq!(actual, expected);

        let signed = sign(&message, keypair.private_key())?;
        assert_eq!(&signed[..SIGNATURE_LENGTH], &expected.0[..]);
        assert_eq!(verify(&signed, keypair.public_key())?, &message[..]);

        Ok(())
    }

    #[cfg(feature = "use-serde")]
    #[test]
    fn signature_serde() -> Result<(), CryptoError> {
        let keypair = Keypair::generate()?;
        let signature = sign_detached(b"serialise me", keypair.private_key())?;

        let json = serde_json::to_string(&signature).unwrap();
        let parsed: Signature = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, signature);

        Ok(())
    }
}
