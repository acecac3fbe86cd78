//! Byte-level entry points, for keys and payloads straight off the wire.
//!
//! Everything here takes plain byte slices, checks their lengths against the [`KeyType`] they
//! are declared as, and then hands off to the typed APIs in [`crate::sign`] and
//! [`crate::convert`]. These functions are re-exported at the crate root.
//!
//! # Examples
//! ```rust
//! use meshkey::KeyType;
//!
//! let identity = meshkey::generate_key_pair().unwrap();
//! let signed = meshkey::sign(b"hello", identity.private_key()).unwrap();
//! assert_eq!(meshkey::verify(&signed, identity.public_key()).unwrap(), b"hello");
//!
//! let agreement = meshkey::convert_key_pair(&identity, KeyType::Curve25519).unwrap();
//! assert_eq!(agreement.key_type(), KeyType::Curve25519);
//!
//! // A peer who received our Ed25519 public key can derive our Curve25519 one
//! let theirs = meshkey::convert_public_key(
//!     identity.public_key(),
//!     KeyType::Ed25519,
//!     KeyType::Curve25519,
//! )
//! .unwrap();
//! assert_eq!(theirs.as_bytes(), agreement.public_key());
//! ```

use crate::key::{KeyPair, KeyType, PrivateKey, PublicKey};
use crate::{convert, CryptoError};

/// Generate a new Ed25519 identity keypair.
///
/// The result always has type [`KeyType::Ed25519`], a 32-byte public key and a 64-byte private
/// key.
pub fn generate_key_pair() -> Result<KeyPair, CryptoError> {
    crate::sign::Keypair::generate().map(KeyPair::Ed25519)
}

/// Sign `data` with an Ed25519 `private_key`, returning `signature ‖ data`.
///
/// Returns [`CryptoError::InvalidKeyLength`] unless `private_key` is 64 bytes long. The output
/// is `data.len() + 64` bytes long.
pub fn sign(data: &[u8], private_key: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let private_key = crate::sign::PrivateKey::try_from(private_key)?;
    crate::sign::sign(data, &private_key)
}

/// Check a `signature ‖ data` payload against an Ed25519 `public_key`, returning `data`.
///
/// Returns [`CryptoError::InvalidKeyLength`] unless `public_key` is 32 bytes long,
/// [`SignError::MalformedPayload`](crate::sign::SignError::MalformedPayload) if
/// `signed_payload` is shorter than a signature, and
/// [`SignError::VerificationFailed`](crate::sign::SignError::VerificationFailed) if the signature
/// does not check out.
pub fn verify(signed_payload: &[u8], public_key: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let public_key = match PublicKey::from_bytes(KeyType::Ed25519, public_key)? {
        PublicKey::Ed25519(key) => key,
        PublicKey::Curve25519(_) => unreachable!("from_bytes returns the requested key type"),
    };

    crate::sign::verify(signed_payload, &public_key).map(<[u8]>::to_vec)
}

/// Convert `keypair` to type `to`, returning a new keypair.
///
/// See [`convert::key_pair`].
pub fn convert_key_pair(keypair: &KeyPair, to: KeyType) -> Result<KeyPair, CryptoError> {
    convert::key_pair(keypair, to)
}

/// Convert the private key `bytes`, of type `from`, to type `to`.
///
/// Unsupported conversions fail with
/// [`ConvertError::UnsupportedConversion`](convert::ConvertError::UnsupportedConversion) whatever
/// `bytes` contains; otherwise, `bytes` must be `from.private_key_length()` bytes long.
pub fn convert_private_key(
    bytes: &[u8],
    from: KeyType,
    to: KeyType,
) -> Result<PrivateKey, CryptoError> {
    convert::check_supported(from, to)?;
    convert::private_key(&PrivateKey::from_bytes(from, bytes)?, to)
}

/// Convert the public key `bytes`, of type `from`, to type `to`.
///
/// Unsupported conversions fail with
/// [`ConvertError::UnsupportedConversion`](convert::ConvertError::UnsupportedConversion) whatever
/// `bytes` contains; otherwise, `bytes` must be `from.public_key_length()` bytes long.
pub fn convert_public_key(
    bytes: &[u8],
    from: KeyType,
    to: KeyType,
) -> Result<PublicKey, CryptoError> {
    convert::check_supported(from, to)?;
    convert::public_key(&PublicKey::from_bytes(from, bytes)?, to)
}

#[cfg(test)]
mod tests {
    use super::{
        convert_key_pair, convert_private_key, convert_public_key, generate_key_pair, sign, verify,
    };
    use crate::convert::ConvertError;
    use crate::key::KeyType;
    use crate::random::SodiumRng;
    use crate::sign::SignError;
    use crate::CryptoError;
    use rand::{Rng, RngCore};
    use std::thread;

    #[test]
    fn generated_pairs_are_ed25519() -> Result<(), CryptoError> {
        for _ in 0..8 {
            let keypair = generate_key_pair()?;
            assert_eq!(keypair.key_type(), KeyType::Ed25519);
            assert_eq!(keypair.public_key().len(), 32);
            assert_eq!(keypair.private_key().len(), 64);
        }
        Ok(())
    }

    #[test]
    fn hello_scenario() -> Result<(), CryptoError> {
        let keypair = generate_key_pair()?;
        let other = generate_key_pair()?;

        let signed = sign(b"hello", keypair.private_key())?;
        assert_eq!(verify(&signed, keypair.public_key())?, b"hello");
        assert_eq!(
            verify(&signed, other.public_key()),
            Err(CryptoError::Sign(SignError::VerificationFailed))
        );

        let converted = convert_key_pair(&keypair, KeyType::Curve25519)?;
        assert_eq!(converted.key_type(), KeyType::Curve25519);
        assert_eq!(converted.public_key().len(), 32);
        assert_eq!(converted.private_key().len(), 32);

        Ok(())
    }

    #[test]
    fn round_trip_random_payloads() -> Result<(), CryptoError> {
        let mut rng = SodiumRng;
        let keypair = generate_key_pair()?;

        for _ in 0..64 {
            let mut data = vec![0u8; rng.gen_range(0..2048)];
            rng.fill_bytes(&mut data);

            let signed = sign(&data, keypair.private_key())?;
            assert_eq!(signed.len(), data.len() + 64);
            assert_eq!(verify(&signed, keypair.public_key())?, data);
        }

        Ok(())
    }

    #[test]
    fn random_tampering_is_detected() -> Result<(), CryptoError> {
        let mut rng = SodiumRng;
        let keypair = generate_key_pair()?;
        let signed = sign(b"route via node 7f", keypair.private_key())?;

        for _ in 0..256 {
            let mut tampered = signed.clone();
            let byte = rng.gen_range(0..tampered.len());
            tampered[byte] ^= 1 << rng.gen_range(0..8);

            let err = verify(&tampered, keypair.public_key()).unwrap_err();
            assert!(err.is_verification_failure());
        }

        Ok(())
    }

    #[test]
    fn key_lengths_are_checked() -> Result<(), CryptoError> {
        let keypair = generate_key_pair()?;

        assert_eq!(
            sign(b"hello", &keypair.private_key()[..32]).unwrap_err(),
            CryptoError::InvalidKeyLength {
                expected: 64,
                actual: 32
            }
        );

        let signed = sign(b"hello", keypair.private_key())?;
        assert_eq!(
            verify(&signed, &[0u8; 16]).unwrap_err(),
            CryptoError::InvalidKeyLength {
                expected: 32,
                actual: 16
            }
        );
        assert_eq!(
            verify(&signed[..63], keypair.public_key()).unwrap_err(),
            CryptoError::Sign(SignError::MalformedPayload { length: 63 })
        );

        Ok(())
    }

    #[test]
    fn reverse_conversion_is_unsupported_for_any_input() {
        let expected = CryptoError::Convert(ConvertError::UnsupportedConversion {
            from: KeyType::Curve25519,
            to: KeyType::Ed25519,
        });

        for length in [0, 16, 32, 64] {
            let bytes = vec![0x5a; length];
            assert_eq!(
                convert_private_key(&bytes, KeyType::Curve25519, KeyType::Ed25519).unwrap_err(),
                expected
            );
            assert_eq!(
                convert_public_key(&bytes, KeyType::Curve25519, KeyType::Ed25519).unwrap_err(),
                expected
            );
        }
    }

    #[test]
    fn byte_conversions() -> Result<(), CryptoError> {
        let keypair = generate_key_pair()?;
        let converted = convert_key_pair(&keypair, KeyType::Curve25519)?;

        let private = convert_private_key(
            keypair.private_key(),
            KeyType::Ed25519,
            KeyType::Curve25519,
        )?;
        assert_eq!(private.key_type(), KeyType::Curve25519);
        assert_eq!(private.as_bytes(), converted.private_key());

        let public =
            convert_public_key(keypair.public_key(), KeyType::Ed25519, KeyType::Curve25519)?;
        assert_eq!(public.as_bytes(), converted.public_key());

        // same type: byte-identical copy
        let copy = convert_public_key(keypair.public_key(), KeyType::Ed25519, KeyType::Ed25519)?;
        assert_eq!(copy.as_bytes(), keypair.public_key());

        assert_eq!(
            convert_private_key(&[0u8; 32], KeyType::Ed25519, KeyType::Curve25519).unwrap_err(),
            CryptoError::InvalidKeyLength {
                expected: 64,
                actual: 32
            }
        );
        assert_eq!(
            convert_public_key(&[0u8; 31], KeyType::Ed25519, KeyType::Curve25519).unwrap_err(),
            CryptoError::InvalidKeyLength {
                expected: 32,
                actual: 31
            }
        );

        Ok(())
    }

    #[test]
    fn keys_cross_threads() -> Result<(), CryptoError> {
        let workers: Vec<_> = (0..4)
            .map(|i| {
                thread::spawn(move || -> Result<_, CryptoError> {
                    let keypair = generate_key_pair()?;
                    let message = format!("worker {}", i).into_bytes();
                    let signed = sign(&message, keypair.private_key())?;
                    Ok((keypair, message, signed))
                })
            })
            .collect();

        for worker in workers {
            let (keypair, message, signed) = worker.join().expect("worker panicked")?;
            assert_eq!(verify(&signed, keypair.public_key())?, message);
            convert_key_pair(&keypair, KeyType::Curve25519)?;
        }

        Ok(())
    }
}
