//! Identity keys for mesh chat peers, built on the [Sodium](https://libsodium.org) cryptographic
//! library.
//!
//! Every peer in the mesh has a single long-term identity: an Ed25519 keypair. The same identity
//! is used for two purposes:
//!
//! * Signing the messages the peer sends, so that any other peer holding its public key can check
//!   where a message came from ([`sign`](mod@sign)).
//! * Key agreement with other peers over Curve25519. Ed25519 and Curve25519 are birationally
//!   equivalent, so an Ed25519 keypair can be mapped onto a Curve25519 keypair without
//!   distributing a second public key ([`convert`], [`curve25519`]).
//!
//! I want to...
//! * Create a new identity
//!     * Use [`generate_key_pair`] or [`sign::Keypair::generate`]
//! * Sign a message so other peers can verify I sent it
//!     * Use [`sign()`] (raw bytes) or [`sign::sign`] (typed keys)
//! * Check a signed message and recover its contents
//!     * Use [`verify()`] or [`sign::verify`]
//! * Get a key-agreement key from a signing identity
//!     * Use [`convert_key_pair`], [`convert_private_key`], [`convert_public_key`], or the typed
//!       functions in [`convert`]
//!
//! The functions re-exported at the crate root accept and return plain byte slices, and validate
//! every length against the [`KeyType`] they are told to expect. They are meant for keys that have
//! just come off the wire or out of storage. Code that already holds typed keys should use the
//! module APIs directly: there, a wrongly-sized key cannot be expressed at all.
//!
//! # Hardened Buffer Types
//! Private keys and seeds are stored in memory allocated by Sodium's secure allocator. This memory
//! is locked (it will not be swapped to disk), surrounded by guard pages, and zeroed when the value
//! is dropped. See the [`mem`] module for the details.
//!
//! # Threads
//! Sodium is initialised lazily by every function in this crate which calls into it. Once
//! initialised, all the Sodium functions used here are thread-safe, so no locking is required to
//! call this crate from several threads at once, and every key type may be sent between threads.

#![cfg_attr(doc_cfg, feature(doc_cfg))]

use libsodium_sys as sodium;
use std::ffi::CStr;
use thiserror::Error;

pub mod convert;
pub mod curve25519;
pub mod identity;
pub mod key;
pub mod mem;
pub mod random;
pub mod sign;

pub use identity::{
    convert_key_pair, convert_private_key, convert_public_key, generate_key_pair, sign, verify,
};
pub use key::{KeyPair, KeyType, PrivateKey, PublicKey};

/// General error type used in this crate.
///
/// Errors raised inside a specific module are wrapped in the matching variant, so matching on the
/// inner enum is always possible:
///
/// ```rust
/// use meshkey::sign::SignError;
/// use meshkey::CryptoError;
///
/// let keypair = meshkey::generate_key_pair().unwrap();
/// let mut signed = meshkey::sign(b"hi", keypair.private_key()).unwrap();
/// signed[0] ^= 1;
///
/// assert!(matches!(
///     meshkey::verify(&signed, keypair.public_key()),
///     Err(CryptoError::Sign(SignError::VerificationFailed))
/// ));
/// ```
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum CryptoError {
    /// A libsodium primitive reported a failure.
    ///
    /// The contained string is the name of the libsodium function which failed (`sodium_init` if
    /// the library could not be initialised). None of these failures are transient, and in the
    /// case of initialisation failure, Sodium is unsafe to use at all, so the operation should be
    /// abandoned.
    #[error("libsodium primitive failed: {0}")]
    PrimitiveFailure(&'static str),

    /// Secure memory could not be allocated, or Sodium's allocator detected misuse.
    #[error("memory management error")]
    MemoryManagement,

    /// A byte buffer did not have the length required for the key type it was declared as.
    #[error("invalid key length: expected {expected}, found {actual}")]
    InvalidKeyLength {
        /// The length required for this key type, in bytes.
        expected: usize,

        /// The length of the buffer provided.
        actual: usize,
    },

    /// An error occurred in the [`sign`](mod@sign) module.
    #[error("signature error")]
    Sign(#[from] sign::SignError),

    /// An error occurred in the [`convert`] module.
    #[error("key conversion error")]
    Convert(#[from] convert::ConvertError),

    /// An error occurred in the [`curve25519`] module.
    #[error("curve25519 error")]
    Curve25519(#[from] curve25519::Curve25519Error),

    /// An error occurred in the [`random`] module.
    #[error("PRNG error")]
    Random(#[from] random::RandomError),
}

impl CryptoError {
    /// Returns `true` if this error means a signature did not authenticate its message.
    ///
    /// Callers receiving signed data off the network generally want to drop the message quietly
    /// in this case, while any other error indicates a bug or a broken environment.
    pub fn is_verification_failure(&self) -> bool {
        matches!(self, Self::Sign(sign::SignError::VerificationFailed))
    }
}

/// Return early with [`CryptoError::PrimitiveFailure`] if a libsodium call returned a non-zero
/// status.
macro_rules! check_sodium {
    ($result:expr, $name:literal) => {
        if $result != 0 {
            tracing::error!(function = $name, status = $result, "libsodium call failed");
            return Err($crate::CryptoError::PrimitiveFailure($name));
        }
    };
}

pub(crate) use check_sodium;

/// Attempt to initialise Sodium.
///
/// Crates using this one never need to call this: it is called internally wherever Sodium is
/// about to be used. Returns `Ok(0)` if Sodium was initialised by this call, `Ok(1)` if it had
/// already been initialised, or [`CryptoError::PrimitiveFailure`] if initialisation failed.
fn require_init() -> Result<libc::c_int, CryptoError> {
    let init_status = unsafe {
        // SAFETY: `sodium_init` may be called any number of times, from any thread. Once it has
        // returned successfully, the rest of the library is thread-safe.
        sodium::sodium_init()
    };

    // -1 on failure, 0 on first initialisation, 1 if already initialised
    if init_status < 0 {
        tracing::error!("sodium_init failed, libsodium is unusable");
        return Err(CryptoError::PrimitiveFailure("sodium_init"));
    }

    Ok(init_status)
}

/// Returns the version string of the linked libsodium, e.g. `"1.0.19"`.
///
/// This is diagnostic information only (useful in bug reports from peers), and has no effect on
/// any operation in this crate.
pub fn sodium_version() -> &'static str {
    let version = unsafe {
        // SAFETY: `sodium_version_string` returns a pointer to a static, NUL-terminated string
        // compiled into the library. It does not require `sodium_init` to have been called.
        CStr::from_ptr(sodium::sodium_version_string())
    };

    version.to_str().unwrap_or("unknown")
}

/// Returns the `(major, minor)` library version of the linked libsodium.
///
/// Note that this is the shared-library ABI version, which is numbered independently of the
/// release version returned by [`sodium_version`].
pub fn sodium_library_version() -> (i32, i32) {
    unsafe {
        // SAFETY: Both functions simply return constants compiled into the library.
        (
            sodium::sodium_library_version_major() as i32,
            sodium::sodium_library_version_minor() as i32,
        )
    }
}
