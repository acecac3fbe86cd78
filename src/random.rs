//! Random data suitable for cryptographic use.
//!
//! This module wraps Sodium's [`randombytes`
//! API](https://doc.libsodium.org/generating_random_data), which draws from the platform's secure
//! RNG (`getrandom`, `/dev/urandom`, `RtlGenRandom`, ...). Key generation in this crate uses the
//! same source internally; the functions here are for callers that need random bytes of their
//! own, such as message nonces or test payloads.
//!
//! # Examples
//! Using the [rand](https://rust-random.github.io/book)-compatible API:
//!
//! ```rust
//! use rand::prelude::*;
//! use meshkey::random::SodiumRng;
//!
//! let mut rng = SodiumRng;
//! let hop_limit: u8 = rng.gen_range(1..8);
//! assert!((1..8).contains(&hop_limit));
//! ```
//!
//! Using the basic API:
//!
//! ```rust
//! use meshkey::random;
//!
//! let mut nonce = [0u8; 24];
//! random::fill_random(&mut nonce).unwrap();
//! ```

use crate::{require_init, CryptoError};
use libsodium_sys as sodium;
use rand_core::{impls, CryptoRng, Error as RandError, RngCore};
use thiserror::Error;

/// Error type returned if something went wrong in the random module.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum RandomError {
    /// Tried to call [`random_u32_in_range`] with `low` > `high`.
    #[error("lower bound greater than upper bound")]
    BoundsInvalid,
}

/// [rand](https://rust-random.github.io/book)-compatible CSPRNG backed by Sodium.
///
/// Implements `RngCore` and `CryptoRng`, so any `rand` utility accepting an RNG can draw from
/// Sodium's generator.
#[derive(Clone, Copy, Debug)]
pub struct SodiumRng;

impl RngCore for SodiumRng {
    fn next_u32(&mut self) -> u32 {
        // `randombytes_random` cannot fail once Sodium is initialised, and if initialisation
        // failed there is no sensible value to return from an infallible method.
        random_u32().expect("libsodium could not be initialised")
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        fill_random(dest).expect("libsodium could not be initialised")
    }

    #[cfg(feature = "std")]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RandError> {
        fill_random(dest).map_err(RandError::new)
    }

    #[cfg(not(feature = "std"))]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RandError> {
        fill_random(dest).map_err(|_| {
            core::num::NonZeroU32::new(RandError::CUSTOM_START)
                .unwrap()
                .into()
        })
    }
}

impl CryptoRng for SodiumRng {}

/// Returns a random 32-bit integer.
pub fn random_u32() -> Result<u32, CryptoError> {
    require_init()?;

    unsafe {
        // SAFETY: Only requires that Sodium is initialised, which `require_init` ensured.
        Ok(sodium::randombytes_random())
    }
}

/// Returns a uniformly distributed random number in the range `low` (included) to `high`
/// (excluded).
///
/// Prefer this to taking [`random_u32`] modulo some value, which is biased.
pub fn random_u32_in_range(low: u32, high: u32) -> Result<u32, CryptoError> {
    require_init()?;

    if low > high {
        return Err(RandomError::BoundsInvalid.into());
    }

    let unshifted = unsafe {
        // SAFETY: Only requires that Sodium is initialised. An upper bound of 0 returns 0.
        sodium::randombytes_uniform(high - low)
    };

    Ok(low + unshifted)
}

/// Fill `buf` with random data suitable for cryptographic use.
pub fn fill_random(buf: &mut [u8]) -> Result<(), CryptoError> {
    require_init()?;

    unsafe {
        // SAFETY: `buf` is valid for writes of `buf.len()` bytes.
        sodium::randombytes_buf(buf.as_mut_ptr() as *mut libc::c_void, buf.len());
    }

    Ok(())
}
