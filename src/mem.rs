//! Hardened memory for secret key material.
//!
//! Private keys and seeds in this crate never live in ordinary heap or stack memory. They are
//! stored in regions allocated with Sodium's [secure memory
//! functions](https://doc.libsodium.org/memory_management), which:
//!
//! * place the region directly before a guard page, with a canary and a second guard page in
//!   front of it, so overruns crash the process instead of silently reading neighbouring data,
//! * lock the region so it is not swapped to disk or written into core dumps,
//! * zero the region when it is freed, in a way the optimiser cannot remove.
//!
//! This is far more expensive than the system allocator, so only secret values are stored this
//! way. Public keys and signatures are plain arrays.
//!
//! Types backed by this memory are created with the crate-internal `hardened_buffer!` macro. They
//! dereference to `[u8; N]`, so they can be read and written like arrays, but their `Debug` output
//! never shows the contents, equality is constant-time, and cloning is fallible ([`try_clone`]
//! returns a `Result`, since Sodium's allocator can run out of locked memory long before the
//! system allocator runs out of memory).
//!
//! [`try_clone`]: crate::sign::PrivateKey::try_clone

use crate::{require_init, CryptoError};
use libsodium_sys as sodium;
use std::alloc::Layout;
use std::ptr::NonNull;

/// Creates a fixed-size type backed by hardened memory, for storing secret values.
///
/// `hardened_buffer!(Name(Size))` creates `Name`, which owns `Size` bytes of hardened memory and
/// implements `Deref`/`DerefMut` to `[u8; Size]`, `AsRef`, `AsMut`, constant-time `PartialEq`/`Eq`,
/// a contents-free `Debug`, and `TryFrom<&[u8]>`, which fails with
/// [`CryptoError::InvalidKeyLength`] if the slice is the wrong length.
macro_rules! hardened_buffer {
    ( $( $(#[$metadata:meta])* $vis:vis $name:ident($size:expr)$(;)? )* ) => {
        $(
            $(#[$metadata])*
            $vis struct $name {
                ptr: std::ptr::NonNull<[u8; $size]>,
                _marker: std::marker::PhantomData<[u8; $size]>,
            }

            impl $name {
                /// The length of this type, in bytes.
                pub const LENGTH: usize = $size as usize;

                /// Create a new instance of this type, filled with zeroes.
                pub fn new_empty() -> Result<Self, $crate::CryptoError> {
                    let ptr = unsafe {
                        // SAFETY: `malloc` returns memory sized and aligned for a `[u8; $size]`,
                        // owned by this value alone and freed exactly once, in `drop`. Any bytes
                        // are a valid `[u8; $size]`, and we zero them before handing the value
                        // out.
                        let mut ptr: std::ptr::NonNull<[u8; $size]> = $crate::mem::malloc()?;
                        $crate::mem::clear(ptr.as_mut())?;
                        ptr
                    };

                    Ok(Self {
                        ptr,
                        _marker: std::marker::PhantomData,
                    })
                }

                /// Zero the contents of the buffer, in a way the compiler cannot optimise away.
                ///
                /// This happens automatically on drop.
                pub fn zero(&mut self) -> Result<(), $crate::CryptoError> {
                    $crate::mem::clear(self.as_mut())
                }

                /// Copy this buffer into a newly allocated one.
                ///
                /// This can fail, since Sodium's allocator may be unable to lock more memory.
                pub fn try_clone(&self) -> Result<Self, $crate::CryptoError> {
                    let mut new_buf = Self::new_empty()?;
                    new_buf.copy_from_slice(self.as_ref());
                    Ok(new_buf)
                }
            }

            impl Drop for $name {
                fn drop(&mut self) {
                    unsafe {
                        // SAFETY: `self.ptr` came from `mem::malloc` in `new_empty` and is only
                        // freed here. `drop` runs at most once, and no reference to the memory
                        // can outlive `self`.
                        $crate::mem::free(self.ptr);
                    }
                }
            }

            // SAFETY: The buffer exclusively owns its allocation and has no interior mutability,
            // so it is as thread-safe as the `[u8; $size]` it stands in for.
            unsafe impl Send for $name {}
            unsafe impl Sync for $name {}

            impl TryFrom<&[u8]> for $name {
                type Error = $crate::CryptoError;

                fn try_from(buf: &[u8]) -> Result<Self, Self::Error> {
                    if buf.len() != $size {
                        return Err($crate::CryptoError::InvalidKeyLength {
                            expected: $size,
                            actual: buf.len(),
                        });
                    }

                    let mut new = Self::new_empty()?;
                    new.copy_from_slice(buf);
                    Ok(new)
                }
            }

            impl TryFrom<&[u8; $size]> for $name {
                type Error = $crate::CryptoError;

                fn try_from(buf: &[u8; $size]) -> Result<Self, Self::Error> {
                    let mut new = Self::new_empty()?;
                    new.copy_from_slice(buf);
                    Ok(new)
                }
            }

            impl std::convert::AsRef<[u8; $size]> for $name {
                fn as_ref(&self) -> &[u8; $size] {
                    // SAFETY: The allocation is valid and initialised for as long as `self` is,
                    // and the returned reference cannot outlive `self`.
                    unsafe { self.ptr.as_ref() }
                }
            }

            impl std::convert::AsMut<[u8; $size]> for $name {
                fn as_mut(&mut self) -> &mut [u8; $size] {
                    // SAFETY: As for `as_ref`; `&mut self` guarantees the reference is unique.
                    unsafe { self.ptr.as_mut() }
                }
            }

            impl std::ops::Deref for $name {
                type Target = [u8; $size];

                fn deref(&self) -> &Self::Target {
                    self.as_ref()
                }
            }

            impl std::ops::DerefMut for $name {
                fn deref_mut(&mut self) -> &mut Self::Target {
                    self.as_mut()
                }
            }

            impl std::fmt::Debug for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}([u8; {}])", stringify!($name), $size)
                }
            }

            impl std::cmp::PartialEq<Self> for $name {
                fn eq(&self, other: &Self) -> bool {
                    // Both sides are `$size` bytes, so the only possible failure is
                    // initialisation, which already succeeded when `self` was allocated.
                    $crate::mem::eq(self.as_ref(), other.as_ref()).unwrap_or(false)
                }
            }

            impl std::cmp::Eq for $name {}
        )*
    };
}

pub(crate) use hardened_buffer;

/// Allocate hardened memory large enough for a `T`.
///
/// # Safety
/// The returned memory is uninitialised and lives outside Rust's ownership model. It must be
/// initialised before it is read, and released exactly once with [`free`].
pub(crate) unsafe fn malloc<T>() -> Result<NonNull<T>, CryptoError> {
    require_init()?;

    // Sodium places the region at the end of a page, so padding the size up to a multiple of the
    // alignment is enough to keep the start of the region aligned.
    let layout = Layout::new::<T>().pad_to_align();
    let ptr = sodium::sodium_malloc(layout.size()) as *mut T;

    NonNull::new(ptr).ok_or_else(|| {
        tracing::error!(size = layout.size(), "sodium_malloc failed");
        CryptoError::MemoryManagement
    })
}

/// Release memory obtained from [`malloc`].
///
/// Sodium terminates the process here if the canary in front of the region was overwritten.
///
/// # Safety
/// `ptr` must have come from [`malloc`], must not have been freed already, and must not be used
/// afterwards.
pub(crate) unsafe fn free<T>(ptr: NonNull<T>) {
    sodium::sodium_free(ptr.as_ptr() as *mut libc::c_void)
}

/// Constant-time comparison of two byte slices.
///
/// For slices of a given length, the time taken does not depend on their contents. Slices of
/// different lengths are never equal.
pub fn eq(a: &[u8], b: &[u8]) -> Result<bool, CryptoError> {
    require_init()?;

    if a.len() != b.len() {
        return Ok(false);
    }

    let comparison_result = unsafe {
        // SAFETY: Both pointers are valid for reads of `a.len()` bytes, as the lengths are equal.
        sodium::sodium_memcmp(
            a.as_ptr() as *const libc::c_void,
            b.as_ptr() as *const libc::c_void,
            a.len(),
        )
    };

    Ok(comparison_result == 0)
}

/// Zero `buf` in a way the compiler will not remove as a dead store.
pub fn clear(buf: &mut [u8]) -> Result<(), CryptoError> {
    require_init()?;

    unsafe {
        // SAFETY: `buf` is valid for writes of `buf.len()` bytes, and zero is a valid `u8`.
        sodium::sodium_memzero(buf.as_mut_ptr() as *mut libc::c_void, buf.len());
    }

    Ok(())
}
