//! OS page mapping and portable bit-scan primitives.
//!
//! These are treated as an opaque capability by the rest of the crate: "map
//! `n` bytes of zero-initialised, read-write virtual memory" and "unmap a
//! previous mapping". Everything above this module reaches the OS only
//! through [`map`] and [`unmap`].
use core::ptr::NonNull;

/// Requests `size` bytes of zero-initialised, read-write virtual memory from
/// the OS.
///
/// Returns `None` if the OS declines the mapping. `size` must be non-zero.
#[cfg(unix)]
pub fn map(size: usize) -> Option<NonNull<u8>> {
    debug_assert!(size != 0);
    // Safety: `MAP_ANONYMOUS` guarantees the OS hands back zeroed pages, which
    // is load-bearing: the pool's first block header is read (by
    // `prev_phys`/`size`/`flags` accesses) before anything writes it.
    let ptr = unsafe {
        libc::mmap(
            core::ptr::null_mut(),
            size,
            libc::PROT_READ | libc::PROT_WRITE,
            libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
            -1,
            0,
        )
    };

    if ptr == libc::MAP_FAILED {
        log::debug!("platform::map({}) failed", size);
        None
    } else {
        log::debug!("platform::map({}) = {:p}", size, ptr);
        NonNull::new(ptr as *mut u8)
    }
}

/// Returns a previous [`map`] allocation of `size` bytes starting at `ptr`
/// to the OS.
///
/// # Safety
///
/// `[ptr, ptr + size)` must be a mapping previously returned by [`map`] with
/// the same `size`, and must not be accessed again afterwards.
#[cfg(unix)]
pub unsafe fn unmap(ptr: NonNull<u8>, size: usize) {
    log::debug!("platform::unmap({:p}, {})", ptr.as_ptr(), size);
    libc::munmap(ptr.as_ptr() as *mut libc::c_void, size);
}

/// Returns the index of the most significant set bit of `value`, or `None`
/// if `value` is zero.
///
/// This is the portable equivalent of `BSR`/`CLZ`.
#[inline]
pub fn bit_scan_reverse_u32(value: u32) -> Option<u32> {
    if value == 0 {
        None
    } else {
        Some(31 - value.leading_zeros())
    }
}

/// Returns the index of the least significant set bit of `value`, or `None`
/// if `value` is zero.
///
/// This is the portable equivalent of `BSF`/`CTZ`.
#[inline]
pub fn bit_scan_forward_u32(value: u32) -> Option<u32> {
    if value == 0 {
        None
    } else {
        Some(value.trailing_zeros())
    }
}

/// Like [`bit_scan_reverse_u32`], but for a `usize`-wide value. Used to find
/// `⌊log₂(n)⌋` when mapping a byte count to a first-level index.
#[inline]
pub fn bit_scan_reverse_usize(value: usize) -> Option<u32> {
    if value == 0 {
        None
    } else {
        Some(usize::BITS - 1 - value.leading_zeros())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_scan_reverse_zero_is_none() {
        assert_eq!(bit_scan_reverse_u32(0), None);
        assert_eq!(bit_scan_reverse_usize(0), None);
    }

    #[test]
    fn bit_scan_forward_zero_is_none() {
        assert_eq!(bit_scan_forward_u32(0), None);
    }

    #[test]
    fn bit_scan_matches_naive() {
        for n in 1u32..=4096 {
            let msb = 31 - n.leading_zeros();
            let lsb = n.trailing_zeros();
            assert_eq!(bit_scan_reverse_u32(n), Some(msb));
            assert_eq!(bit_scan_forward_u32(n), Some(lsb));
        }
    }

    #[test]
    fn map_unmap_round_trip() {
        let size = 1 << 16;
        let ptr = map(size).expect("map should succeed");
        // The OS guarantees zeroed pages.
        unsafe {
            assert_eq!(*ptr.as_ptr(), 0);
        }
        unsafe { unmap(ptr, size) };
    }
}
