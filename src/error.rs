//! The error taxonomy surfaced by the allocator's public operations.
use core::fmt;

/// An error returned by [`crate::Pool::allocate`], [`crate::Pool::reallocate`],
/// or [`crate::Pool::aligned_allocate`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AllocError {
    /// The requested size (or, for [`crate::Pool::aligned_allocate`], the
    /// requested alignment) is not a value the allocator can ever satisfy:
    /// a zero byte count, or an alignment that isn't a power of two.
    InvalidSize,
    /// No free block large enough for the request exists in the pool.
    OutOfMemory,
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize => write!(f, "invalid allocation size or alignment"),
            Self::OutOfMemory => write!(f, "out of memory"),
        }
    }
}

impl std::error::Error for AllocError {}

/// An error returned by [`crate::Pool::init`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InitError {
    /// The OS declined to map the requested number of bytes.
    OsMapFailed,
    /// `power` does not describe a representable, non-zero pool size.
    InvalidSize,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OsMapFailed => write!(f, "the operating system could not map the pool"),
            Self::InvalidSize => write!(f, "invalid pool size"),
        }
    }
}

impl std::error::Error for InitError {}
