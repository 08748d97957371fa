//! This crate implements the TLSF (Two-Level Segregated Fit) dynamic memory
//! allocation algorithm¹, as a self-contained, OS-backed heap rather than a
//! pool-supplied `no_std` building block.
//!
//!  - **Allocation and deallocation operations complete in constant time.**
//!    TLSF's headline property: a segregated index with a fixed number of
//!    size classes means no operation ever walks a free list.
//!
//!  - **The crate owns its memory.** [`Pool::init`] maps a pool straight from
//!    the OS via `mmap`; there is no need to carve out a `static` array or
//!    borrow from another allocator first.
//!
//!  - **Aligned and resizing allocations are first-class.** `Pool` exposes
//!    `allocate`, `aligned_allocate`, `reallocate`, and `free` directly; no
//!    wrapping `Layout`-juggling facade is required for the common cases.
//!
//! <sub>¹ M. Masmano, I. Ripoll, A. Crespo and J. Real, "TLSF: a new dynamic
//! memory allocator for real-time systems," *Proceedings. 16th Euromicro
//! Conference on Real-Time Systems*, 2004. ECRTS 2004., Catania, Italy, 2004,
//! pp. 79-88, doi: 10.1109/EMRTS.2004.1311009.</sub>
//!
//! # Example
//!
//! ```rust
//! use tlsf_alloc::Pool;
//!
//! // `1 << 16` = 64 KiB of usable pool space.
//! let mut pool = Pool::init(16).expect("mmap failed");
//!
//! unsafe {
//!     let ptr1 = pool.allocate(64).unwrap();
//!     let ptr2 = pool.aligned_allocate(64, 4096).unwrap();
//!     assert_eq!(ptr2.as_ptr() as usize % 4096, 0);
//!
//!     pool.free(ptr1);
//!     pool.free(ptr2);
//! }
//!
//! pool.destroy();
//! ```
//!
//! # Layout of this crate
//!
//! From the leaves up: `platform` wraps the two OS-facing primitives (page
//! mapping and bit scanning); `block` defines the block header shared by
//! free and in-use blocks; `mapping` converts byte counts to (first-level,
//! second-level) size classes; `index` is the segregated free-list index
//! built on top of that mapping; `tlsf` is the engine implementing
//! split-on-allocate and coalesce-on-free; and `pool` ties an engine to an
//! OS-mapped arena behind the public [`Pool`] handle.

mod block;
mod index;
mod mapping;
mod platform;
mod pool;
mod tlsf;

mod error;

pub use error::{AllocError, InitError};
pub use pool::Pool;
