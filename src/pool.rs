//! The OS-backed pool: one `mmap`ed control structure and one `mmap`ed arena,
//! tied together into the public [`Pool`] handle.
use core::ptr::{self, NonNull};

use crate::{
    block::{BlockHeader, Flags, HEADER_SIZE},
    error::{AllocError, InitError},
    platform,
    tlsf::Engine,
};

/// The control structure: the segregated index plus enough bookkeeping to
/// release the arena it governs.
struct Control {
    engine: Engine,
    pool_base: NonNull<u8>,
    pool_size: usize,
}

/// A live allocator instance: one OS mapping holding the [`Control`]
/// structure, and one OS mapping holding the arena it manages.
///
/// `Pool` is neither `Send` nor `Sync` — it holds raw pointers and assumes a
/// single-threaded, non-reentrant caller (see the crate's concurrency
/// notes). A caller wanting a shared, thread-safe allocator is expected to
/// wrap a `Pool` in its own mutex.
pub struct Pool {
    control: NonNull<Control>,
}

impl Pool {
    /// Maps a fresh pool of `1 << power` usable bytes and returns a handle
    /// to it. The entire pool starts out as one free block.
    pub fn init(power: u32) -> Result<Self, InitError> {
        let arena_size = 1usize
            .checked_shl(power)
            .and_then(|n| n.checked_add(HEADER_SIZE))
            .ok_or(InitError::InvalidSize)?;

        let control_size = core::mem::size_of::<Control>();
        let control_mem = platform::map(control_size).ok_or(InitError::OsMapFailed)?;

        let arena_mem = match platform::map(arena_size) {
            Some(mem) => mem,
            None => {
                unsafe { platform::unmap(control_mem, control_size) };
                return Err(InitError::OsMapFailed);
            }
        };

        let control_ptr = control_mem.as_ptr() as *mut Control;
        unsafe {
            ptr::write(
                control_ptr,
                Control {
                    engine: Engine::new(),
                    pool_base: arena_mem,
                    pool_size: arena_size,
                },
            );

            let first_block = arena_mem.as_ptr() as *mut BlockHeader;
            (*first_block).prev_phys = None;
            (*first_block).size = arena_size - HEADER_SIZE;
            (*first_block).flags = Flags::empty();
            (*first_block).flags.set_last_phys(true);
            (*control_ptr)
                .engine
                .insert_block(NonNull::new_unchecked(first_block));
        }

        log::debug!(
            "pool::init(2^{} = {} bytes): control {:p}, arena {:p}",
            power,
            arena_size - HEADER_SIZE,
            control_ptr,
            arena_mem.as_ptr()
        );
        Ok(Self {
            control: unsafe { NonNull::new_unchecked(control_ptr) },
        })
    }

    /// Unmaps both the control structure and the arena it governs,
    /// consuming the handle.
    pub fn destroy(self) {
        let control_size = core::mem::size_of::<Control>();
        unsafe {
            let control = self.control.as_ref();
            let pool_base = control.pool_base;
            let pool_size = control.pool_size;
            log::debug!(
                "pool::destroy: control {:p}, arena {:p} ({} bytes)",
                self.control.as_ptr(),
                pool_base.as_ptr(),
                pool_size
            );
            ptr::drop_in_place(self.control.as_ptr());
            platform::unmap(pool_base, pool_size);
            platform::unmap(self.control.cast(), control_size);
        }
        core::mem::forget(self);
    }

    /// Allocates `size` bytes, returning the payload address.
    pub fn allocate(&mut self, size: usize) -> Result<NonNull<u8>, AllocError> {
        unsafe { self.engine_mut().allocate(size) }
    }

    /// Reallocates the block at `ptr` to `new_size` bytes, moving its
    /// contents if necessary. `ptr` must have been returned by this pool.
    pub fn reallocate(&mut self, ptr: NonNull<u8>, new_size: usize) -> Result<NonNull<u8>, AllocError> {
        unsafe { self.engine_mut().reallocate(ptr, new_size) }
    }

    /// Allocates `size` bytes aligned to `alignment`, which must be a power
    /// of two.
    pub fn aligned_allocate(&mut self, size: usize, alignment: usize) -> Result<NonNull<u8>, AllocError> {
        unsafe { self.engine_mut().aligned_allocate(size, alignment) }
    }

    /// Releases a block previously returned by this pool. `ptr` must not
    /// already have been freed.
    ///
    /// # Safety
    ///
    /// `ptr` must be a live payload pointer previously returned by this pool.
    pub unsafe fn free(&mut self, ptr: NonNull<u8>) {
        self.engine_mut().free(ptr)
    }

    fn engine_mut(&mut self) -> &mut Engine {
        unsafe { &mut self.control.as_mut().engine }
    }
}

impl Drop for Pool {
    fn drop(&mut self) {
        // `destroy` is the intended release path; dropping without calling
        // it would otherwise leak both OS mappings silently.
        log::debug!(
            "pool dropped without destroy() at {:p}; mappings leaked",
            self.control.as_ptr()
        );
    }
}
