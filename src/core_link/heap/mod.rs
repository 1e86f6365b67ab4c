//! Heap adapter.
//!
//! [`ProcessHeap`] turns one heap service into the three operations the
//! loader uses: a raising allocation, a zeroing allocation that reports
//! failure with `None`, and a release.

use core::ptr::NonNull;

use crate::core_link::bootstrapper::types::{DWORD, HEAP_GENERATE_EXCEPTIONS, HEAP_ZERO_MEMORY};

pub mod arena;
#[cfg(windows)]
pub mod win32;

/// Operating system heap facility, in the shape of `HeapAlloc`/`HeapFree`.
///
/// # Safety
///
/// Implementors must return blocks of at least the requested size that stay
/// valid until passed back to `free`, honor `HEAP_ZERO_MEMORY`, and accept
/// concurrent calls from any thread.
pub unsafe trait HeapService: Sync {
    /// Requests `size` bytes. Returns null on exhaustion, unless the service
    /// raises on its own when `flags` carries `HEAP_GENERATE_EXCEPTIONS`.
    fn alloc(&self, flags: DWORD, size: usize) -> *mut u8;

    /// Returns `block` to the heap. Reports whether the service accepted it.
    ///
    /// # Safety
    ///
    /// `block` must be non-null and come from `alloc` on this same service.
    unsafe fn free(&self, flags: DWORD, block: *mut u8) -> bool;
}

unsafe impl<T: HeapService + ?Sized> HeapService for &T {
    fn alloc(&self, flags: DWORD, size: usize) -> *mut u8 {
        (**self).alloc(flags, size)
    }

    unsafe fn free(&self, flags: DWORD, block: *mut u8) -> bool {
        (**self).free(flags, block)
    }
}

/// Allocation context bound to one heap service.
pub struct ProcessHeap<H> {
    service: H,
}

impl<H: HeapService> ProcessHeap<H> {
    pub const fn new(service: H) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &H {
        &self.service
    }

    /// Allocates `size` uninitialized bytes.
    ///
    /// Never returns on exhaustion: the Windows heap raises
    /// `STATUS_NO_MEMORY`, and a service that hands back null ends in a panic.
    /// `size == 0` is passed through to the service unchanged.
    pub fn allocate(&self, size: usize) -> NonNull<u8> {
        match NonNull::new(self.service.alloc(HEAP_GENERATE_EXCEPTIONS, size)) {
            Some(block) => block,
            None => exhausted(size),
        }
    }

    /// Allocates `size` zeroed bytes, or `None` when the heap is exhausted.
    pub fn allocate_zeroed(&self, size: usize) -> Option<NonNull<u8>> {
        NonNull::new(self.service.alloc(HEAP_ZERO_MEMORY, size))
    }

    /// Returns a block to the heap. Null is ignored.
    ///
    /// # Safety
    ///
    /// `block` must come from `allocate`/`allocate_zeroed` on this heap and
    /// must not be used afterwards.
    pub unsafe fn release(&self, block: *mut u8) {
        if block.is_null() {
            return;
        }
        self.service.free(0, block);
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn exhausted(size: usize) -> ! {
    tracing::error!(size = size, "process heap exhausted");
    panic!("heap exhausted allocating {size} bytes")
}
