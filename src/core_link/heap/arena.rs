//! Heap service over a fixed memory region.
//!
//! Used where no OS heap is available, or when the loader keeps its heap
//! inside its own image. `linked_list_allocator` manages the region; each
//! block carries a small header with its size, so `free` needs only the
//! pointer, exactly like `HeapFree`.

use core::alloc::Layout;
use core::ptr::{null_mut, NonNull};

use linked_list_allocator::LockedHeap;

use crate::core_link::bootstrapper::config::{BLOCK_ALIGN, BLOCK_HEADER};
use crate::core_link::bootstrapper::types::{DWORD, HEAP_ZERO_MEMORY};
use crate::core_link::crt::memset;
use crate::core_link::heap::HeapService;

pub struct ArenaHeap {
    inner: LockedHeap,
}

impl ArenaHeap {
    /// An arena with no region yet. Every request fails until [`init`](Self::init).
    pub const fn empty() -> Self {
        Self { inner: LockedHeap::empty() }
    }

    /// # Safety
    ///
    /// `bottom..bottom + size` must be valid, writable, unused by anything
    /// else, and outlive the arena.
    pub unsafe fn new(bottom: *mut u8, size: usize) -> Self {
        Self { inner: LockedHeap::new(bottom, size) }
    }

    pub fn from_region(region: &'static mut [u8]) -> Self {
        unsafe { Self::new(region.as_mut_ptr(), region.len()) }
    }

    /// Hands a region to an empty arena.
    ///
    /// # Safety
    ///
    /// Same as [`new`](Self::new); must be called once, before any allocation.
    pub unsafe fn init(&self, bottom: *mut u8, size: usize) {
        self.inner.lock().init(bottom, size);
    }

    /// Bytes currently handed out, headers included.
    pub fn used(&self) -> usize {
        self.inner.lock().used()
    }

    pub fn free_bytes(&self) -> usize {
        self.inner.lock().free()
    }

    pub fn size(&self) -> usize {
        self.inner.lock().size()
    }

    fn layout_for(size: usize) -> Option<Layout> {
        let total = size.checked_add(BLOCK_HEADER)?;
        Layout::from_size_align(total, BLOCK_ALIGN).ok()
    }
}

unsafe impl HeapService for ArenaHeap {
    fn alloc(&self, flags: DWORD, size: usize) -> *mut u8 {
        let Some(layout) = Self::layout_for(size) else {
            return null_mut();
        };
        let Ok(base) = self.inner.lock().allocate_first_fit(layout) else {
            return null_mut();
        };
        unsafe {
            (base.as_ptr() as *mut usize).write(size);
            let block = base.as_ptr().add(BLOCK_HEADER);
            if flags & HEAP_ZERO_MEMORY != 0 {
                memset(block, 0, size);
            }
            block
        }
    }

    unsafe fn free(&self, _flags: DWORD, block: *mut u8) -> bool {
        let base = block.sub(BLOCK_HEADER);
        let size = (base as *const usize).read();
        let Some(layout) = Self::layout_for(size) else {
            return false;
        };
        self.inner.lock().deallocate(NonNull::new_unchecked(base), layout);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_link::bootstrapper::types::HEAP_GENERATE_EXCEPTIONS;

    fn arena(size: usize) -> ArenaHeap {
        ArenaHeap::from_region(Box::leak(vec![0u8; size].into_boxed_slice()))
    }

    #[test]
    fn empty_arena_refuses_everything() {
        let heap = ArenaHeap::empty();
        assert!(heap.alloc(0, 8).is_null());
        assert_eq!(heap.used(), 0);
    }

    #[test]
    fn late_init_makes_room() {
        let heap = ArenaHeap::empty();
        let region: &'static mut [u8] = Box::leak(vec![0u8; 4096].into_boxed_slice());
        unsafe { heap.init(region.as_mut_ptr(), region.len()) };
        let block = heap.alloc(0, 64);
        assert!(!block.is_null());
        assert!(unsafe { heap.free(0, block) });
    }

    #[test]
    fn blocks_are_aligned() {
        let heap = arena(64 * 1024);
        let blocks: Vec<*mut u8> = (1..32).map(|n| heap.alloc(0, n * 3)).collect();
        for &b in &blocks {
            assert!(!b.is_null());
            assert_eq!(b as usize % BLOCK_ALIGN, 0);
        }
        for b in blocks {
            unsafe { heap.free(0, b) };
        }
        assert_eq!(heap.used(), 0);
    }

    #[test]
    fn exhaustion_is_null_even_with_raise_flag() {
        let heap = arena(4096);
        assert!(heap.alloc(HEAP_GENERATE_EXCEPTIONS, 1 << 20).is_null());
        assert!(heap.alloc(0, usize::MAX).is_null());
    }

    #[test]
    fn freed_space_is_reused() {
        let heap = arena(4096);
        let before = heap.free_bytes();
        let a = heap.alloc(0, 1024);
        assert!(heap.free_bytes() < before);
        unsafe { heap.free(0, a) };
        assert_eq!(heap.free_bytes(), before);
        let b = heap.alloc(0, 1024);
        assert!(!b.is_null());
        unsafe { heap.free(0, b) };
    }
}
