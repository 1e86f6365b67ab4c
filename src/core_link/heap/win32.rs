use core::ffi::c_void;

use crate::core_link::bootstrapper::types::{
    HeapAlloc, HeapCreate, HeapFree, DWORD, HANDLE, HEAP_NO_SERIALIZE,
};
use crate::core_link::heap::HeapService;

/// Heap service backed by a Windows heap object.
#[derive(Debug, Clone, Copy)]
pub struct Win32Heap {
    handle: HANDLE,
}

// HeapAlloc/HeapFree 自带串行化，除非创建时传了 HEAP_NO_SERIALIZE
unsafe impl Send for Win32Heap {}
unsafe impl Sync for Win32Heap {}

impl Win32Heap {
    /// Wraps a heap the surrounding module already created.
    ///
    /// # Safety
    ///
    /// `handle` must be a live heap created without [`HEAP_NO_SERIALIZE`];
    /// the process heap is shared by every thread of the host.
    pub const unsafe fn from_raw(handle: HANDLE) -> Self {
        Self { handle }
    }

    /// Creates a private growable, serialized heap, `HeapCreate(0, 0, 0)`.
    pub fn create() -> Option<Self> {
        let handle = unsafe { HeapCreate(0, 0, 0) };
        if handle.is_null() {
            return None;
        }
        Some(Self { handle })
    }

    pub fn handle(&self) -> HANDLE {
        self.handle
    }
}

unsafe impl HeapService for Win32Heap {
    fn alloc(&self, flags: DWORD, size: usize) -> *mut u8 {
        debug_assert_eq!(flags & HEAP_NO_SERIALIZE, 0, "process heap calls must stay serialized");
        unsafe { HeapAlloc(self.handle, flags, size) as *mut u8 }
    }

    unsafe fn free(&self, flags: DWORD, block: *mut u8) -> bool {
        debug_assert_eq!(flags & HEAP_NO_SERIALIZE, 0, "process heap calls must stay serialized");
        HeapFree(self.handle, flags, block as *mut c_void) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_link::heap::ProcessHeap;

    #[test]
    fn private_heap_round_trip() {
        let heap = ProcessHeap::new(Win32Heap::create().expect("HeapCreate"));
        let block = heap.allocate(0);
        unsafe { heap.release(block.as_ptr()) };

        let zeroed = heap.allocate_zeroed(64).expect("zeroed block");
        let bytes = unsafe { core::slice::from_raw_parts(zeroed.as_ptr(), 64) };
        assert!(bytes.iter().all(|&b| b == 0));
        unsafe { heap.release(zeroed.as_ptr()) };
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "serialized")]
    fn unserialized_request_is_refused() {
        let heap = Win32Heap::create().expect("HeapCreate");
        let _ = heap.alloc(HEAP_NO_SERIALIZE, 16);
    }

    #[test]
    fn zeroed_request_beyond_address_space_is_none() {
        let heap = ProcessHeap::new(Win32Heap::create().expect("HeapCreate"));
        assert!(heap.allocate_zeroed(usize::MAX - 0x1000).is_none());
    }
}
