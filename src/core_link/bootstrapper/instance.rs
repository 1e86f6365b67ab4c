//! Process-wide heap reference.
//!
//! The surrounding module installs one heap service during initialization;
//! after that every `mem_alloc`/`mem_calloc`/`mem_free` goes through it.

use core::ptr::NonNull;

use spin::Once;

use crate::core_link::error::CrtError;
use crate::core_link::heap::{HeapService, ProcessHeap};

pub type SharedHeap = ProcessHeap<&'static dyn HeapService>;

// 定义全局实例
static PROCESS_HEAP: Once<SharedHeap> = Once::new();

/// Sets the process heap. Only the first call wins.
pub fn install(service: &'static dyn HeapService) -> Result<(), CrtError> {
    let mut fresh = false;
    PROCESS_HEAP.call_once(|| {
        fresh = true;
        ProcessHeap::new(service)
    });
    if fresh {
        tracing::debug!("process heap installed");
        Ok(())
    } else {
        tracing::warn!("process heap already installed, keeping the first one");
        Err(CrtError::HeapAlreadyInstalled)
    }
}

pub fn try_process_heap() -> Option<&'static SharedHeap> {
    PROCESS_HEAP.get()
}

/// The installed process heap.
///
/// Panics when called before [`install`]; allocating without a heap is a
/// loader bug that must stop initialization.
#[track_caller]
pub fn process_heap() -> &'static SharedHeap {
    match PROCESS_HEAP.get() {
        Some(heap) => heap,
        None => panic!("process heap used before install"),
    }
}

/// `memalloc`: raising allocation from the process heap.
#[track_caller]
pub fn mem_alloc(size: usize) -> NonNull<u8> {
    process_heap().allocate(size)
}

/// `memcalloc`: zeroed allocation, `None` on exhaustion.
#[track_caller]
pub fn mem_calloc(size: usize) -> Option<NonNull<u8>> {
    process_heap().allocate_zeroed(size)
}

/// `memfree`: returns a block to the process heap.
///
/// # Safety
///
/// `block` must be null or come from `mem_alloc`/`mem_calloc`, and must not
/// be used afterwards.
#[track_caller]
pub unsafe fn mem_free(block: *mut u8) {
    process_heap().release(block)
}
