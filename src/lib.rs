//! Freestanding runtime shim for modules injected into a host process.
//!
//! Provides a process-wide heap backed by the operating system heap, the
//! handful of memory/string primitives the loader needs, and a debug break
//! that only fires under a debugger. Nothing here links the standard library.
#![cfg_attr(not(test), no_std)]
// 禁止 LLVM 把 crt 里的循环改写成对 memset/memcpy/strlen 的调用
#![no_builtins]

pub mod core_link;

pub use crate::core_link::bootstrapper::instance::{
    install, mem_alloc, mem_calloc, mem_free, process_heap, try_process_heap,
};
pub use crate::core_link::checked;
pub use crate::core_link::crt::{memcpy, memset, strlen, wcslen, wmemcpy, wmemset, WChar};
pub use crate::core_link::diag::{break_if_attached, breakpoint, debugger_attached};
pub use crate::core_link::error::CrtError;
pub use crate::core_link::heap::arena::ArenaHeap;
#[cfg(windows)]
pub use crate::core_link::heap::win32::Win32Heap;
pub use crate::core_link::heap::{HeapService, ProcessHeap};
pub use crate::core_link::utils::array_len;

#[doc(hidden)]
pub use spin as __spin;
