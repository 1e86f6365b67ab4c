#![allow(non_snake_case, non_camel_case_types)]

use core::ffi::{c_int, c_ulong, c_void};

pub type HANDLE = *mut c_void;
pub type DWORD = c_ulong;
pub type BOOL = c_int;
pub type SIZE_T = usize;

/*
    HeapAlloc / HeapFree flags
 */
pub const HEAP_NO_SERIALIZE: DWORD = 0x0000_0001;
pub const HEAP_GENERATE_EXCEPTIONS: DWORD = 0x0000_0004;
pub const HEAP_ZERO_MEMORY: DWORD = 0x0000_0008;

/*
    相关 struct PEB
 */
#[repr(C)]
#[allow(dead_code)]
pub struct PEB {
    Reserved1: [u8; 2],
    pub(crate) BeingDebugged: u8,
    Reserved2: u8,
    Reserved3: [usize; 2],
    // 其他字段省略
}

#[cfg(windows)]
#[link(name = "kernel32")]
extern "system" {
    pub fn HeapCreate(flOptions: DWORD, dwInitialSize: SIZE_T, dwMaximumSize: SIZE_T) -> HANDLE;
    pub fn HeapAlloc(hHeap: HANDLE, dwFlags: DWORD, dwBytes: SIZE_T) -> *mut c_void;
    pub fn HeapFree(hHeap: HANDLE, dwFlags: DWORD, lpMem: *mut c_void) -> BOOL;
    pub fn IsDebuggerPresent() -> BOOL;
}
