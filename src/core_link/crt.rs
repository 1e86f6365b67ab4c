//! Memory and string primitives.
//!
//! Plain forward loops over raw pointers. None of these check bounds and none
//! are exported under the C symbol names, so the toolchain's own `memset` and
//! friends are never shadowed.
//!
//! The crate is `#![no_builtins]`, so LLVM keeps these loops as loops instead
//! of lowering them back into calls to the platform `memset`/`memcpy`/`strlen`.
//! The public entry points are `#[inline(never)]` so that guarantee holds for
//! callers in other crates as well. To check a release build:
//! `cargo rustc --release --lib -- --emit asm` and grep the `crt` symbols for
//! `memset@`, `memcpy@` or `strlen@`.

use core::ffi::c_char;

/// Wide character unit, the Windows `wchar_t`.
pub type WChar = u16;

#[inline]
unsafe fn fill<T: Copy>(dst: *mut T, value: T, count: usize) -> *mut T {
    let mut d = dst;
    let mut n = count;
    while n != 0 {
        d.write(value);
        d = d.add(1);
        n -= 1;
    }
    dst
}

#[inline]
unsafe fn copy<T: Copy>(dst: *mut T, src: *const T, count: usize) -> *mut T {
    let mut d = dst;
    let mut s = src;
    let mut n = count;
    while n != 0 {
        d.write(s.read());
        d = d.add(1);
        s = s.add(1);
        n -= 1;
    }
    dst
}

#[inline]
unsafe fn length<T: Copy + PartialEq + Default>(s: *const T) -> usize {
    let zero = T::default();
    let mut p = s;
    let mut result = 0;
    while p.read() != zero {
        p = p.add(1);
        result += 1;
    }
    result
}

/// Writes `value` into the first `count` bytes of `dst` and returns `dst`.
///
/// # Safety
///
/// `dst` must be valid for `count` byte writes.
#[inline(never)]
pub unsafe fn memset(dst: *mut u8, value: u8, count: usize) -> *mut u8 {
    fill(dst, value, count)
}

/// Copies `count` bytes from `src` to `dst`, first to last, and returns `dst`.
///
/// # Safety
///
/// Both regions must be valid for `count` bytes and must not overlap.
#[inline(never)]
pub unsafe fn memcpy(dst: *mut u8, src: *const u8, count: usize) -> *mut u8 {
    copy(dst, src, count)
}

/// Wide counterpart of [`memset`].
///
/// # Safety
///
/// `dst` must be valid for `count` unit writes.
#[inline(never)]
pub unsafe fn wmemset(dst: *mut WChar, value: WChar, count: usize) -> *mut WChar {
    fill(dst, value, count)
}

/// Wide counterpart of [`memcpy`].
///
/// # Safety
///
/// Both regions must be valid for `count` units and must not overlap.
#[inline(never)]
pub unsafe fn wmemcpy(dst: *mut WChar, src: *const WChar, count: usize) -> *mut WChar {
    copy(dst, src, count)
}

/// Number of bytes before the first NUL.
///
/// # Safety
///
/// `s` must point to a NUL-terminated string inside one readable region.
#[inline(never)]
pub unsafe fn strlen(s: *const c_char) -> usize {
    length(s)
}

/// Number of wide units before the first zero unit.
///
/// # Safety
///
/// `s` must point to a zero-terminated wide string inside one readable region.
#[inline(never)]
pub unsafe fn wcslen(s: *const WChar) -> usize {
    length(s)
}
