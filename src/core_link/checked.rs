//! Bounds-checked wrappers over the raw primitives.
//!
//! For code running outside the injection context where slices are at hand.
//! Each function verifies the request against the slice lengths and then
//! calls the same unchecked loop the loader uses.

use core::ffi::c_char;

use crate::core_link::crt::{self, WChar};
use crate::core_link::error::CrtError;

fn ensure_capacity(capacity: usize, requested: usize) -> Result<(), CrtError> {
    if requested > capacity {
        return Err(CrtError::DestinationTooSmall { requested, capacity });
    }
    Ok(())
}

fn ensure_available(available: usize, requested: usize) -> Result<(), CrtError> {
    if requested > available {
        return Err(CrtError::SourceTooShort { requested, available });
    }
    Ok(())
}

pub fn memset(dst: &mut [u8], value: u8, count: usize) -> Result<&mut [u8], CrtError> {
    ensure_capacity(dst.len(), count)?;
    unsafe { crt::memset(dst.as_mut_ptr(), value, count) };
    Ok(dst)
}

pub fn memcpy<'a>(dst: &'a mut [u8], src: &[u8], count: usize) -> Result<&'a mut [u8], CrtError> {
    ensure_capacity(dst.len(), count)?;
    ensure_available(src.len(), count)?;
    unsafe { crt::memcpy(dst.as_mut_ptr(), src.as_ptr(), count) };
    Ok(dst)
}

pub fn wmemset(dst: &mut [WChar], value: WChar, count: usize) -> Result<&mut [WChar], CrtError> {
    ensure_capacity(dst.len(), count)?;
    unsafe { crt::wmemset(dst.as_mut_ptr(), value, count) };
    Ok(dst)
}

pub fn wmemcpy<'a>(
    dst: &'a mut [WChar],
    src: &[WChar],
    count: usize,
) -> Result<&'a mut [WChar], CrtError> {
    ensure_capacity(dst.len(), count)?;
    ensure_available(src.len(), count)?;
    unsafe { crt::wmemcpy(dst.as_mut_ptr(), src.as_ptr(), count) };
    Ok(dst)
}

/// Length of the NUL-terminated string at the start of `s`.
pub fn strlen(s: &[u8]) -> Result<usize, CrtError> {
    if !s.contains(&0) {
        return Err(CrtError::Unterminated { scanned: s.len() });
    }
    Ok(unsafe { crt::strlen(s.as_ptr() as *const c_char) })
}

/// Length of the zero-terminated wide string at the start of `s`.
pub fn wcslen(s: &[WChar]) -> Result<usize, CrtError> {
    if !s.contains(&0) {
        return Err(CrtError::Unterminated { scanned: s.len() });
    }
    Ok(unsafe { crt::wcslen(s.as_ptr()) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn memset_rejects_short_destination() {
        let mut buf = [0u8; 3];
        assert_eq!(
            memset(&mut buf, 0xAB, 4),
            Err(CrtError::DestinationTooSmall { requested: 4, capacity: 3 })
        );
        assert_eq!(buf, [0; 3]);
    }

    #[test]
    fn memcpy_rejects_short_source() {
        let mut dst = [0u8; 8];
        assert_eq!(
            memcpy(&mut dst, b"abc", 4),
            Err(CrtError::SourceTooShort { requested: 4, available: 3 })
        );
    }

    #[test]
    fn memcpy_copies_prefix_only() {
        let mut dst = [b'.'; 6];
        let out = memcpy(&mut dst, b"abcdef", 4).unwrap();
        assert_eq!(out, b"abcd..");
    }

    #[test]
    fn wide_variants_check_both_sides() {
        let mut dst = [0 as WChar; 2];
        assert!(wmemset(&mut dst, 7, 3).is_err());
        wmemset(&mut dst, 7, 2).unwrap();
        assert_eq!(dst, [7 as WChar; 2]);
        assert!(wmemcpy(&mut dst, &[1], 2).is_err());
        let src: [WChar; 3] = [1, 2, 3];
        wmemcpy(&mut dst, &src, 2).unwrap();
        assert_eq!(dst, [1, 2]);
    }

    #[test]
    fn lengths_require_a_terminator() {
        assert_eq!(strlen(b"hello\0"), Ok(5));
        assert_eq!(strlen(b"hello"), Err(CrtError::Unterminated { scanned: 5 }));
        assert_eq!(wcslen(&[104, 105, 0, 33]), Ok(2));
        assert_eq!(wcslen(&[]), Err(CrtError::Unterminated { scanned: 0 }));
    }

    proptest! {
        #[test]
        fn checked_fill_agrees_with_bounds(len in 0usize..64, count in 0usize..96, value in any::<u8>()) {
            let mut buf = vec![0u8; len];
            match memset(&mut buf, value, count) {
                Ok(out) => {
                    prop_assert!(count <= len);
                    prop_assert!(out[..count].iter().all(|&b| b == value));
                }
                Err(err) => {
                    prop_assert!(count > len);
                    prop_assert_eq!(err, CrtError::DestinationTooSmall { requested: count, capacity: len });
                }
            }
        }
    }
}
