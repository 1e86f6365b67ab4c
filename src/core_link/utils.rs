/// Element count of a fixed-size array, known at compile time.
pub const fn array_len<T, const N: usize>(_: &[T; N]) -> usize {
    N
}

/// `STR_LEN`: number of elements in an array, terminator included for
/// string literals.
#[macro_export]
macro_rules! countof {
    ($array:expr) => {
        $crate::array_len(&$array)
    };
}
