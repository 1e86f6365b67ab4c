/*
    编译期配置
 */

/// Region size used by `define_static_arena!` when none is given (1 MiB).
pub const DEFAULT_ARENA_SIZE: usize = 1024 * 1024;

/// Alignment of every block handed out by the arena heap.
///
/// Matches `MEMORY_ALLOCATION_ALIGNMENT` of the Windows heap on 64-bit
/// targets, so callers see the same guarantee on either backend.
pub const BLOCK_ALIGN: usize = 16;

/// Bytes reserved in front of each arena block to remember its size.
pub const BLOCK_HEADER: usize = BLOCK_ALIGN;

/// Declares a lazily initialized `ArenaHeap` over a static byte region.
///
/// The region lives in the module image, so no OS call is needed before the
/// first allocation:
///
/// ```ignore
/// shim_crt::define_static_arena!(ARENA);
/// shim_crt::install(&*ARENA).ok();
/// ```
#[macro_export]
macro_rules! define_static_arena {
    ($name:ident) => {
        $crate::define_static_arena!(
            $name,
            $crate::core_link::bootstrapper::config::DEFAULT_ARENA_SIZE
        );
    };
    ($name:ident, $size:expr) => {
        static $name: $crate::__spin::lazy::Lazy<$crate::ArenaHeap> =
            $crate::__spin::lazy::Lazy::new(|| {
                const SIZE: usize = $size;
                static mut REGION: [u8; SIZE] = [0; SIZE];
                // Lazy 只会执行一次，REGION 不会被别名引用
                unsafe {
                    $crate::ArenaHeap::new(::core::ptr::addr_of_mut!(REGION) as *mut u8, SIZE)
                }
            });
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::define_static_arena!(SMALL_ARENA, 64 * 1024);
    crate::define_static_arena!(DEFAULT_ARENA);

    #[test]
    fn static_arena_serves_blocks_from_its_region() {
        let heap = crate::ProcessHeap::new(&*SMALL_ARENA);
        let block = heap.allocate(128);
        assert!(SMALL_ARENA.used() >= 128);
        unsafe { heap.release(block.as_ptr()) };
        assert_eq!(SMALL_ARENA.used(), 0);
    }

    #[test]
    fn default_arena_has_default_size() {
        assert!(DEFAULT_ARENA.size() <= DEFAULT_ARENA_SIZE);
        assert!(DEFAULT_ARENA.size() + BLOCK_ALIGN >= DEFAULT_ARENA_SIZE);
    }

    #[test]
    fn header_keeps_blocks_aligned() {
        assert_eq!(BLOCK_HEADER % BLOCK_ALIGN, 0);
        assert!(BLOCK_HEADER >= core::mem::size_of::<usize>());
    }
}
