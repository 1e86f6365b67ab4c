//! Debugger-gated breakpoint.

/*
    get peb
 */
#[cfg(all(windows, target_arch = "x86_64"))]
#[inline(always)]
fn get_peb() -> *const crate::core_link::bootstrapper::types::PEB {
    let peb: *const crate::core_link::bootstrapper::types::PEB;
    unsafe {
        core::arch::asm!(
        "mov {}, gs:[0x60]",
        out(reg) peb,
        options(readonly, nostack, preserves_flags),
        );
    }
    peb
}

/// Whether a debugger is attached to this process.
#[cfg(all(windows, target_arch = "x86_64"))]
#[inline]
pub fn debugger_attached() -> bool {
    // IsDebuggerPresent 读的也是 PEB.BeingDebugged
    unsafe { (*get_peb()).BeingDebugged != 0 }
}

#[cfg(all(windows, not(target_arch = "x86_64")))]
#[inline]
pub fn debugger_attached() -> bool {
    unsafe { crate::core_link::bootstrapper::types::IsDebuggerPresent() != 0 }
}

/// No freestanding debugger check exists here, so this always reports `false`.
#[cfg(not(windows))]
#[inline]
pub fn debugger_attached() -> bool {
    false
}

/// Executes a breakpoint trap unconditionally.
#[inline(always)]
pub fn breakpoint() {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    unsafe {
        core::arch::asm!("int3", options(nomem, nostack));
    }
    #[cfg(all(target_arch = "aarch64", windows))]
    unsafe {
        core::arch::asm!("brk #0xf000", options(nomem, nostack));
    }
    #[cfg(all(target_arch = "aarch64", not(windows)))]
    unsafe {
        core::arch::asm!("brk #0", options(nomem, nostack));
    }
}

/// Traps into the debugger if one is attached, otherwise does nothing.
#[inline(always)]
pub fn break_if_attached() {
    if debugger_attached() {
        breakpoint();
    }
}

/// `DEBUG_BREAK`: stop here when running under a debugger.
#[macro_export]
macro_rules! debug_break {
    () => {
        $crate::break_if_attached()
    };
}
