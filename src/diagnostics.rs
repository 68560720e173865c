//! Stream diagnostics support
//!
//! The engine and its callbacks report problems by writing to the process's
//! standard-error stream through C stdio, which is line- or block-buffered
//! by default. [`unbuffer_stderr`] switches the stream to unbuffered mode so
//! those diagnostics are observed immediately rather than held back until a
//! flush. The change is process-wide and lasts for the lifetime of the
//! process; it is applied at most once, no matter how many renders request
//! it.
//!
//! Rust's own `eprintln!` writes are already unbuffered; this only matters
//! for output produced on the C side of the boundary.

use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};

static UNBUFFER: Once = Once::new();
static UNBUFFERED: AtomicBool = AtomicBool::new(false);

/// Switches the process's stderr stream to unbuffered mode.
///
/// Idempotent: the underlying `setvbuf` call runs at most once per process.
/// If the C library rejects the mode change, a warning is logged and the
/// stream is left as it was; there is no second attempt.
pub fn unbuffer_stderr() {
    UNBUFFER.call_once(|| {
        if set_stderr_unbuffered() {
            UNBUFFERED.store(true, Ordering::Release);
            log::debug!("stderr switched to unbuffered mode");
        } else {
            log::warn!("setvbuf(stderr) failed; stderr buffering unchanged");
        }
    });
}

/// Reports whether [`unbuffer_stderr`] has successfully run in this process.
pub fn stderr_is_unbuffered() -> bool {
    UNBUFFERED.load(Ordering::Acquire)
}

#[cfg(unix)]
fn set_stderr_unbuffered() -> bool {
    // SAFETY: setvbuf on a standard stream with a NULL buffer and _IONBF is
    // well-defined; stderr is a valid FILE* for the whole process lifetime.
    // Racing against concurrent stderr writers is the caller's documented
    // trade-off, not a memory-safety concern.
    // `libc` does not export the C `stderr` macro as a symbol, so bind the
    // glibc `stderr` global directly; it is the same FILE* the call intends.
    unsafe extern "C" {
        static stderr: *mut libc::FILE;
    }
    unsafe { libc::setvbuf(stderr, std::ptr::null_mut(), libc::_IONBF, 0) == 0 }
}

#[cfg(not(unix))]
fn set_stderr_unbuffered() -> bool {
    // No portable way to change CRT stream buffering here. Treat the stream
    // as already unbuffered; writes made through Rust's std are.
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial(stderr_mode)]
    fn unbuffer_is_observable_and_idempotent() {
        unbuffer_stderr();
        assert!(stderr_is_unbuffered());

        // Second call is a no-op rather than a second setvbuf.
        unbuffer_stderr();
        assert!(stderr_is_unbuffered());
    }
}
