//! Exported C entry points for the binding generator
//!
//! The four functions a managed-memory binding layer consumes to drive the
//! engine without violating either side's ownership conventions. Each is a
//! thin forward through [`crate::bridge`] with the [`NativeEngine`] as the
//! capability provider.
//!
//! # FFI Boundary Contract
//!
//! - Documents cross the boundary as UTF-8 bytes plus explicit length, not
//!   NUL-terminated strings.
//! - Handles are opaque pointers allocated by the engine's own entry points
//!   (`sd_markdown_new`, `bufnew`, renderer setup); this layer never
//!   allocates them, it only releases and uses them.
//! - Every handle type has a matching release function, the callback table
//!   included: the binding layer's object model requires a destructor per
//!   exposed type even when the engine performs no teardown for it.
//! - NULL handles are tolerated as no-ops in the releasers. Everything else
//!   (stale handles, double release, short documents) is undefined behavior
//!   propagated from the engine, exactly as in C.
//! - Panics never unwind into the foreign caller.

use std::panic;
use std::slice;

use crate::bridge::{self, RenderOptions};
use crate::sys::{NativeEngine, RawBuffer, RawCallbacks, RawParser};

// ============================================================================
// Releasers
// ============================================================================

/// Releases a parser handle back to the engine.
///
/// Frees all memory the engine allocated for the parser instance, including
/// associated extension state.
///
/// # Safety
///
/// `md` must be NULL or a parser obtained from `sd_markdown_new` that has
/// not already been released. NULL is a no-op; a stale or foreign pointer is
/// undefined behavior inside the engine's teardown.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn snudown_markdown_free(md: *mut RawParser) {
    if md.is_null() {
        return;
    }
    bridge::release_parser(&NativeEngine::default(), md);
}

/// Releases a callback table handle. Intentionally a no-op.
///
/// The engine copies the table into parser state at allocation time and
/// never owns it; whoever constructed the table (typically static engine
/// data) remains responsible for it. The function exists because the
/// binding layer requires a release entry point for every exposed handle
/// type.
///
/// # Safety
///
/// Always safe: no memory is touched regardless of the pointer's value.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn snudown_callbacks_free(callbacks: *const RawCallbacks) {
    bridge::release_callbacks(&NativeEngine::default(), callbacks);
}

/// Releases an output buffer handle back to the engine.
///
/// Frees all memory backing the buffer's contents.
///
/// # Safety
///
/// `ob` must be NULL or a buffer obtained from `bufnew` that has not already
/// been released. NULL is a no-op; anything else stale is undefined behavior
/// inside the engine's teardown.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn snudown_buf_free(ob: *mut RawBuffer) {
    if ob.is_null() {
        return;
    }
    bridge::release_buffer(&NativeEngine::default(), ob);
}

// ============================================================================
// Render invocation
// ============================================================================

/// Renders `doc_size` bytes of markdown at `document` into `ob` through the
/// parser `md`.
///
/// Argument order matches the engine's render entry point, parser last.
/// Before the engine runs, the process's stderr stream is switched to
/// unbuffered mode so diagnostics written by the engine's callbacks appear
/// immediately; the mode change is process-wide and permanent. Rust callers
/// who want rendering without that side effect use
/// [`bridge::render_document`] directly.
///
/// On return the buffer holds the rendered output. This layer produces no
/// return value and inspects no engine status; zero-length documents are
/// valid and render to the engine's minimal output.
///
/// # Safety
///
/// - `ob` must be a live buffer from `bufnew` and `md` a live parser from
///   `sd_markdown_new`; NULL for either makes the call a no-op.
/// - `document` must point to at least `doc_size` readable bytes unless
///   `doc_size` is 0, in which case it may be NULL.
/// - Neither handle may be used concurrently from another thread during the
///   call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn snudown_render(
    ob: *mut RawBuffer,
    document: *const u8,
    doc_size: usize,
    md: *mut RawParser,
) {
    if ob.is_null() || md.is_null() {
        return;
    }

    let doc: &[u8] = if document.is_null() || doc_size == 0 {
        &[]
    } else {
        // SAFETY: non-NULL with doc_size > 0; the caller guarantees
        // doc_size readable bytes for the duration of this call.
        unsafe { slice::from_raw_parts(document, doc_size) }
    };

    // Panics must not unwind into the foreign caller; there is no error
    // channel on this surface, so a caught panic is simply dropped.
    let _ = panic::catch_unwind(|| {
        let mut parser = md;
        let mut buffer = ob;
        bridge::render_document(
            &NativeEngine::default(),
            &mut parser,
            &mut buffer,
            doc,
            &RenderOptions {
                unbuffered_diagnostics: true,
            },
        );
    });
}
