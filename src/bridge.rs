//! The four ownership-bridging operations
//!
//! This module is the heart of the crate: one releaser per handle type plus
//! the single rendering invocation, each a zero-overhead forward to the
//! engine capability it wraps. The functions are generic over any
//! [`RenderEngine`], so the same code path serves both the scripted test
//! engine and the native snudown binding.
//!
//! # What this layer does NOT do
//!
//! No validation, no retries, no error values. A fault on the engine's side
//! (invalid handle, corrupted buffer) manifests as whatever the engine does
//! with it; this layer's purpose is forwarding, and every function here
//! returns nothing. The only state it touches beyond the engine is the
//! process's stderr buffering mode, and only when [`RenderOptions`] asks
//! for it.
//!
//! # Ordering
//!
//! Within a single [`render_document`] call, the stderr buffering change is
//! applied strictly before the engine's render entry point runs. No ordering
//! is guaranteed against other threads' use of stderr; callers that render
//! concurrently must serialize or accept the shared effect.

use crate::diagnostics;
use crate::engine::RenderEngine;

/// Per-call configuration for [`render_document`].
///
/// The defaults make rendering side-effect free. The original glue switched
/// stderr to unbuffered on every render so the engine's diagnostics appear
/// immediately; callers that need that behavior opt in per call. The FFI
/// entry points enable it unconditionally to match the original exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Switch the process's stderr stream to unbuffered mode before
    /// invoking the engine.
    ///
    /// Process-wide and permanent: the mode stays changed for the lifetime
    /// of the process, not just this call. Useful when the engine's
    /// callbacks write diagnostics through C stdio and interleaving with
    /// other output matters.
    pub unbuffered_diagnostics: bool,
}

/// Releases a parser handle back to the engine's allocator.
///
/// Frees all memory the engine allocated for that parser instance,
/// including any associated extension state. The handle is consumed; the
/// engine offers no double-free protection, and none is added here.
pub fn release_parser<E: RenderEngine>(engine: &E, parser: E::Parser) {
    log::trace!("releasing parser state");
    engine.release_parser(parser);
}

/// Releases a callback table. This is an intentional no-op.
///
/// The engine copies the table into parser state at allocation time and
/// never owns or frees it, so there is nothing to hand back. The function
/// exists because every handle type crossing the boundary must have a
/// matching release entry point; consuming the value here keeps the
/// move-only discipline uniform across all three handle types.
pub fn release_callbacks<E: RenderEngine>(_engine: &E, callbacks: E::Callbacks) {
    log::trace!("releasing callback table (no engine teardown)");
    drop(callbacks);
}

/// Renders `document` through `parser` into `buffer`.
///
/// If [`RenderOptions::unbuffered_diagnostics`] is set, stderr is switched
/// to unbuffered mode first, then the engine's render entry point is
/// invoked. On return the buffer holds the rendered output; success or
/// failure semantics, if any, are entirely the engine's. Zero-length
/// documents are valid and render to the engine's empty/minimal output.
///
/// The output depends only on the document bytes and the callback table
/// registered with `parser`: identical inputs on freshly allocated handles
/// produce byte-identical output.
pub fn render_document<E: RenderEngine>(
    engine: &E,
    parser: &mut E::Parser,
    buffer: &mut E::Buffer,
    document: &[u8],
    options: &RenderOptions,
) {
    if options.unbuffered_diagnostics {
        diagnostics::unbuffer_stderr();
    }
    log::trace!("rendering {} byte document", document.len());
    engine.render(buffer, document, parser);
}

/// Releases an output buffer back to the engine's allocator.
///
/// Frees all memory backing the buffer's contents. Same single-release
/// contract as [`release_parser`].
pub fn release_buffer<E: RenderEngine>(engine: &E, buffer: E::Buffer) {
    log::trace!("releasing output buffer");
    engine.release_buffer(buffer);
}
