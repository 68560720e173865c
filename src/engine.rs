//! The external rendering engine as a capability interface
//!
//! The markdown engine is manually managed native code; this crate never
//! looks inside it. Everything the bridge needs from it is captured by the
//! [`RenderEngine`] trait: allocate a parser, allocate an output buffer,
//! render a document, read the buffer back, and release what was allocated.
//! The ownership-bridging logic in [`crate::bridge`] is written purely in
//! terms of this trait, so it is independent of any specific engine binding
//! and fully testable without native code. The real snudown library
//! implements it in the `sys` module (behind the `sys` feature).
//!
//! # Ownership contract
//!
//! Every handle is owned exclusively by whichever side currently holds it:
//!
//! - A parser is created by [`RenderEngine::alloc_parser`] and owned by the
//!   caller until passed to [`RenderEngine::release_parser`], which frees
//!   all engine-side state for that instance.
//! - A buffer is created by [`RenderEngine::alloc_buffer`], filled in place
//!   by [`RenderEngine::render`], and owned by the caller until passed to
//!   [`RenderEngine::release_buffer`].
//! - A callback table is registered with a parser at allocation time. The
//!   engine copies what it needs and never takes ownership, which is why
//!   there is no `release_callbacks` capability here; the boundary-level
//!   no-op lives in [`crate::bridge::release_callbacks`].
//!
//! The releasers take their handle **by value**: once released, a handle
//! cannot be named again, so use-after-release and double-release are
//! compile errors for Rust callers. Raw-pointer handle types (as used by
//! the native binding) opt out of that guarantee by being `Copy`; for them
//! the engine's own undefined behavior applies, exactly as it would in C.

/// Capability interface over the external rendering engine.
///
/// Handles are opaque to the bridge; their concrete types are chosen by the
/// implementation. None of the methods report errors: the engine's entry
/// points return nothing, and fault modes (invalid handles, double release)
/// are undefined behavior on the engine's side of the boundary.
pub trait RenderEngine {
    /// Engine-internal parsing/rendering state.
    type Parser;
    /// A set of rendering callbacks registered with a parser instance.
    type Callbacks;
    /// A growable byte buffer the engine fills with rendered output.
    type Buffer;

    /// Allocates a parser instance with `callbacks` registered.
    ///
    /// The engine copies the table into the parser state; the table itself
    /// stays owned by the caller.
    fn alloc_parser(&self, callbacks: &Self::Callbacks) -> Self::Parser;

    /// Allocates an empty output buffer.
    fn alloc_buffer(&self) -> Self::Buffer;

    /// Renders `document` through `parser`, appending output to `buffer`.
    ///
    /// Zero-length documents are permitted and produce the engine's
    /// empty/minimal output.
    fn render(&self, buffer: &mut Self::Buffer, document: &[u8], parser: &mut Self::Parser);

    /// Borrows the bytes the engine has written into `buffer` so far.
    fn buffer_contents<'a>(&self, buffer: &'a Self::Buffer) -> &'a [u8];

    /// Hands `parser` back to the engine's allocator.
    fn release_parser(&self, parser: Self::Parser);

    /// Hands `buffer` back to the engine's allocator, freeing its contents.
    fn release_buffer(&self, buffer: Self::Buffer);
}

#[cfg(test)]
pub(crate) mod mock {
    //! A scripted in-process engine for unit tests.

    use super::RenderEngine;
    use std::cell::Cell;

    /// Callback-table stand-in: the tag pair the engine emits around
    /// emphasised spans.
    #[derive(Clone, Copy)]
    pub(crate) struct MockCallbacks {
        pub(crate) emphasis_open: &'static str,
        pub(crate) emphasis_close: &'static str,
    }

    impl Default for MockCallbacks {
        fn default() -> Self {
            Self {
                emphasis_open: "<em>",
                emphasis_close: "</em>",
            }
        }
    }

    pub(crate) struct MockParser {
        emphasis_open: &'static str,
        emphasis_close: &'static str,
    }

    /// Counts every capability call and records whether stderr was already
    /// unbuffered when `render` ran, so tests can pin the before-render
    /// ordering of the diagnostics side effect.
    #[derive(Default)]
    pub(crate) struct MockEngine {
        pub(crate) parsers_released: Cell<usize>,
        pub(crate) buffers_released: Cell<usize>,
        pub(crate) renders: Cell<usize>,
        pub(crate) stderr_unbuffered_at_render: Cell<Option<bool>>,
    }

    impl RenderEngine for MockEngine {
        type Parser = MockParser;
        type Callbacks = MockCallbacks;
        type Buffer = Vec<u8>;

        fn alloc_parser(&self, callbacks: &MockCallbacks) -> MockParser {
            // The real engine copies the table into parser state at
            // allocation time; mirror that so releasing the table later
            // cannot affect the parser.
            MockParser {
                emphasis_open: callbacks.emphasis_open,
                emphasis_close: callbacks.emphasis_close,
            }
        }

        fn alloc_buffer(&self) -> Vec<u8> {
            Vec::new()
        }

        fn render(&self, buffer: &mut Vec<u8>, document: &[u8], parser: &mut MockParser) {
            self.renders.set(self.renders.get() + 1);
            self.stderr_unbuffered_at_render
                .set(Some(crate::diagnostics::stderr_is_unbuffered()));

            if document.is_empty() {
                return;
            }
            buffer.extend_from_slice(b"<p>");
            if document.len() >= 3 && document.starts_with(b"*") && document.ends_with(b"*") {
                buffer.extend_from_slice(parser.emphasis_open.as_bytes());
                buffer.extend_from_slice(&document[1..document.len() - 1]);
                buffer.extend_from_slice(parser.emphasis_close.as_bytes());
            } else {
                buffer.extend_from_slice(document);
            }
            buffer.extend_from_slice(b"</p>\n");
        }

        fn buffer_contents<'a>(&self, buffer: &'a Vec<u8>) -> &'a [u8] {
            buffer
        }

        fn release_parser(&self, _parser: MockParser) {
            self.parsers_released.set(self.parsers_released.get() + 1);
        }

        fn release_buffer(&self, _buffer: Vec<u8>) {
            self.buffers_released.set(self.buffers_released.get() + 1);
        }
    }
}
