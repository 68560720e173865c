//! Owned handle wrappers
//!
//! Move-only owners for the two handle types that require engine teardown.
//! [`Parser`] and [`OutputBuffer`] release themselves through the bridge
//! operations exactly once, in `Drop`, so release-after-release and
//! use-after-release cannot be written in safe code. Callback tables need no
//! wrapper: releasing one is a no-op at this boundary, so dropping the value
//! is the release (see [`crate::bridge::release_callbacks`]).
//!
//! `into_raw` is the escape hatch for callers that hand a handle onward
//! (across the FFI boundary, typically) and thereby take over the release
//! obligation.

use std::mem::ManuallyDrop;

use crate::bridge::{self, RenderOptions};
use crate::engine::RenderEngine;

/// Exclusive owner of an engine parser instance.
///
/// Released back to the engine when dropped.
pub struct Parser<'e, E: RenderEngine> {
    engine: &'e E,
    inner: ManuallyDrop<E::Parser>,
}

impl<'e, E: RenderEngine> Parser<'e, E> {
    /// Allocates a parser with `callbacks` registered.
    ///
    /// The engine copies the table; `callbacks` stays owned by the caller.
    pub fn alloc(engine: &'e E, callbacks: &E::Callbacks) -> Self {
        Self {
            engine,
            inner: ManuallyDrop::new(engine.alloc_parser(callbacks)),
        }
    }

    /// Renders `document` into `buffer`.
    ///
    /// `buffer` must have been allocated from the same engine instance;
    /// handles are not interchangeable between engines.
    pub fn render_into(
        &mut self,
        buffer: &mut OutputBuffer<'e, E>,
        document: &[u8],
        options: &RenderOptions,
    ) {
        debug_assert!(
            std::ptr::eq(self.engine, buffer.engine),
            "parser and buffer belong to different engine instances"
        );
        bridge::render_document(self.engine, &mut self.inner, &mut buffer.inner, document, options);
    }

    /// Consumes the wrapper without releasing the parser, transferring the
    /// release obligation to the caller.
    pub fn into_raw(mut self) -> E::Parser {
        // SAFETY: the slot is taken exactly once; forget(self) keeps Drop
        // from observing it afterwards.
        let inner = unsafe { ManuallyDrop::take(&mut self.inner) };
        std::mem::forget(self);
        inner
    }
}

impl<E: RenderEngine> Drop for Parser<'_, E> {
    fn drop(&mut self) {
        // SAFETY: drop runs at most once and `into_raw` forgets self before
        // this point can be reached, so the slot is still live here.
        let inner = unsafe { ManuallyDrop::take(&mut self.inner) };
        bridge::release_parser(self.engine, inner);
    }
}

/// Exclusive owner of an engine output buffer.
///
/// Released back to the engine when dropped.
pub struct OutputBuffer<'e, E: RenderEngine> {
    engine: &'e E,
    inner: ManuallyDrop<E::Buffer>,
}

impl<'e, E: RenderEngine> OutputBuffer<'e, E> {
    /// Allocates an empty output buffer.
    pub fn alloc(engine: &'e E) -> Self {
        Self {
            engine,
            inner: ManuallyDrop::new(engine.alloc_buffer()),
        }
    }

    /// Borrows the rendered bytes accumulated so far.
    pub fn contents(&self) -> &[u8] {
        self.engine.buffer_contents(&self.inner)
    }

    /// Consumes the wrapper without releasing the buffer, transferring the
    /// release obligation to the caller.
    pub fn into_raw(mut self) -> E::Buffer {
        // SAFETY: same single-take discipline as Parser::into_raw.
        let inner = unsafe { ManuallyDrop::take(&mut self.inner) };
        std::mem::forget(self);
        inner
    }
}

impl<E: RenderEngine> Drop for OutputBuffer<'_, E> {
    fn drop(&mut self) {
        // SAFETY: see Parser::drop.
        let inner = unsafe { ManuallyDrop::take(&mut self.inner) };
        bridge::release_buffer(self.engine, inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mock::{MockCallbacks, MockEngine};

    #[test]
    fn drop_releases_each_handle_exactly_once() {
        let engine = MockEngine::default();
        let callbacks = MockCallbacks::default();
        {
            let _parser = Parser::alloc(&engine, &callbacks);
            let _buffer = OutputBuffer::alloc(&engine);
        }
        assert_eq!(engine.parsers_released.get(), 1);
        assert_eq!(engine.buffers_released.get(), 1);
    }

    #[test]
    fn render_into_fills_buffer() {
        let engine = MockEngine::default();
        let callbacks = MockCallbacks::default();
        let mut parser = Parser::alloc(&engine, &callbacks);
        let mut buffer = OutputBuffer::alloc(&engine);

        parser.render_into(&mut buffer, b"*hi*", &RenderOptions::default());

        assert_eq!(buffer.contents(), b"<p><em>hi</em></p>\n");
    }

    #[test]
    fn into_raw_transfers_the_release_obligation() {
        let engine = MockEngine::default();
        let callbacks = MockCallbacks::default();

        let parser = Parser::alloc(&engine, &callbacks);
        let raw = parser.into_raw();
        assert_eq!(engine.parsers_released.get(), 0);

        crate::bridge::release_parser(&engine, raw);
        assert_eq!(engine.parsers_released.get(), 1);
    }

    #[test]
    fn buffer_outlives_parser_release() {
        let engine = MockEngine::default();
        let callbacks = MockCallbacks::default();
        let mut buffer = OutputBuffer::alloc(&engine);
        {
            let mut parser = Parser::alloc(&engine, &callbacks);
            parser.render_into(&mut buffer, b"text", &RenderOptions::default());
        }
        // The rendered bytes are still readable after the parser is gone.
        assert_eq!(engine.parsers_released.get(), 1);
        assert_eq!(buffer.contents(), b"<p>text</p>\n");
    }
}
