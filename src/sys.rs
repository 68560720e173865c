//! Raw bindings to the native snudown library
//!
//! Declarations for the engine entry points the bridge forwards to, plus
//! [`NativeEngine`], the [`RenderEngine`] implementation over them. Handle
//! types are `#[repr(C)]`: parser and callback table fully opaque, the
//! buffer mirroring the engine header's public layout because reading the
//! rendered bytes back requires it.
//!
//! Everything here follows the C contract verbatim: no validation, no
//! double-free protection, undefined behavior for invalid handles. The
//! marker fields make the handle types `!Send + !Sync`; the engine is
//! single-threaded per handle.

use std::marker::{PhantomData, PhantomPinned};
use std::os::raw::{c_uint, c_void};
use std::ptr;
use std::slice;

use crate::engine::RenderEngine;

/// Allocation unit for fresh output buffers, matching the engine's own
/// example programs.
pub const OUTPUT_UNIT: usize = 64;

/// Opaque engine parser state (`struct sd_markdown`).
#[repr(C)]
pub struct RawParser {
    _data: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}

/// Opaque rendering callback table (`struct sd_callbacks`).
#[repr(C)]
pub struct RawCallbacks {
    _data: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}

/// Growable output buffer (`struct buf`).
///
/// The layout is part of the engine's public header; `data` holds `size`
/// rendered bytes once a render has run.
#[repr(C)]
pub struct RawBuffer {
    pub data: *mut u8,
    pub size: usize,
    pub asize: usize,
    pub unit: usize,
}

#[link(name = "snudown")]
unsafe extern "C" {
    pub fn sd_markdown_new(
        extensions: c_uint,
        max_nesting: usize,
        callbacks: *const RawCallbacks,
        opaque: *mut c_void,
    ) -> *mut RawParser;

    // Parser last: the engine's own argument order, preserved throughout
    // this crate's exported surface.
    pub fn sd_markdown_render(
        ob: *mut RawBuffer,
        document: *const u8,
        doc_size: usize,
        md: *mut RawParser,
    );

    pub fn sd_markdown_free(md: *mut RawParser);

    pub fn bufnew(unit: usize) -> *mut RawBuffer;

    pub fn bufrelease(b: *mut RawBuffer);
}

/// The native snudown library as a [`RenderEngine`] capability provider.
///
/// Handles are raw pointers; validity is the caller's obligation exactly as
/// it is in C. Allocation parameters are fixed at engine construction, the
/// engine value itself holds no state.
#[derive(Debug, Clone, Copy)]
pub struct NativeEngine {
    /// Extension bitmask passed to `sd_markdown_new`.
    pub extensions: c_uint,
    /// Maximum block nesting depth.
    pub max_nesting: usize,
}

impl Default for NativeEngine {
    fn default() -> Self {
        Self {
            extensions: 0,
            max_nesting: 16,
        }
    }
}

impl RenderEngine for NativeEngine {
    type Parser = *mut RawParser;
    type Callbacks = *const RawCallbacks;
    type Buffer = *mut RawBuffer;

    fn alloc_parser(&self, callbacks: &Self::Callbacks) -> Self::Parser {
        // SAFETY: the engine accepts any callback table obtained from its
        // own renderer setup; a null table is the engine's fault path, not
        // ours.
        unsafe { sd_markdown_new(self.extensions, self.max_nesting, *callbacks, ptr::null_mut()) }
    }

    fn alloc_buffer(&self) -> Self::Buffer {
        // SAFETY: bufnew only allocates; returns null on OOM, which flows
        // through as a null handle.
        unsafe { bufnew(OUTPUT_UNIT) }
    }

    fn render(&self, buffer: &mut Self::Buffer, document: &[u8], parser: &mut Self::Parser) {
        // SAFETY: caller holds valid handles per the ownership contract;
        // `document` is a live slice so pointer and length agree.
        unsafe { sd_markdown_render(*buffer, document.as_ptr(), document.len(), *parser) }
    }

    fn buffer_contents<'a>(&self, buffer: &'a Self::Buffer) -> &'a [u8] {
        let b = *buffer;
        if b.is_null() {
            return &[];
        }
        // SAFETY: a live buffer handle points at a valid `buf`; `data` is
        // null until the first write, otherwise holds `size` initialized
        // bytes. The returned borrow is tied to the handle's borrow.
        unsafe {
            if (*b).data.is_null() {
                &[]
            } else {
                slice::from_raw_parts((*b).data, (*b).size)
            }
        }
    }

    fn release_parser(&self, parser: Self::Parser) {
        // SAFETY: forwarding the teardown; single-release is the caller's
        // obligation, as in C.
        unsafe { sd_markdown_free(parser) }
    }

    fn release_buffer(&self, buffer: Self::Buffer) {
        // SAFETY: same single-release contract as release_parser.
        unsafe { bufrelease(buffer) }
    }
}
