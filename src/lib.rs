//! Snudown Bridge - ownership-bridging FFI layer
//!
//! A thin interoperability shim that lets a managed-memory calling
//! environment drive the snudown markdown engine without violating either
//! side's memory-ownership conventions. The crate manages object lifetime
//! across the boundary and sequences the single rendering invocation; the
//! markdown algorithm itself stays inside the engine.
//!
//! # Architecture
//!
//! - `engine`: the external engine modeled as a capability trait
//! - `bridge`: the four bridging operations, generic over any engine
//! - `diagnostics`: the stderr-unbuffering debugging aid
//! - `handles`: move-only RAII owners for parser and buffer handles
//! - `sys` (feature `sys`): raw declarations of the native snudown library
//! - `ffi` (feature `sys`): the exported C entry points consumed by the
//!   binding generator
//!
//! Default builds compile and test the full bridging semantics against the
//! capability interface alone; enabling the `sys` feature additionally
//! requires `libsnudown` at link time.
//!
//! # Safety
//!
//! The exported FFI functions are `unsafe` and carry their contracts in
//! `# Safety` sections. Within safe Rust, handles are move-only: releasing
//! one consumes it, so use-after-release and double-release do not compile.

// Module declarations
pub mod bridge;
pub mod diagnostics;
pub mod engine;
pub mod handles;

#[cfg(feature = "sys")]
pub mod ffi;
#[cfg(feature = "sys")]
pub mod sys;

// Re-export main types for convenience
pub use bridge::{RenderOptions, release_buffer, release_callbacks, release_parser, render_document};
pub use engine::RenderEngine;
pub use handles::{OutputBuffer, Parser};
