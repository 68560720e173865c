//! Lifecycle walkthrough: allocate, render, read, release
//!
//! Runs the full bridging sequence against an in-process engine. Set
//! `RUST_LOG=trace` to watch the bridge's lifecycle logging.

use snudown_bridge::{OutputBuffer, Parser, RenderEngine, RenderOptions, release_callbacks};

/// Minimal in-process engine so the walkthrough runs without native code.
/// Paragraph wrapping plus `*text*` emphasis only.
struct DemoEngine;

struct DemoCallbacks;

impl RenderEngine for DemoEngine {
    type Parser = ();
    type Callbacks = DemoCallbacks;
    type Buffer = Vec<u8>;

    fn alloc_parser(&self, _callbacks: &DemoCallbacks) {}

    fn alloc_buffer(&self) -> Vec<u8> {
        Vec::new()
    }

    fn render(&self, buffer: &mut Vec<u8>, document: &[u8], _parser: &mut ()) {
        if document.is_empty() {
            return;
        }
        buffer.extend_from_slice(b"<p>");
        if document.len() >= 3 && document.starts_with(b"*") && document.ends_with(b"*") {
            buffer.extend_from_slice(b"<em>");
            buffer.extend_from_slice(&document[1..document.len() - 1]);
            buffer.extend_from_slice(b"</em>");
        } else {
            buffer.extend_from_slice(document);
        }
        buffer.extend_from_slice(b"</p>\n");
    }

    fn buffer_contents<'a>(&self, buffer: &'a Vec<u8>) -> &'a [u8] {
        buffer
    }

    fn release_parser(&self, _parser: ()) {}

    fn release_buffer(&self, _buffer: Vec<u8>) {}
}

fn main() {
    env_logger::init();

    println!("=== Snudown Bridge - Lifecycle Walkthrough ===\n");

    let engine = DemoEngine;
    let callbacks = DemoCallbacks;

    // Allocate a parser with the callback table registered, and a buffer.
    let mut parser = Parser::alloc(&engine, &callbacks);
    let mut buffer = OutputBuffer::alloc(&engine);

    // The table was copied into parser state; releasing it is a no-op that
    // exists for the binding layer's type-system completeness.
    release_callbacks(&engine, callbacks);

    // One rendering invocation per document.
    let document = b"*hi*";
    println!("Input document:  {}", String::from_utf8_lossy(document));
    parser.render_into(&mut buffer, document, &RenderOptions::default());

    println!(
        "Rendered output: {}",
        String::from_utf8_lossy(buffer.contents())
    );

    // Dropping the owners releases both handles back to the engine,
    // exactly once each.
    drop(buffer);
    drop(parser);

    println!("Handles released; done.");
}
