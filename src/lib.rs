//! Scroll-driven festival landing sequence: hero, tunnel flythrough, about
//! panel and rotating gallery, rendered with WebGL2 from WebAssembly.
//!
//! Everything outside `wasm` is plain math and builds (and tests) on any
//! target.

pub mod autoscroll;
pub mod composer;
pub mod config;
pub mod content;
pub mod curves;
pub mod easing;
pub mod error;
pub mod mesh;
pub mod overlay;
pub mod pool;
pub mod progress;
pub mod scene;
pub mod stats;
pub mod timeline;

pub use error::{Result, VizError};

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
mod wasm;
