//! # dbgdraw core
//!
//! Renderer-independent building blocks for the dbgdraw debug renderer:
//! math helpers, allocation-reuse pools and the stamp mesh generators.

pub mod math;
pub mod mesh;
pub mod pool;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
