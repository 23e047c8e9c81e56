//! CPU-side mesh types and stamp generators.
//!
//! This module provides GPU-agnostic mesh data structures:
//!
//! - [`PrimitiveTopology`] - How vertices are assembled into primitives
//! - [`CpuMesh`] - Immutable CPU-side mesh (positions, normals, indices)
//! - Generators for the debug-draw stamps (cube, sphere, pyramid, disc, ...)

mod data;
pub mod generators;

pub use data::{CpuMesh, PrimitiveTopology};
