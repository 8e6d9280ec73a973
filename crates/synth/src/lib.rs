//! Project synthesis.
//!
//! Turns a [`shipwright_core::analyzer::ParsedArtifact`] into a
//! complete, buildable project: the component source is cleaned
//! (preview shims stripped, shader attribute conflicts resolved,
//! imports regenerated, default export guaranteed) and a full scaffold
//! of project files is emitted around it.  Synthesis is deterministic:
//! the same input always yields byte-identical files.

pub mod exports;
pub mod imports;
pub mod project;
pub mod scaffold;
pub mod strip;
pub mod transform;

pub use project::{GeneratedProject, SynthError, VirtualFile};
pub use transform::transform;
