//! Pure domain logic for the artifact deployment pipeline.
//!
//! This crate contains no I/O and no async code: artifact types, the
//! source-code analyzer, the package/version registry, domain-name
//! rules, the content scorer, and project-name slugging.  Evaluation is
//! done against data passed in by the caller.

pub mod analyzer;
pub mod domain;
pub mod error;
pub mod naming;
pub mod packages;
pub mod seo;
pub mod types;
