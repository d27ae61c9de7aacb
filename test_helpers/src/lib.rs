//! Test helpers shared across crates in the workspace.
//!
//! This crate provides figment jail wrappers for options tests, a call log
//! for asserting which producers and fragments ran, and small JSON builders.

pub mod calls;
pub mod figment;
pub mod json;
