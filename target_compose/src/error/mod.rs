//! Error types produced by fan-out, composition, and their collaborators.

mod constructors;
mod conversions;
mod types;

pub use types::{BoxError, ComposeError};

#[cfg(test)]
mod tests;
