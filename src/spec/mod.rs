//! The execution-engine side of the compiler: the recursively nested
//! workflow specification and its input declarations.

pub mod types;

pub use types::*;
