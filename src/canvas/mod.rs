//! The visual side of the compiler: the node/edge diagram as edited on the
//! canvas, plus the typed per-kind configuration payloads.

pub mod config;
pub mod types;

pub use config::*;
pub use types::*;
