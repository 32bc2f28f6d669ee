//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces infrastructure adapters implement:
//! - Compiler / CompilerBackend: a concrete compiler toolchain
//! - CompilerFactory: per-request compiler construction
//! - SelectionPolicy: baseline vs augmented routing

pub mod compiler;
pub mod selection_policy;

pub use compiler::{Compiler, CompilerBackend, CompilerFactory};
pub use selection_policy::SelectionPolicy;
