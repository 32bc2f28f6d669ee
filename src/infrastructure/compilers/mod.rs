//! Compiler Backend Implementations
//!
//! Concrete implementations of the [`CompilerBackend`](crate::domain::ports::CompilerBackend)
//! port and the registry that holds them.

pub mod baseline;
pub mod command;
pub mod diagnostics;
pub mod error_prone;
pub mod registry;

pub use baseline::BaselineBackend;
pub use command::JavacCompiler;
pub use diagnostics::parse_javac_output;
pub use error_prone::ErrorProneBackend;
pub use registry::BackendRegistry;
