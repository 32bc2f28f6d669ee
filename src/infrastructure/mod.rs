//! Infrastructure layer module
//!
//! Adapters behind the domain ports and process plumbing:
//! - Compiler backends (javac, Error Prone) and the backend registry
//! - JSON-lines transport
//! - Configuration management
//! - Logging infrastructure

pub mod compilers;
pub mod config;
pub mod logging;
pub mod transport;
