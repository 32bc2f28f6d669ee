//! Domain layer for the compile worker
//!
//! This module contains the request/response models, errors and the ports
//! compiler backends plug into.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{WorkerError, WorkerResult};
