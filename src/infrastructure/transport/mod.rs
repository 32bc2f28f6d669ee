//! Request/response transport between the orchestrator and the worker.

pub mod json_lines;

pub use json_lines::{decode_bytes, decode_line, encode_response, next_frame, write_response, Frame};
