//! # Quill Shared
//!
//! Types shared between the server and its clients: request payloads,
//! feed views, and the error envelope.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
