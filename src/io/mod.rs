//! I/O module
//!
//! Handles request decoding and response output.
//!
//! # Components
//!
//! - `json_format` - JSON format handling (request decoding, response serialization)
//! - `sync_reader` - Synchronous request reader with iterator interface
//! - `async_reader` - Asynchronous request reader with batch reading interface

pub mod async_reader;
pub mod json_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use json_format::{decode_request, write_result, PaymentRequest, RequestRecord};
pub use sync_reader::SyncReader;
