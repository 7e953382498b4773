//! Asynchronous request reader with batch interface
//!
//! Loads the input file through tokio and hands request documents out in
//! batches for concurrent evaluation.
//!
//! # Architecture
//!
//! ```text
//! tokio::fs::read → AsyncReader → Batches of RequestRecords
//!                        ↓
//!                json_format module
//!            (PaymentRequest, decode_request)
//! ```
//!
//! Documents are decoded lazily: each `read_batch` call resumes the JSON
//! stream at the byte offset where the previous batch stopped.

use std::path::Path;

use serde_json::{Deserializer, Value};

use crate::io::json_format::{decode_request, RequestRecord};
use crate::types::EngineError;

/// Asynchronous request reader
#[derive(Debug)]
pub struct AsyncReader {
    buffer: Vec<u8>,
    offset: usize,
    finished: bool,
}

impl AsyncReader {
    /// Read the whole input file without blocking the runtime
    ///
    /// # Returns
    ///
    /// * `Ok(AsyncReader)` positioned at the first document
    /// * `Err(EngineError)` if the file cannot be read
    pub async fn open(path: &Path) -> Result<Self, EngineError> {
        let buffer = tokio::fs::read(path)
            .await
            .map_err(|e| EngineError::open_failed(path, e))?;
        Ok(Self::from_bytes(buffer))
    }

    /// Create a reader over an in-memory document stream
    pub fn from_bytes(buffer: impl Into<Vec<u8>>) -> Self {
        Self {
            buffer: buffer.into(),
            offset: 0,
            finished: false,
        }
    }

    /// Decode up to `batch_size` request documents
    ///
    /// Returns an empty vector once the stream is exhausted. A JSON syntax
    /// error is returned as the last record of its batch and ends the
    /// stream.
    pub fn read_batch(&mut self, batch_size: usize) -> Vec<RequestRecord> {
        let mut batch = Vec::with_capacity(batch_size);
        if self.finished {
            return batch;
        }

        let mut documents =
            Deserializer::from_slice(&self.buffer[self.offset..]).into_iter::<Value>();

        while batch.len() < batch_size {
            match documents.next() {
                Some(Ok(document)) => batch.push(decode_request(document)),
                Some(Err(e)) => {
                    batch.push(Err(e.into()));
                    self.finished = true;
                    break;
                }
                None => {
                    self.finished = true;
                    break;
                }
            }
        }

        self.offset += documents.byte_offset();
        batch
    }
}
