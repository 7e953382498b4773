//! Synchronous request reader with iterator interface
//!
//! Provides a streaming iterator over request documents from a JSON file.
//! Delegates JSON format concerns to the json_format module.
//!
//! # Design
//!
//! The input is a stream of JSON documents separated by optional whitespace:
//! one document per line, or a single pretty-printed document. `SyncReader`
//! drives a `serde_json::StreamDeserializer`, decoding one document at a time
//! without loading the whole file into memory.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors on open) are returned from `open()`
//! - A document with the wrong shape is yielded as `Err` and iteration continues
//! - A JSON syntax error is yielded once as `Err` and ends the stream: the
//!   position of the next document cannot be recovered
//! - A read failure is yielded once as `RequestError::Io` and ends the
//!   stream; the strategies treat it as fatal

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::de::IoRead;
use serde_json::{Deserializer, StreamDeserializer, Value};

use crate::io::json_format::{decode_request, RequestRecord};
use crate::types::EngineError;

/// Synchronous request reader
///
/// # Examples
///
/// ```no_run
/// use payment_instruction_engine::io::sync_reader::SyncReader;
/// use std::path::Path;
///
/// let reader = SyncReader::open(Path::new("requests.jsonl")).unwrap();
/// let valid = reader.filter_map(Result::ok).count();
/// println!("{} well-formed requests", valid);
/// ```
pub struct SyncReader<R: Read> {
    documents: StreamDeserializer<'static, IoRead<R>, Value>,
    finished: bool,
}

impl SyncReader<BufReader<File>> {
    /// Open a request file for streaming iteration
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the JSON input file
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if the file opened successfully
    /// * `Err(EngineError::FileNotFound)` if the file does not exist
    /// * `Err(EngineError::IoError)` for any other open failure
    pub fn open(path: &Path) -> Result<Self, EngineError> {
        let file = File::open(path).map_err(|e| EngineError::open_failed(path, e))?;
        Ok(Self::new(BufReader::with_capacity(8 * 1024, file)))
    }
}

impl<R: Read> SyncReader<R> {
    /// Create a reader over any byte source
    pub fn new(reader: R) -> Self {
        Self {
            documents: Deserializer::from_reader(reader).into_iter::<Value>(),
            finished: false,
        }
    }
}

impl<R: Read> Iterator for SyncReader<R> {
    type Item = RequestRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.documents.next()? {
            Ok(document) => Some(decode_request(document)),
            Err(e) => {
                self.finished = true;
                Some(Err(e.into()))
            }
        }
    }
}
