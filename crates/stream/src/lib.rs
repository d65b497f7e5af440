//! Range-request streaming core
//!
//! This crate turns a raw HTTP `Range` header into a single validated byte
//! interval and copies that interval from a seekable source to a response
//! sink in small fixed-size chunks. Peak memory stays at one chunk no matter
//! how large the file or the requested window is.

pub mod range;
pub mod window;

pub use range::{resolve_range, ByteInterval, RangeError, DEFAULT_WINDOW};
pub use window::{stream_window, StreamOutcome, TruncationCause, DEFAULT_CHUNK_SIZE};
