//! Bounded-memory chunked copy loop
//!
//! Copies one byte interval from a seekable source to a sink, reading and
//! writing `chunk_size` bytes at a time. The loop never buffers more than a
//! single chunk, so streaming a multi-gigabyte window costs the same memory
//! as a small one.

use std::fmt;
use std::io::SeekFrom;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt, AsyncWrite, AsyncWriteExt};

use crate::range::ByteInterval;

/// Copy chunk size: 6 KiB per read keeps peak memory small and puts bytes on
/// the wire before the window has been fully read.
pub const DEFAULT_CHUNK_SIZE: u64 = 6 * 1024;

/// Why a stream stopped before the full interval was written
#[derive(Debug)]
pub enum TruncationCause {
    /// The source reported end of data inside the interval
    SourceExhausted,
    /// Seeking or reading the source failed
    Source(std::io::Error),
    /// Writing to the sink failed, typically a dropped client connection
    Sink(std::io::Error),
}

impl fmt::Display for TruncationCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TruncationCause::SourceExhausted => write!(f, "source ended before the interval"),
            TruncationCause::Source(e) => write!(f, "source error: {}", e),
            TruncationCause::Sink(e) => write!(f, "sink error: {}", e),
        }
    }
}

/// Result of one streaming pass over a byte interval
#[derive(Debug)]
pub enum StreamOutcome {
    /// Every byte of the interval reached the sink
    Completed {
        /// Bytes written, equal to the interval length
        bytes_sent: u64,
    },
    /// The loop stopped early; bytes already written stay written
    Truncated {
        /// Bytes written before the stop
        bytes_sent: u64,
        /// What stopped the loop
        cause: TruncationCause,
    },
}

impl StreamOutcome {
    /// Bytes that reached the sink, regardless of how the stream ended
    pub fn bytes_sent(&self) -> u64 {
        match self {
            StreamOutcome::Completed { bytes_sent } => *bytes_sent,
            StreamOutcome::Truncated { bytes_sent, .. } => *bytes_sent,
        }
    }
}

/// Copy `interval` from `source` to `sink` in `chunk_size`-byte chunks
///
/// Seeks the source to `interval.start`, then alternates bounded reads and
/// full writes until the interval is exhausted. Bytes arrive at the sink in
/// file order. A zero-byte read, a read error, or a write error stops the
/// loop immediately with the bytes already sent; nothing is retried, since a
/// committed HTTP response cannot be rewound.
pub async fn stream_window<S, W>(
    source: &mut S,
    interval: ByteInterval,
    sink: &mut W,
    chunk_size: u64,
) -> StreamOutcome
where
    S: AsyncRead + AsyncSeek + Unpin,
    W: AsyncWrite + Unpin,
{
    if let Err(e) = source.seek(SeekFrom::Start(interval.start)).await {
        return StreamOutcome::Truncated {
            bytes_sent: 0,
            cause: TruncationCause::Source(e),
        };
    }

    let length = interval.len();
    let chunk_size = chunk_size.max(1);
    let mut buffer = vec![0u8; chunk_size as usize];
    let mut bytes_sent: u64 = 0;

    while bytes_sent < length {
        let remaining = length - bytes_sent;
        let read_size = remaining.min(chunk_size) as usize;

        let n = match source.read(&mut buffer[..read_size]).await {
            // Source ran out inside the interval; the size-is-known invariant
            // says this should not happen, but it must not hang
            Ok(0) => {
                return StreamOutcome::Truncated {
                    bytes_sent,
                    cause: TruncationCause::SourceExhausted,
                }
            }
            Ok(n) => n,
            Err(e) => {
                return StreamOutcome::Truncated {
                    bytes_sent,
                    cause: TruncationCause::Source(e),
                }
            }
        };

        if let Err(e) = sink.write_all(&buffer[..n]).await {
            return StreamOutcome::Truncated {
                bytes_sent,
                cause: TruncationCause::Sink(e),
            };
        }

        bytes_sent += n as u64;
    }

    StreamOutcome::Completed { bytes_sent }
}
