//! Range header resolution
//!
//! Turns a raw `Range` request header plus a known file size into one
//! validated byte interval to serve. Multi-range and suffix ranges are
//! rejected up front so the copy loop only ever sees a single interval.

use std::fmt;

/// Leading window served when a request carries no `Range` header: 2 MiB,
/// enough for a player to probe the container and start playback without
/// pulling the whole file in the first response.
pub const DEFAULT_WINDOW: u64 = 2 * 1024 * 1024;

/// An inclusive byte range within a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteInterval {
    /// First byte offset to serve
    pub start: u64,
    /// Last byte offset to serve, inclusive
    pub end: u64,
}

impl ByteInterval {
    /// Number of bytes covered by the interval, at least 1 by construction
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }
}

impl fmt::Display for ByteInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Failures produced while resolving a `Range` header
#[derive(Debug)]
pub enum RangeError {
    /// Header syntax was not understood
    Malformed(String),
    /// The requested range selects no bytes of the file
    Unsatisfiable(u64),
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::Malformed(msg) => write!(f, "Invalid Range header: {}", msg),
            RangeError::Unsatisfiable(size) => {
                write!(f, "Range not satisfiable for file of {} bytes", size)
            }
        }
    }
}

impl std::error::Error for RangeError {}

/// Resolve a `Range` header against a known file size
///
/// With no header the first `default_window` bytes of the file are selected.
/// With a `bytes=<start>-[<end>]` header the interval starts at `start` and
/// ends at the requested end, capped at `start + default_window - 1` and at
/// the last byte of the file. An open-ended range (`bytes=<start>-`) gets the
/// same window cap rather than running to end of file, so a single response
/// never exceeds the window. A `default_window` of zero disables the cap.
///
/// # Errors
/// * `Malformed` for anything other than a single `bytes=<start>-[<end>]`
///   range with a numeric start
/// * `Unsatisfiable` when the start lies at or past end of file, when the
///   requested end precedes the start, or when the file is empty
pub fn resolve_range(
    range_header: Option<&str>,
    file_size: u64,
    default_window: u64,
) -> Result<ByteInterval, RangeError> {
    // An empty file has no serveable bytes, with or without a header
    if file_size == 0 {
        return Err(RangeError::Unsatisfiable(0));
    }

    let header = match range_header {
        Some(header) => header,
        None => {
            let end = if default_window == 0 {
                file_size - 1
            } else {
                default_window.min(file_size) - 1
            };
            return Ok(ByteInterval { start: 0, end });
        }
    };

    let range_set = header
        .strip_prefix("bytes=")
        .ok_or_else(|| RangeError::Malformed(format!("expected 'bytes=<start>-<end>', got '{}'", header)))?;

    let (start_str, end_str) = range_set
        .split_once('-')
        .ok_or_else(|| RangeError::Malformed(format!("missing '-' separator in '{}'", header)))?;

    if start_str.is_empty() {
        // Suffix ranges (bytes=-N) are not supported
        return Err(RangeError::Malformed(format!("missing start byte in '{}'", header)));
    }

    let start: u64 = start_str
        .parse()
        .map_err(|_| RangeError::Malformed(format!("invalid start byte '{}'", start_str)))?;

    if start >= file_size {
        return Err(RangeError::Unsatisfiable(file_size));
    }

    let window_end = if default_window == 0 {
        file_size - 1
    } else {
        start.saturating_add(default_window - 1)
    };

    let end = if end_str.is_empty() {
        window_end
    } else {
        let requested: u64 = end_str
            .parse()
            .map_err(|_| RangeError::Malformed(format!("invalid end byte '{}'", end_str)))?;
        if requested < start {
            return Err(RangeError::Unsatisfiable(file_size));
        }
        requested.min(window_end)
    };

    Ok(ByteInterval {
        start,
        end: end.min(file_size - 1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_header_serves_leading_window() {
        let interval = resolve_range(None, 10_000_000, DEFAULT_WINDOW).unwrap();
        assert_eq!(interval, ByteInterval { start: 0, end: 2_097_151 });
        assert_eq!(interval.len(), 2 * 1024 * 1024);
    }

    #[test]
    fn test_no_header_small_file_serves_whole_file() {
        let interval = resolve_range(None, 100, DEFAULT_WINDOW).unwrap();
        assert_eq!(interval, ByteInterval { start: 0, end: 99 });
    }

    #[test]
    fn test_explicit_range_within_window() {
        let interval = resolve_range(Some("bytes=0-499"), 1000, DEFAULT_WINDOW).unwrap();
        assert_eq!(interval, ByteInterval { start: 0, end: 499 });
    }

    #[test]
    fn test_explicit_end_capped_at_window() {
        // Requested 10 MiB worth but the window caps the response
        let interval = resolve_range(Some("bytes=0-9999999"), 20_000_000, 4096).unwrap();
        assert_eq!(interval, ByteInterval { start: 0, end: 4095 });
    }

    #[test]
    fn test_explicit_end_clamped_to_file_end() {
        let interval = resolve_range(Some("bytes=50-1000"), 100, DEFAULT_WINDOW).unwrap();
        assert_eq!(interval, ByteInterval { start: 50, end: 99 });
    }

    #[test]
    fn test_open_range_gets_window_cap() {
        let interval = resolve_range(Some("bytes=5000000-"), 10_000_000, DEFAULT_WINDOW).unwrap();
        assert_eq!(interval, ByteInterval { start: 5_000_000, end: 7_097_151 });
        assert_eq!(interval.len(), 2_097_152);
    }

    #[test]
    fn test_open_range_clamped_to_file_end() {
        let interval = resolve_range(Some("bytes=90-"), 100, DEFAULT_WINDOW).unwrap();
        assert_eq!(interval, ByteInterval { start: 90, end: 99 });
    }

    #[test]
    fn test_zero_window_disables_cap() {
        let interval = resolve_range(None, 10_000_000, 0).unwrap();
        assert_eq!(interval, ByteInterval { start: 0, end: 9_999_999 });

        let interval = resolve_range(Some("bytes=10-"), 10_000_000, 0).unwrap();
        assert_eq!(interval, ByteInterval { start: 10, end: 9_999_999 });
    }

    #[test]
    fn test_start_at_file_size_unsatisfiable() {
        let err = resolve_range(Some("bytes=200-"), 100, DEFAULT_WINDOW).unwrap_err();
        assert!(matches!(err, RangeError::Unsatisfiable(100)));

        let err = resolve_range(Some("bytes=100-"), 100, DEFAULT_WINDOW).unwrap_err();
        assert!(matches!(err, RangeError::Unsatisfiable(100)));
    }

    #[test]
    fn test_end_before_start_unsatisfiable() {
        let err = resolve_range(Some("bytes=50-10"), 100, DEFAULT_WINDOW).unwrap_err();
        assert!(matches!(err, RangeError::Unsatisfiable(100)));
    }

    #[test]
    fn test_empty_file_unsatisfiable() {
        let err = resolve_range(None, 0, DEFAULT_WINDOW).unwrap_err();
        assert!(matches!(err, RangeError::Unsatisfiable(0)));

        let err = resolve_range(Some("bytes=0-"), 0, DEFAULT_WINDOW).unwrap_err();
        assert!(matches!(err, RangeError::Unsatisfiable(0)));
    }

    #[test]
    fn test_wrong_unit_malformed() {
        let err = resolve_range(Some("bits=0-100"), 1000, DEFAULT_WINDOW).unwrap_err();
        assert!(matches!(err, RangeError::Malformed(_)));

        // Unit token is case-sensitive
        let err = resolve_range(Some("Bytes=0-100"), 1000, DEFAULT_WINDOW).unwrap_err();
        assert!(matches!(err, RangeError::Malformed(_)));
    }

    #[test]
    fn test_missing_separator_malformed() {
        let err = resolve_range(Some("bytes=100"), 1000, DEFAULT_WINDOW).unwrap_err();
        assert!(matches!(err, RangeError::Malformed(_)));

        let err = resolve_range(Some("bytes0-100"), 1000, DEFAULT_WINDOW).unwrap_err();
        assert!(matches!(err, RangeError::Malformed(_)));
    }

    #[test]
    fn test_missing_start_malformed() {
        let err = resolve_range(Some("bytes=-500"), 1000, DEFAULT_WINDOW).unwrap_err();
        assert!(matches!(err, RangeError::Malformed(_)));

        let err = resolve_range(Some("bytes=-"), 1000, DEFAULT_WINDOW).unwrap_err();
        assert!(matches!(err, RangeError::Malformed(_)));
    }

    #[test]
    fn test_non_numeric_bounds_malformed() {
        let err = resolve_range(Some("bytes=foo-bar"), 1000, DEFAULT_WINDOW).unwrap_err();
        assert!(matches!(err, RangeError::Malformed(_)));

        let err = resolve_range(Some("bytes=0-bar"), 1000, DEFAULT_WINDOW).unwrap_err();
        assert!(matches!(err, RangeError::Malformed(_)));
    }

    #[test]
    fn test_multi_range_malformed() {
        let err = resolve_range(Some("bytes=0-10,20-30"), 1000, DEFAULT_WINDOW).unwrap_err();
        assert!(matches!(err, RangeError::Malformed(_)));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let first = resolve_range(Some("bytes=123-"), 50_000, 4096).unwrap();
        let second = resolve_range(Some("bytes=123-"), 50_000, 4096).unwrap();
        assert_eq!(first, second);
    }
}
