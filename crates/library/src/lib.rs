//! Movie lookup for the CineCast server
//!
//! Maps a movie identifier to a playable file on disk. The resolver is a
//! trait so the HTTP routes carry no filesystem layout assumptions; the
//! default implementation probes a flat directory for supported container
//! extensions.

pub mod lookup;

pub use lookup::{
    content_type_for, DirectoryLibrary, LookupError, MovieFile, MovieResolver,
    SUPPORTED_EXTENSIONS,
};
