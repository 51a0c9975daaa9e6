//! Error-related types for fetching and converting media overlays.

pub use crate::util::utf::UtfError;
use std::io;
use std::path::PathBuf;

/// Alias for `Result<T, FetchError>`.
pub type FetchResult<T> = Result<T, FetchError>;

/// Alias for `Result<T, FragmentError>`.
pub type FragmentResult<T> = Result<T, FragmentError>;

/// Alias for `Result<T, OverlayError>`.
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Possible errors from a [`Fetcher`](crate::fetch::Fetcher) while
/// retrieving publication content.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// A given url does not point to a valid location.
    #[error("[InvalidResource - `{url}`]: {source}")]
    InvalidResource {
        /// The root cause of the error.
        source: io::Error,
        /// The url responsible for triggering the error.
        url: String,
    },

    /// The content exists although is unable to be read, typically I/O.
    #[error("[CannotRead - `{url}`]: {source}")]
    CannotRead {
        /// The root cause of the error.
        source: io::Error,
        /// The url responsible for triggering the error.
        url: String,
    },

    /// The content was retrieved although cannot be decoded as text.
    #[error("[InvalidText - `{url}`]: Content cannot be read as UTF-8")]
    InvalidText {
        /// The root cause of the error.
        source: UtfError,
        /// The url responsible for triggering the error.
        url: String,
    },

    /// The publication container itself is unreadable due to not existing,
    /// unsupported format, or malformed state.
    ///
    /// This error is *generally* returned **before** a fetcher is instantiated.
    #[error("[UnreadableArchive - `{path:?}`]: {source}")]
    UnreadableArchive {
        /// The root cause of this error.
        source: io::Error,
        /// The path responsible for triggering the error, if applicable.
        path: Option<PathBuf>,
    },

    /// The HTTP request could not be completed.
    #[cfg(feature = "http")]
    #[error("[Http - `{url}`]: {source}")]
    Http {
        /// The root cause of the error.
        source: reqwest::Error,
        /// The url responsible for triggering the error.
        url: String,
    },

    /// The server answered with a non-success status.
    #[cfg(feature = "http")]
    #[error("[Status - `{url}`]: Server responded with {status}")]
    Status {
        /// The status code returned by the server.
        status: u16,
        /// The url responsible for triggering the error.
        url: String,
    },
}

/// Malformed fragment syntax within a media-overlay entry.
///
/// # Example
/// - Well-formed audio reference: `Audio/01.mp3#t=1.8,4.3`
/// - Well-formed text reference: `Text/p001.xhtml#f000002`
#[non_exhaustive]
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FragmentError {
    /// The reference has no `#` separator.
    #[error("Reference has no fragment: {0}")]
    MissingFragment(String),

    /// The audio fragment has no `key=value` timing form.
    #[error("Audio fragment has no timing key: {0}")]
    MissingTimingKey(String),

    /// The audio fragment uses a key other than `t`.
    #[error("Unsupported audio timing key `{0}` (expected `t`)")]
    UnsupportedTimingKey(String),

    /// The timing value is not a `begin,end` pair.
    #[error("Audio timing is not a `begin,end` pair: {0}")]
    MissingClipRange(String),

    /// A clip boundary is not a number.
    #[error("Invalid clip value: {0}")]
    InvalidClipValue(String),
}

/// Possible errors when resolving the media overlay of a single spine item.
///
/// [`fill_media_overlays`](crate::fill_media_overlays) absorbs every variant into an
/// empty result; they are exposed for callers driving
/// [`aggregate`](crate::overlay::aggregate) or
/// [`resolve_spine_item`](crate::overlay::resolve_spine_item) directly.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum OverlayError {
    /// Retrieval of the overlay document has failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The retrieved overlay document is not valid JSON
    /// or lacks a required `audio`/`text` field.
    #[error("[Json - `{url}`]: {source}")]
    Json {
        /// The root cause of the error.
        source: serde_json::Error,
        /// The url of the offending document.
        url: String,
    },

    /// The overlay document does not have the expected
    /// `media-overlay[0].children[0].children` layout.
    #[error("Unexpected media-overlay structure: {0}")]
    Structure(String),

    /// An `audio` or `text` reference is malformed.
    #[error("[Fragment - `{reference}`]: {source}")]
    Fragment {
        /// The root cause of the error.
        source: FragmentError,
        /// The offending reference.
        reference: String,
    },
}
