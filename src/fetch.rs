//! Retrieval of publication content.
//!
//! The conversion pipeline never touches the network or disk directly; it
//! goes through a [`Fetcher`], which knows where the publication lives
//! ([`Fetcher::publication_base_url`]) and how to retrieve a file's text.
//!
//! # Provided fetchers
//! - [`DirectoryFetcher`]: an unpacked publication on disk.
//! - [`ZipFetcher`]: a packaged (zipped) publication.
//! - `HttpFetcher`: a publication served over HTTP (requires the `http` feature).

mod directory;
#[cfg(feature = "http")]
mod http;
mod zip;

use crate::errors::{FetchError, FetchResult};
use crate::util::{self, uri};
use std::io;

pub use crate::util::sync::SendAndSync;
pub use self::directory::DirectoryFetcher;
#[cfg(feature = "http")]
pub use self::http::{HttpFetcher, HttpFetcherBuilder};
pub use self::zip::ZipFetcher;

/// Asynchronous access to the files of a publication.
///
/// With the `threadsafe` feature (default), implementors and the futures
/// they return must be [`Send`] + [`Sync`]. Without it, futures are `?Send`,
/// which suits single-threaded executors.
///
/// # Examples
/// - Implementing a fetcher over an in-memory map:
/// ```
/// # use std::collections::HashMap;
/// # use std::io;
/// use webpub_smil::errors::{FetchError, FetchResult};
/// use webpub_smil::fetch::Fetcher;
///
/// struct MemoryFetcher(HashMap<String, String>);
///
/// #[async_trait::async_trait]
/// impl Fetcher for MemoryFetcher {
///     fn publication_base_url(&self) -> &str {
///         "/manifest.json"
///     }
///
///     async fn fetch_text_contents(&self, url: &str) -> FetchResult<String> {
///         self.0.get(url).cloned().ok_or_else(|| FetchError::InvalidResource {
///             source: io::Error::from(io::ErrorKind::NotFound),
///             url: url.to_owned(),
///         })
///     }
/// }
/// ```
#[cfg_attr(feature = "threadsafe", async_trait::async_trait)]
#[cfg_attr(not(feature = "threadsafe"), async_trait::async_trait(?Send))]
pub trait Fetcher: SendAndSync {
    /// The location of the publication manifest.
    ///
    /// Overlay references declared by spine items are resolved against the
    /// directory containing this url.
    fn publication_base_url(&self) -> &str;

    /// Retrieves the textual contents at the given `url`.
    async fn fetch_text_contents(&self, url: &str) -> FetchResult<String>;
}

/// Maps a resolved url onto a relative container path for local fetchers.
///
/// `/OEBPS/MO/c1.json#x` -> `OEBPS/MO/c1.json`
fn container_path(url: &str) -> FetchResult<String> {
    let main = url.split(['?', '#']).next().unwrap_or_default();

    if main.contains("://") {
        return Err(FetchError::InvalidResource {
            source: io::Error::new(
                io::ErrorKind::Unsupported,
                "Local fetchers cannot retrieve absolute urls",
            ),
            url: url.to_owned(),
        });
    }

    let path = uri::normalize(&uri::decode(main));
    let path = path.strip_prefix('/').unwrap_or(&path);

    if path.is_empty() {
        return Err(FetchError::InvalidResource {
            source: io::Error::from(io::ErrorKind::InvalidInput),
            url: url.to_owned(),
        });
    }
    Ok(path.to_owned())
}

fn decode_text(url: &str, data: Vec<u8>) -> FetchResult<String> {
    util::utf::decode_text(data).map_err(|source| FetchError::InvalidText {
        source,
        url: url.to_owned(),
    })
}
