use crate::errors::{FetchError, FetchResult};
use crate::fetch::{self, Fetcher};
use crate::util::sync::Lock;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// A [`Fetcher`] over a packaged (zipped) publication.
///
/// Entries are read synchronously while holding an internal lock;
/// overlay documents are small, so this does not stall the executor
/// for long.
///
/// # Examples
/// ```no_run
/// # use webpub_smil::errors::FetchResult;
/// use webpub_smil::fetch::{Fetcher, ZipFetcher};
///
/// # async fn run() -> FetchResult<()> {
/// let fetcher = ZipFetcher::open("moby-dick.webpub", "/manifest.json")?;
/// let manifest = fetcher.fetch_text_contents("/manifest.json").await?;
/// # Ok(())
/// # }
/// ```
pub struct ZipFetcher<R> {
    zip: Lock<ZipArchive<R>>,
    base_url: String,
}

impl ZipFetcher<BufReader<File>> {
    /// Opens the packaged publication at `path`, whose manifest lives at
    /// `manifest_href` within the archive.
    pub fn open(path: impl AsRef<Path>, manifest_href: impl Into<String>) -> FetchResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| FetchError::UnreadableArchive {
            source,
            path: Some(path.to_path_buf()),
        })?;

        Self::new(BufReader::new(file), Some(path), manifest_href.into())
    }
}

impl<R: Read + Seek> ZipFetcher<R> {
    /// Reads a packaged publication from any `reader`, such as an in-memory
    /// [`Cursor`](std::io::Cursor).
    pub fn read(reader: R, manifest_href: impl Into<String>) -> FetchResult<Self> {
        Self::new(reader, None, manifest_href.into())
    }

    /// `reader` (and optional `path` for a more descriptive error message).
    fn new(reader: R, path: Option<&Path>, base_url: String) -> FetchResult<Self> {
        ZipArchive::new(reader)
            .map(|zip| Self {
                zip: Lock::new(zip),
                base_url,
            })
            .map_err(|error| FetchError::UnreadableArchive {
                source: io::Error::from(error),
                path: path.map(Path::to_path_buf),
            })
    }

    fn read_entry(&self, url: &str) -> FetchResult<Vec<u8>> {
        let name = fetch::container_path(url)?;
        let mut zip = self.zip.acquire().ok_or_else(|| FetchError::CannotRead {
            source: io::Error::other("Poisoned ZipFetcher"),
            url: url.to_owned(),
        })?;
        let mut entry = zip
            .by_name(&name)
            .map_err(|error| FetchError::InvalidResource {
                source: io::Error::from(error),
                url: url.to_owned(),
            })?;
        let mut buf = Vec::new();

        entry
            .read_to_end(&mut buf)
            .map(|_| buf)
            .map_err(|source| FetchError::CannotRead {
                source,
                url: url.to_owned(),
            })
    }
}

#[cfg_attr(feature = "threadsafe", async_trait::async_trait)]
#[cfg_attr(not(feature = "threadsafe"), async_trait::async_trait(?Send))]
impl<#[cfg(feature = "threadsafe")] R: Send, #[cfg(not(feature = "threadsafe"))] R> Fetcher
    for ZipFetcher<R>
where
    R: Read + Seek + 'static,
{
    fn publication_base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_text_contents(&self, url: &str) -> FetchResult<String> {
        let data = self.read_entry(url)?;
        fetch::decode_text(url, data)
    }
}
