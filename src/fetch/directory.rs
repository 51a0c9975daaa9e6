use crate::errors::{FetchError, FetchResult};
use crate::fetch::{self, Fetcher};
use std::io;
use std::path::{Path, PathBuf};

/// A [`Fetcher`] over an unpacked publication stored in a directory.
///
/// Urls handed to [`Fetcher::fetch_text_contents`] are container paths
/// (`/OEBPS/MO/c1.json`), typically produced by resolving overlay references
/// against [`Fetcher::publication_base_url`]. Paths escaping the directory
/// are rejected.
///
/// # Examples
/// ```no_run
/// # use webpub_smil::errors::FetchResult;
/// use webpub_smil::fetch::{DirectoryFetcher, Fetcher};
///
/// # async fn run() -> FetchResult<()> {
/// let fetcher = DirectoryFetcher::open("publications/moby-dick", "/manifest.json")?;
/// let manifest = fetcher.fetch_text_contents("/manifest.json").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DirectoryFetcher {
    root: PathBuf,
    base_url: String,
}

impl DirectoryFetcher {
    /// Opens the publication stored at `dir`, whose manifest lives at
    /// `manifest_href` relative to the directory root.
    pub fn open(dir: impl AsRef<Path>, manifest_href: impl Into<String>) -> FetchResult<Self> {
        let dir = dir.as_ref();

        match dir.canonicalize() {
            Ok(root) if root.is_dir() => Ok(Self {
                root,
                base_url: manifest_href.into(),
            }),
            Ok(_) => Err(FetchError::UnreadableArchive {
                path: Some(dir.to_path_buf()),
                source: io::Error::from(io::ErrorKind::NotADirectory),
            }),
            Err(source) => Err(FetchError::UnreadableArchive {
                path: Some(dir.to_path_buf()),
                source,
            }),
        }
    }

    /// The canonical directory the publication is read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn get_path(&self, url: &str) -> FetchResult<PathBuf> {
        let invalid = |source| FetchError::InvalidResource {
            source,
            url: url.to_owned(),
        };
        let path = self.root.join(fetch::container_path(url)?);
        let resolved = tokio::fs::canonicalize(&path).await.map_err(invalid)?;
        let is_file = tokio::fs::metadata(&resolved)
            .await
            .map(|metadata| metadata.is_file())
            .map_err(invalid)?;

        // Path traversal mitigation (symlinks pointing outside the root)
        if resolved.starts_with(&self.root) && is_file {
            Ok(resolved)
        } else {
            Err(invalid(io::Error::new(
                io::ErrorKind::NotFound,
                "Provided path is inaccessible or not a file",
            )))
        }
    }
}

#[cfg_attr(feature = "threadsafe", async_trait::async_trait)]
#[cfg_attr(not(feature = "threadsafe"), async_trait::async_trait(?Send))]
impl Fetcher for DirectoryFetcher {
    fn publication_base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_text_contents(&self, url: &str) -> FetchResult<String> {
        let path = self.get_path(url).await?;
        let data = tokio::fs::read(&path)
            .await
            .map_err(|source| FetchError::CannotRead {
                source,
                url: url.to_owned(),
            })?;

        fetch::decode_text(url, data)
    }
}
