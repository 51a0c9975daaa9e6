use crate::errors::{FetchError, FetchResult};
use crate::fetch::Fetcher;
use std::time::Duration;

/// A [`Fetcher`] over a publication served over HTTP.
///
/// Relative overlay references resolve against the directory of the
/// manifest url, so [`Fetcher::fetch_text_contents`] always receives an
/// absolute url.
///
/// # Examples
/// ```no_run
/// # use webpub_smil::errors::FetchResult;
/// use std::time::Duration;
/// use webpub_smil::fetch::HttpFetcher;
///
/// # fn main() -> FetchResult<()> {
/// let fetcher = HttpFetcher::builder("http://localhost:3000/pub/moby/manifest.json")
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFetcher {
    /// Creates a fetcher with a default client and no timeout.
    pub fn new(manifest_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), manifest_url)
    }

    /// Creates a fetcher sharing an existing `client`.
    pub fn with_client(client: reqwest::Client, manifest_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: manifest_url.into(),
        }
    }

    /// Returns a builder to configure the underlying client.
    pub fn builder(manifest_url: impl Into<String>) -> HttpFetcherBuilder {
        HttpFetcherBuilder {
            base_url: manifest_url.into(),
            timeout: None,
        }
    }
}

/// Builder to construct an [`HttpFetcher`] instance.
#[derive(Clone, Debug)]
pub struct HttpFetcherBuilder {
    base_url: String,
    timeout: Option<Duration>,
}

impl HttpFetcherBuilder {
    /// Total time allowed per request, from connecting until the body is read.
    ///
    /// Default: no timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Turn this builder into an [`HttpFetcher`] instance.
    pub fn build(self) -> FetchResult<HttpFetcher> {
        let mut client = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            client = client.timeout(timeout);
        }

        client
            .build()
            .map(|client| HttpFetcher::with_client(client, self.base_url.clone()))
            .map_err(|source| FetchError::Http {
                source,
                url: self.base_url,
            })
    }
}

#[cfg_attr(feature = "threadsafe", async_trait::async_trait)]
#[cfg_attr(not(feature = "threadsafe"), async_trait::async_trait(?Send))]
impl Fetcher for HttpFetcher {
    fn publication_base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_text_contents(&self, url: &str) -> FetchResult<String> {
        let http_error = |source| FetchError::Http {
            source,
            url: url.to_owned(),
        };
        let response = self.client.get(url).send().await.map_err(http_error)?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }
        response.text().await.map_err(http_error)
    }
}
