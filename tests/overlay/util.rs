use std::collections::HashMap;
use std::io;
use std::sync::Mutex;
use std::time::Duration;
use webpub_smil::errors::{FetchError, FetchResult};
use webpub_smil::fetch::Fetcher;
use webpub_smil::{Link, Publication, SpineItem};

pub const BASE_URL: &str = "http://localhost:3000/pub/L1Vz/manifest.json";
pub const PUB_ROOT: &str = "http://localhost:3000/pub/L1Vz";

/// A [`Fetcher`] answering from a fixed table, optionally after a delay.
///
/// Every requested url is recorded, including failed ones.
pub struct ScriptedFetcher {
    responses: HashMap<String, (Duration, Option<String>)>,
    requested: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Serve `body` at `url` after `delay_ms`.
    pub fn respond(mut self, url: &str, delay_ms: u64, body: impl Into<String>) -> Self {
        self.responses.insert(
            url.to_owned(),
            (Duration::from_millis(delay_ms), Some(body.into())),
        );
        self
    }

    /// Fail `url` after `delay_ms`.
    pub fn fail(mut self, url: &str, delay_ms: u64) -> Self {
        self.responses
            .insert(url.to_owned(), (Duration::from_millis(delay_ms), None));
        self
    }

    pub fn requested(&self) -> Vec<String> {
        let mut requested = self.requested.lock().unwrap().clone();
        requested.sort();
        requested
    }
}

#[async_trait::async_trait]
impl Fetcher for ScriptedFetcher {
    fn publication_base_url(&self) -> &str {
        BASE_URL
    }

    async fn fetch_text_contents(&self, url: &str) -> FetchResult<String> {
        self.requested.lock().unwrap().push(url.to_owned());

        let not_found = || FetchError::InvalidResource {
            source: io::Error::from(io::ErrorKind::NotFound),
            url: url.to_owned(),
        };
        let (delay, body) = self.responses.get(url).ok_or_else(not_found)?;

        tokio::time::sleep(*delay).await;
        body.clone().ok_or_else(not_found)
    }
}

/// An overlay document narrating `fragments` of `text_file` with consecutive
/// one-second clips from `audio_file`.
pub fn overlay_json(audio_file: &str, text_file: &str, fragments: &[&str]) -> String {
    let entries = fragments
        .iter()
        .enumerate()
        .map(|(i, fragment)| {
            serde_json::json!({
                "audio": format!("{PUB_ROOT}/{audio_file}#t={},{}", i, i + 1),
                "text": format!("{PUB_ROOT}/{text_file}#{fragment}"),
            })
        })
        .collect::<Vec<_>>();

    serde_json::json!({
        "media-overlay": [{
            "children": [{
                "children": entries,
                "role": ["section"],
                "text": format!("{PUB_ROOT}/{text_file}"),
            }],
            "role": ["section"],
        }]
    })
    .to_string()
}

pub fn media_overlay_links() -> Vec<Link> {
    vec![
        Link::new("manifest.json", ["self"]),
        Link::new("MO/index.json", ["media-overlay"]),
    ]
}

/// `c1`..`cN`, each declaring `MO/cN.json`.
pub fn narrated_publication(count: usize) -> Publication {
    let spine = (1..=count)
        .map(|n| {
            SpineItem::new(format!("c{n}"), format!("Text/c{n}.xhtml"))
                .with_media_overlay(format!("MO/c{n}.json"))
        })
        .collect();

    Publication::new(spine, media_overlay_links())
}

pub fn mo_url(n: usize) -> String {
    format!("{PUB_ROOT}/MO/c{n}.json")
}
