//! The publication document the conversion reads from and writes into.
//!
//! A [`Publication`] is owned by the caller. The conversion reads its
//! [`spine`](Publication::spine) and [`manifest`](Publication::manifest) links,
//! and mutates only [`MediaOverlay::smil_models`].
//!
//! # Examples
//! - Deserializing a publication document:
//! ```
//! use webpub_smil::Publication;
//!
//! let publication = Publication::from_json(r#"{
//!     "manifest": {
//!         "links": [{"href": "manifest.json", "rel": ["self", "media-overlay"]}]
//!     },
//!     "spine": [
//!         {"idref": "cover", "href": "cover.xhtml"},
//!         {"idref": "c1", "href": "c1.xhtml", "properties": {"media-overlay": "MO/c1.json"}}
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(2, publication.spine.len());
//! assert!(publication.manifest.links[0].has_rel("media-overlay"));
//! assert_eq!(Some("MO/c1.json"), publication.spine[1].media_overlay());
//! // Not yet filled
//! assert!(publication.smil_models().is_none());
//! ```

use crate::smil::SmilModel;
use serde::{Deserialize, Deserializer, Serialize};

/// A publication document: spine, manifest links, and metadata.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Publication {
    /// Content documents in reading order.
    #[serde(default)]
    pub spine: Vec<SpineItem>,
    /// The raw publication manifest.
    #[serde(default)]
    pub manifest: Manifest,
    /// Publication-wide metadata.
    #[serde(default)]
    pub metadata: Metadata,
}

impl Publication {
    /// Creates a publication from its `spine` and manifest `links`,
    /// with no media overlay data filled in.
    pub fn new(spine: Vec<SpineItem>, links: Vec<Link>) -> Self {
        Self {
            spine,
            manifest: Manifest { links },
            metadata: Metadata::default(),
        }
    }

    /// Parses a publication document from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// The converted synchronization trees.
    ///
    /// - [`None`]: conversion never assigned a result
    ///   (not yet run, or the spine is empty).
    /// - `Some([])`: no media overlay is declared, or conversion failed.
    pub fn smil_models(&self) -> Option<&[SmilModel]> {
        self.metadata.media_overlay.smil_models.as_deref()
    }
}

/// The raw publication manifest.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Manifest {
    /// Typed links declared by the publication.
    #[serde(default)]
    pub links: Vec<Link>,
}

/// A typed manifest link.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Link {
    /// The link target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Relations (`rel`) of this link, such as `media-overlay`.
    ///
    /// Accepts either a single string or an array when deserializing.
    #[serde(default, deserialize_with = "one_or_many")]
    pub rel: Vec<String>,
    /// The media type of the target.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl Link {
    /// Creates a link declaring the given relations.
    pub fn new<I, S>(href: impl Into<String>, rel: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            href: Some(href.into()),
            rel: rel.into_iter().map(Into::into).collect(),
            media_type: None,
        }
    }

    /// Returns `true` if `rel` is one of this link's relations.
    pub fn has_rel(&self, rel: &str) -> bool {
        self.rel.iter().any(|value| value == rel)
    }
}

fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}

/// Publication-wide metadata.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Metadata {
    /// Media overlay data produced by the conversion.
    #[serde(default)]
    pub media_overlay: MediaOverlay,
}

/// Media overlay metadata.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct MediaOverlay {
    /// One synchronization tree per spine item, index-aligned with the spine.
    ///
    /// See [`Publication::smil_models`] for the meaning of each state.
    /// Output only; never read from a document.
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub smil_models: Option<Vec<SmilModel>>,
}

/// An entry of the publication spine.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SpineItem {
    /// Identifier of the referenced manifest item.
    pub idref: String,
    /// The referenced content document.
    pub href: String,
    /// Optional properties, such as a media overlay reference.
    #[serde(default)]
    pub properties: SpineItemProperties,
}

impl SpineItem {
    /// Creates a spine item without a media overlay.
    pub fn new(idref: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            idref: idref.into(),
            href: href.into(),
            properties: SpineItemProperties::default(),
        }
    }

    /// Attaches a media overlay `reference` (a path relative to the
    /// publication base url) to this spine item.
    pub fn with_media_overlay(mut self, reference: impl Into<String>) -> Self {
        self.properties.media_overlay = Some(reference.into());
        self
    }

    /// The media overlay reference, if declared and non-empty.
    pub fn media_overlay(&self) -> Option<&str> {
        self.properties
            .media_overlay
            .as_deref()
            .filter(|reference| !reference.is_empty())
    }
}

/// Properties of a [`SpineItem`].
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SpineItemProperties {
    /// Path (relative to the publication base url) of the
    /// per-item media overlay document.
    #[serde(
        default,
        rename = "media-overlay",
        skip_serializing_if = "Option::is_none"
    )]
    pub media_overlay: Option<String>,
}
