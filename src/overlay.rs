//! Media overlay conversion.
//!
//! The conversion runs in four stages:
//! 1. **Scan**: [`has_media_overlay`] checks whether the manifest links
//!    declare the media-overlay relation at all.
//! 2. **Resolve**: [`resolve_spine_item`] fetches the overlay document of one
//!    spine item, or synthesizes a placeholder when none is declared.
//! 3. **Build**: [`build_smil_model`] turns a fetched document into a
//!    [`SmilModel`].
//! 4. **Aggregate**: [`aggregate`] resolves every spine item concurrently,
//!    keeping spine order, and discards everything if any item fails.
//!
//! [`OverlayConverter`] (or [`fill_media_overlays`](crate::fill_media_overlays))
//! drives all four and writes the result into the [`Publication`].

mod aggregate;
mod build;
mod fragment;
mod resolve;
mod scan;

use crate::fetch::Fetcher;
use crate::publication::Publication;
use crate::smil::SmilModel;
use tracing::debug;

pub use self::aggregate::{Aggregate, aggregate};
pub use self::build::{OverlayDocument, build_smil_model, placeholder_smil_model};
pub use self::fragment::{AudioClip, TextRef, parse_audio_clip, parse_text_ref};
pub use self::resolve::{overlay_url, resolve_spine_item};
pub use self::scan::has_media_overlay;

/// The link relation declaring media overlay support.
pub const MEDIA_OVERLAY_REL: &str = "media-overlay";
/// The version tag assigned to fetched trees.
pub const SMIL_VERSION: &str = "3.0";

/// Settings applied when converting media overlays.
///
/// To create a mutable settings instance, see
/// [`OverlaySettings::builder`] or [`OverlaySettings::default`].
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct OverlaySettings {
    /// The manifest link relation that marks a publication as
    /// carrying media overlays.
    ///
    /// Default: [`MEDIA_OVERLAY_REL`]
    pub relation: String,
    /// The version tag assigned to [`SmilModel::smil_version`]
    /// of fetched trees.
    ///
    /// Default: [`SMIL_VERSION`]
    pub smil_version: String,
    /// Upper bound on overlay documents fetched at once.
    ///
    /// [`None`] fetches every spine item's document at once.
    /// A limit of `0` is treated as `1`.
    /// Either way, results keep spine order.
    ///
    /// Default: [`None`]
    pub max_concurrent_fetches: Option<usize>,
}

impl OverlaySettings {
    /// Returns a builder to create an [`OverlaySettings`] instance.
    pub fn builder() -> OverlaySettingsBuilder {
        OverlaySettingsBuilder(Self::default())
    }
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            relation: MEDIA_OVERLAY_REL.to_owned(),
            smil_version: SMIL_VERSION.to_owned(),
            max_concurrent_fetches: None,
        }
    }
}

impl From<OverlaySettingsBuilder> for OverlaySettings {
    fn from(value: OverlaySettingsBuilder) -> Self {
        value.build()
    }
}

/// Builder to construct an [`OverlaySettings`] instance.
///
/// # Examples
/// - Passing a builder to an [`OverlayConverter`]:
/// ```
/// # use webpub_smil::fetch::DirectoryFetcher;
/// use webpub_smil::overlay::{OverlayConverter, OverlaySettings};
///
/// # fn convert(fetcher: &DirectoryFetcher) {
/// let converter = OverlayConverter::with_settings(
///     fetcher,
///     OverlaySettings::builder()
///         .relation("http://example.org/rel/narration")
///         .max_concurrent_fetches(4),
/// );
/// assert_eq!(Some(4), converter.settings().max_concurrent_fetches);
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct OverlaySettingsBuilder(OverlaySettings);

impl OverlaySettingsBuilder {
    /// Turn this builder into an [`OverlaySettings`] instance.
    pub fn build(self) -> OverlaySettings {
        self.0
    }

    /// See [`OverlaySettings::relation`].
    pub fn relation(mut self, relation: impl Into<String>) -> Self {
        self.0.relation = relation.into();
        self
    }

    /// See [`OverlaySettings::smil_version`].
    pub fn smil_version(mut self, smil_version: impl Into<String>) -> Self {
        self.0.smil_version = smil_version.into();
        self
    }

    /// See [`OverlaySettings::max_concurrent_fetches`].
    pub fn max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.0.max_concurrent_fetches = Some(limit);
        self
    }
}

/// Converts the media overlays of a [`Publication`] through a [`Fetcher`].
///
/// # Examples
/// - Filling the media overlay data of a publication:
/// ```no_run
/// # use webpub_smil::errors::FetchResult;
/// use webpub_smil::Publication;
/// use webpub_smil::fetch::DirectoryFetcher;
/// use webpub_smil::overlay::OverlayConverter;
///
/// # async fn run(mut publication: Publication) -> FetchResult<()> {
/// let fetcher = DirectoryFetcher::open("publications/moby-dick", "/manifest.json")?;
///
/// OverlayConverter::new(&fetcher).fill(&mut publication).await;
///
/// for model in publication.smil_models().unwrap_or_default() {
///     println!("{}: {} pars", model.spine_item_id(), model.chapter().pars().len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct OverlayConverter<'a, F: ?Sized> {
    fetcher: &'a F,
    settings: OverlaySettings,
}

impl<'a, F: Fetcher + ?Sized> OverlayConverter<'a, F> {
    /// Creates a converter with [`OverlaySettings::default`].
    pub fn new(fetcher: &'a F) -> Self {
        Self::with_settings(fetcher, OverlaySettings::default())
    }

    /// Creates a converter with the given `settings`.
    pub fn with_settings(fetcher: &'a F, settings: impl Into<OverlaySettings>) -> Self {
        Self {
            fetcher,
            settings: settings.into(),
        }
    }

    /// The settings applied by this converter.
    pub fn settings(&self) -> &OverlaySettings {
        &self.settings
    }

    /// Converts the media overlays of `publication` without modifying it.
    ///
    /// - [`None`]: the spine is empty; nothing is scanned or fetched.
    /// - `Some([])`: no media overlay is declared, or any spine item failed.
    /// - `Some(models)`: one tree per spine item, in spine order.
    pub async fn convert(&self, publication: &Publication) -> Option<Vec<SmilModel>> {
        if publication.spine.is_empty() {
            debug!("Spine is empty; media overlay conversion skipped");
            return None;
        }

        if !has_media_overlay(&publication.manifest.links, &self.settings.relation) {
            debug!(relation = %self.settings.relation, "No media overlay declared");
            return Some(Vec::new());
        }

        Some(
            aggregate(&publication.spine, self.fetcher, &self.settings)
                .await
                .into_models(),
        )
    }

    /// Converts the media overlays of `publication` and stores them in
    /// [`MediaOverlay::smil_models`](crate::publication::MediaOverlay::smil_models).
    ///
    /// Never fails: errors degrade to an empty list. When the spine is empty
    /// the field is left untouched.
    pub async fn fill(&self, publication: &mut Publication) {
        if let Some(models) = self.convert(publication).await {
            publication.metadata.media_overlay.smil_models = Some(models);
        }
    }
}
