use crate::errors::{OverlayError, OverlayResult};
use crate::fetch::Fetcher;
use crate::overlay::OverlaySettings;
use crate::overlay::build::{self, OverlayDocument};
use crate::publication::SpineItem;
use crate::smil::SmilModel;
use crate::util::uri;
use tracing::debug;

/// Resolves an overlay `reference` into the url handed to the fetcher.
///
/// The reference is joined to the directory containing `base_url`
/// (the publication manifest), with `.`/`..` segments collapsed.
///
/// # Examples
/// ```
/// use webpub_smil::overlay::overlay_url;
///
/// assert_eq!(
///     "http://localhost:3000/pub/moby/MO/c1.json",
///     overlay_url("http://localhost:3000/pub/moby/manifest.json", "MO/c1.json"),
/// );
/// assert_eq!("/MO/c1.json", overlay_url("/OEBPS/manifest.json", "../MO/c1.json"));
/// ```
pub fn overlay_url(base_url: &str, reference: &str) -> String {
    uri::resolve_sibling(base_url, reference).into_owned()
}

/// Produces the synchronization tree of a single spine item.
///
/// - Without a media overlay reference, a placeholder tree is returned
///   immediately; the fetcher is not consulted.
/// - Otherwise the referenced document is fetched once (no retries),
///   parsed, and converted.
///
/// Any fetch, JSON, or structural failure is returned as an error for this
/// item only.
pub async fn resolve_spine_item<F: Fetcher + ?Sized>(
    spine_item: &SpineItem,
    fetcher: &F,
    settings: &OverlaySettings,
) -> OverlayResult<SmilModel> {
    let Some(reference) = spine_item.media_overlay() else {
        return Ok(build::placeholder_smil_model(spine_item));
    };

    let url = overlay_url(fetcher.publication_base_url(), reference);
    debug!(idref = %spine_item.idref, %url, "Fetching media overlay");

    let text = fetcher.fetch_text_contents(&url).await?;
    let document =
        OverlayDocument::from_json(&text).map_err(|source| OverlayError::Json { source, url })?;
    let model = build::build_smil_model(spine_item, &document, &settings.smil_version)?;

    debug!(
        idref = %spine_item.idref,
        pars = model.chapter().pars().len(),
        "Media overlay converted"
    );
    Ok(model)
}
