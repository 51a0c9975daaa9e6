//! # webpub-smil
//!
//! Converts the media overlays declared by a web publication manifest into
//! SMIL-like synchronization trees ([`SmilModel`]) for reading systems
//! that narrate text in sync with audio.
//!
//! Each spine item may reference a per-item overlay document
//! (`properties["media-overlay"]`). Those documents are fetched concurrently
//! through a [`Fetcher`](fetch::Fetcher), converted into one tree per spine
//! item, and written to `metadata.media_overlay.smil_models`.
//!
//! The conversion is all-or-nothing: if any overlay document cannot be
//! fetched or parsed, the result is an empty list rather than an error.
//!
//! ## Examples
//! Filling the media overlays of an unpacked publication:
//! ```no_run
//! use webpub_smil::Publication;
//! use webpub_smil::fetch::{DirectoryFetcher, Fetcher};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = DirectoryFetcher::open("publications/moby-dick", "/manifest.json")?;
//! let manifest = fetcher.fetch_text_contents("/manifest.json").await?;
//! let mut publication = Publication::from_json(&manifest)?;
//!
//! webpub_smil::fill_media_overlays(&mut publication, &fetcher).await;
//!
//! for model in publication.smil_models().unwrap_or_default() {
//!     let chapter = model.chapter();
//!     println!("{} ({} pars)", model.spine_item_id(), chapter.pars().len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//! - `threadsafe` (default): [`Fetcher`](fetch::Fetcher) implementors and
//!   their futures are `Send + Sync`.
//! - `http`: enables `HttpFetcher`, backed by `reqwest`.

pub mod errors;
pub mod fetch;
pub mod overlay;
pub mod publication;
pub mod smil;
mod util;

pub use self::overlay::{OverlayConverter, OverlaySettings};
pub use self::publication::{Link, Publication, SpineItem};
pub use self::smil::SmilModel;

use self::fetch::Fetcher;

/// Converts the media overlays of `publication` with
/// [`OverlaySettings::default`].
///
/// See [`OverlayConverter::fill`].
pub async fn fill_media_overlays<F: Fetcher + ?Sized>(publication: &mut Publication, fetcher: &F) {
    OverlayConverter::new(fetcher).fill(publication).await
}
