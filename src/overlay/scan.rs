use crate::publication::Link;

/// Returns `true` if any manifest link declares the given media-overlay
/// `relation` (typically [`MEDIA_OVERLAY_REL`](super::MEDIA_OVERLAY_REL)).
pub fn has_media_overlay(links: &[Link], relation: &str) -> bool {
    links.iter().any(|link| link.has_rel(relation))
}
