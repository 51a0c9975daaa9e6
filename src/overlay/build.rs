use crate::errors::{FragmentError, OverlayError, OverlayResult};
use crate::overlay::fragment::{self, AudioClip, TextRef};
use crate::publication::SpineItem;
use crate::smil::{AudioNode, ParNode, SeqNode, SmilModel, TextNode};
use serde::Deserialize;

////////////////////////////////////////////////////////////////////////////////
// PRIVATE API
////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Deserialize)]
struct OverlayGroup {
    children: Option<Vec<OverlaySection>>,
}

#[derive(Debug, Deserialize)]
struct OverlaySection {
    children: Option<Vec<OverlayEntry>>,
}

#[derive(Debug, Deserialize)]
struct OverlayEntry {
    audio: String,
    text: String,
}

impl OverlayEntry {
    fn to_par_node(&self) -> OverlayResult<ParNode> {
        let AudioClip { src, begin, end } = fragment::parse_audio_clip(&self.audio)
            .map_err(|error| fragment_error(error, &self.audio))?;
        let TextRef {
            src_file,
            fragment_id,
        } = fragment::parse_text_ref(&self.text)
            .map_err(|error| fragment_error(error, &self.text))?;

        Ok(ParNode::new(
            AudioNode::new(src, begin, end),
            TextNode::new(self.text.as_str(), src_file, fragment_id),
        ))
    }
}

fn fragment_error(source: FragmentError, reference: &str) -> OverlayError {
    OverlayError::Fragment {
        source,
        reference: reference.to_owned(),
    }
}

////////////////////////////////////////////////////////////////////////////////
// PUBLIC API
////////////////////////////////////////////////////////////////////////////////

/// A per-item media overlay document, as fetched for a single spine item.
///
/// Only the fixed layout `media-overlay[0].children[0].children` is read:
/// ```json
/// {
///   "media-overlay": [{
///     "role": ["section"],
///     "children": [{
///       "role": ["section"],
///       "text": "OEBPS/Text/p001.xhtml",
///       "children": [
///         {"audio": "OEBPS/Audio/01.mp3#t=0,1.8", "text": "OEBPS/Text/p001.xhtml#f000001"},
///         {"audio": "OEBPS/Audio/01.mp3#t=1.8,4.3", "text": "OEBPS/Text/p001.xhtml#f000002"}
///       ]
///     }]
///   }]
/// }
/// ```
/// Any other member (`role`, section-level `text`, ...) is ignored.
#[derive(Debug, Deserialize)]
pub struct OverlayDocument {
    #[serde(rename = "media-overlay", default)]
    groups: Vec<OverlayGroup>,
}

impl OverlayDocument {
    /// Parses an overlay document from JSON.
    ///
    /// Every synchronization entry must carry string `audio` and `text`
    /// members; otherwise parsing fails.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Synchronization entries of the first section of the first group.
    fn entries(&self) -> OverlayResult<&[OverlayEntry]> {
        let group = self
            .groups
            .first()
            .ok_or_else(|| OverlayError::Structure("no `media-overlay` group".to_owned()))?;
        let section = group
            .children
            .as_deref()
            .and_then(|sections| sections.first())
            .ok_or_else(|| OverlayError::Structure("first group has no section".to_owned()))?;

        section.children.as_deref().ok_or_else(|| {
            OverlayError::Structure("first section has no synchronization entries".to_owned())
        })
    }
}

/// Builds the synchronization tree of `spine_item` from its fetched
/// overlay `document`.
///
/// Entries keep their document order. A malformed entry fails the whole
/// document; no partial tree is produced.
///
/// The chapter [`textref`](SeqNode::textref) is left empty; each
/// [`TextNode`] carries the full reference instead.
///
/// # Examples
/// ```
/// use webpub_smil::SpineItem;
/// use webpub_smil::overlay::{OverlayDocument, build_smil_model};
///
/// let document = OverlayDocument::from_json(r#"{"media-overlay": [{"children": [{"children": [
///     {"audio": "Audio/01.mp3#t=1.8,4.3", "text": "Text/p001.xhtml#f000002"}
/// ]}]}]}"#).unwrap();
/// let spine_item = SpineItem::new("c1", "Text/p001.xhtml").with_media_overlay("MO/c1.json");
///
/// let model = build_smil_model(&spine_item, &document, "3.0").unwrap();
/// let par = &model.chapter().pars()[0];
///
/// assert_eq!("c1", model.spine_item_id());
/// assert_eq!(1.8, par.audio().unwrap().clip_begin());
/// assert_eq!("f000002", par.text().src_fragment_id());
/// ```
pub fn build_smil_model(
    spine_item: &SpineItem,
    document: &OverlayDocument,
    smil_version: &str,
) -> OverlayResult<SmilModel> {
    let pars = document
        .entries()?
        .iter()
        .map(OverlayEntry::to_par_node)
        .collect::<OverlayResult<Vec<_>>>()?;

    Ok(SmilModel::new(
        Some(smil_version.to_owned()),
        spine_item.idref.as_str(),
        SeqNode::new("", pars),
    ))
}

/// Synthesizes the tree of a spine item without a declared media overlay:
/// a single text-only pair referencing the whole content document.
pub fn placeholder_smil_model(spine_item: &SpineItem) -> SmilModel {
    let href = spine_item.href.as_str();

    SmilModel::new(
        None,
        spine_item.idref.as_str(),
        SeqNode::new(
            href,
            vec![ParNode::text_only(TextNode::new(href, href, ""))],
        ),
    )
}
