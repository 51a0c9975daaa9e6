//! The SMIL-like synchronization tree consumed by the rendering layer.
//!
//! Each [`SmilModel`] describes the media overlay of one spine item:
//! ```text
//! SmilModel (root)
//! └── SeqNode (chapter)
//!     ├── ParNode: AudioNode + TextNode
//!     ├── ParNode: AudioNode + TextNode
//!     └── ...
//! ```
//! [`ParNode`] order is playback order.
//!
//! All types serialize (via [`serde`]) to the camelCase shape expected by
//! legacy reading systems, with a `nodeType` discriminator on every node:
//! ```json
//! {"nodeType": "audio", "clipBegin": 1.8, "clipEnd": 4.3, "src": "Audio/01.mp3"}
//! ```

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// The root of a synchronization tree for a single spine item.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmilModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    smil_version: Option<String>,
    id: String,
    href: String,
    spine_item_id: String,
    children: Vec<SeqNode>,
}

impl SmilModel {
    pub(crate) fn new(
        smil_version: Option<String>,
        spine_item_id: impl Into<String>,
        chapter: SeqNode,
    ) -> Self {
        Self {
            smil_version,
            id: String::new(),
            href: String::new(),
            spine_item_id: spine_item_id.into(),
            children: vec![chapter],
        }
    }

    /// The SMIL version tag (`3.0`).
    ///
    /// [`None`] for placeholder trees synthesized for spine items
    /// without a declared media overlay.
    pub fn smil_version(&self) -> Option<&str> {
        self.smil_version.as_deref()
    }

    /// Always empty; kept for the rendering layer's expected shape.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Always empty; kept for the rendering layer's expected shape.
    pub fn href(&self) -> &str {
        &self.href
    }

    /// The `idref` of the spine item this tree belongs to.
    pub fn spine_item_id(&self) -> &str {
        &self.spine_item_id
    }

    /// The chapter node.
    pub fn chapter(&self) -> &SeqNode {
        // `new` is the only constructor and always supplies one chapter
        &self.children[0]
    }

    /// Returns `true` if this tree was synthesized for a spine item
    /// without a declared media overlay.
    pub fn is_placeholder(&self) -> bool {
        self.smil_version.is_none()
    }
}

/// A sequence node (`seq`) grouping [`ParNode`] entries of one chapter.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "nodeType", rename = "seq")]
pub struct SeqNode {
    textref: String,
    id: String,
    epubtype: String,
    children: Vec<ParNode>,
}

impl SeqNode {
    pub(crate) fn new(textref: impl Into<String>, children: Vec<ParNode>) -> Self {
        Self {
            textref: textref.into(),
            id: String::new(),
            epubtype: String::new(),
            children,
        }
    }

    /// The referenced text file.
    ///
    /// Populated with the spine item href for placeholder trees, and left empty
    /// for fetched overlays, whose [`TextNode`] entries carry the full reference.
    pub fn textref(&self) -> &str {
        &self.textref
    }

    /// Always empty.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Always empty.
    pub fn epubtype(&self) -> &str {
        &self.epubtype
    }

    /// Synchronization pairs in playback order.
    pub fn pars(&self) -> &[ParNode] {
        &self.children
    }
}

/// A parallel node (`par`) pairing an audio clip with a text fragment.
#[derive(Clone, Debug, PartialEq)]
pub struct ParNode {
    id: String,
    audio: Option<AudioNode>,
    text: TextNode,
}

impl ParNode {
    pub(crate) fn new(audio: AudioNode, text: TextNode) -> Self {
        Self {
            id: String::new(),
            audio: Some(audio),
            text,
        }
    }

    pub(crate) fn text_only(text: TextNode) -> Self {
        Self {
            id: String::new(),
            audio: None,
            text,
        }
    }

    /// Always empty.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The narrated audio clip; [`None`] for placeholder trees.
    pub fn audio(&self) -> Option<&AudioNode> {
        self.audio.as_ref()
    }

    /// The highlighted text fragment.
    pub fn text(&self) -> &TextNode {
        &self.text
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum ParChild<'a> {
    Audio(&'a AudioNode),
    Text(&'a TextNode),
}

impl Serialize for ParNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Audio precedes text
        let children = self
            .audio
            .iter()
            .map(ParChild::Audio)
            .chain([ParChild::Text(&self.text)])
            .collect::<Vec<_>>();

        let mut state = serializer.serialize_struct("ParNode", 3)?;
        state.serialize_field("nodeType", "par")?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("children", &children)?;
        state.end()
    }
}

/// An audio clip (`audio`) bounded by offsets in seconds.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "nodeType", rename = "audio", rename_all = "camelCase")]
pub struct AudioNode {
    clip_begin: f64,
    clip_end: f64,
    src: String,
}

impl AudioNode {
    pub(crate) fn new(src: impl Into<String>, clip_begin: f64, clip_end: f64) -> Self {
        Self {
            clip_begin,
            clip_end,
            src: src.into(),
        }
    }

    /// Clip start, in seconds.
    pub fn clip_begin(&self) -> f64 {
        self.clip_begin
    }

    /// Clip end, in seconds.
    pub fn clip_end(&self) -> f64 {
        self.clip_end
    }

    /// The audio file, without the timing fragment.
    pub fn src(&self) -> &str {
        &self.src
    }
}

/// A text fragment (`text`) within a content document.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "nodeType", rename = "text", rename_all = "camelCase")]
pub struct TextNode {
    src: String,
    src_file: String,
    src_fragment_id: String,
}

impl TextNode {
    pub(crate) fn new(
        src: impl Into<String>,
        src_file: impl Into<String>,
        src_fragment_id: impl Into<String>,
    ) -> Self {
        Self {
            src: src.into(),
            src_file: src_file.into(),
            src_fragment_id: src_fragment_id.into(),
        }
    }

    /// The full reference (`Text/p001.xhtml#f000002`).
    pub fn src(&self) -> &str {
        &self.src
    }

    /// The referenced file (`Text/p001.xhtml`).
    pub fn src_file(&self) -> &str {
        &self.src_file
    }

    /// The fragment identifier (`f000002`); empty for placeholder trees.
    pub fn src_fragment_id(&self) -> &str {
        &self.src_fragment_id
    }
}
