//! Parsers for the fragment syntax of media-overlay entries.

use crate::errors::{FragmentError, FragmentResult};

const FRAGMENT_SEPARATOR: char = '#';
const TIMING_KEY: &str = "t";

/// A decoded `audio` reference: `Audio/01.mp3#t=1.8,4.3`.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioClip<'a> {
    /// The audio file (`Audio/01.mp3`).
    pub src: &'a str,
    /// Clip start in seconds (`1.8`).
    pub begin: f64,
    /// Clip end in seconds (`4.3`).
    pub end: f64,
}

/// A decoded `text` reference: `Text/p001.xhtml#f000002`.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRef<'a> {
    /// The content document (`Text/p001.xhtml`).
    pub src_file: &'a str,
    /// The fragment identifier (`f000002`).
    pub fragment_id: &'a str,
}

/// Parses an `audio` reference of the form `src#t=begin,end`.
///
/// # Examples
/// ```
/// use webpub_smil::overlay::parse_audio_clip;
///
/// let clip = parse_audio_clip("OEBPS/Audio/01_cover.mp3#t=1.8,4.3").unwrap();
/// assert_eq!("OEBPS/Audio/01_cover.mp3", clip.src);
/// assert_eq!(1.8, clip.begin);
/// assert_eq!(4.3, clip.end);
///
/// assert!(parse_audio_clip("OEBPS/Audio/01_cover.mp3#t=1.8").is_err());
/// ```
pub fn parse_audio_clip(reference: &str) -> FragmentResult<AudioClip<'_>> {
    let (src, fragment) = split_fragment(reference)?;
    let (key, range) = fragment
        .split_once('=')
        .ok_or_else(|| FragmentError::MissingTimingKey(fragment.to_owned()))?;

    if key != TIMING_KEY {
        return Err(FragmentError::UnsupportedTimingKey(key.to_owned()));
    }

    let (begin, end) = range
        .split_once(',')
        .ok_or_else(|| FragmentError::MissingClipRange(range.to_owned()))?;

    Ok(AudioClip {
        src,
        begin: parse_seconds(begin)?,
        end: parse_seconds(end)?,
    })
}

/// Parses a `text` reference of the form `src#fragment`.
///
/// The fragment may be empty (`c1.xhtml#`), although the separator is required.
pub fn parse_text_ref(reference: &str) -> FragmentResult<TextRef<'_>> {
    split_fragment(reference).map(|(src_file, fragment_id)| TextRef {
        src_file,
        fragment_id,
    })
}

fn split_fragment(reference: &str) -> FragmentResult<(&str, &str)> {
    reference
        .split_once(FRAGMENT_SEPARATOR)
        .ok_or_else(|| FragmentError::MissingFragment(reference.to_owned()))
}

fn parse_seconds(value: &str) -> FragmentResult<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|seconds| seconds.is_finite())
        .ok_or_else(|| FragmentError::InvalidClipValue(value.to_owned()))
}
