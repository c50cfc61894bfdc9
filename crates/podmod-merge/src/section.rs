//! Generated sections: tagged blocks delimited by marker comments.
//!
//! ```text
//!   # @generated begin withVlcMediaPlayer - expo prebuild (DO NOT MODIFY) sync-3f1c...
//!   pod 'VLCKit', '4.0.0a10'
//!   # @generated end withVlcMediaPlayer
//! ```
//!
//! The header embeds a SHA-1 of the generated content, the same digest
//! `expo prebuild` writes, so a later run (ours or Expo's) can tell an
//! up-to-date block (header present verbatim) from a stale one (same tag,
//! different hash).

use sha1::{Digest, Sha1};

use crate::error::{MergeError, MergeResult};
use crate::manifest::Manifest;

/// Label written into every header comment.
pub const GENERATOR: &str = "expo prebuild";

/// Prefix of the content hash embedded in headers.
pub const HASH_PREFIX: &str = "sync-";

/// Hash of the generated content, as embedded in the header comment.
pub fn content_hash(src: &str) -> String {
    format!("{HASH_PREFIX}{}", hex::encode(Sha1::digest(src.as_bytes())))
}

/// The header comment for a block of `new_src` owned by `tag`.
pub fn header_comment(new_src: &str, tag: &str, comment: &str) -> String {
    format!(
        "{comment} @generated begin {tag} - {GENERATOR} (DO NOT MODIFY) {}",
        content_hash(new_src)
    )
}

/// The footer comment closing a block owned by `tag`.
pub fn footer_comment(tag: &str, comment: &str) -> String {
    format!("{comment} @generated end {tag}")
}

/// Tags are written into single-line comments and matched by substring.
pub(crate) fn validate_tag(tag: &str) -> MergeResult<()> {
    if tag.is_empty() || tag.chars().any(char::is_whitespace) {
        return Err(MergeError::InvalidTag(tag.to_string()));
    }
    Ok(())
}

/// Location of a generated section within a manifest (inclusive bounds).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionSpan {
    /// Index of the header line.
    pub begin: usize,
    /// Index of the footer line.
    pub end: usize,
}

impl SectionSpan {
    /// Number of lines in the section, markers included.
    pub fn line_count(&self) -> usize {
        self.end - self.begin + 1
    }

    /// The content hash recorded in this section's header, if any.
    pub fn recorded_hash<'a>(&self, manifest: &'a Manifest) -> Option<&'a str> {
        manifest.lines()[self.begin]
            .split_whitespace()
            .last()
            .filter(|token| token.starts_with(HASH_PREFIX))
    }
}

/// Find the generated section owned by `tag`.
///
/// Returns `Ok(None)` when neither marker is present. A lone marker, or an
/// end marker before the begin marker, is reported as
/// [`MergeError::UnbalancedSection`].
pub fn find_section(manifest: &Manifest, tag: &str) -> MergeResult<Option<SectionSpan>> {
    let begin_marker = format!("@generated begin {tag} -");
    let end_marker = format!("@generated end {tag}");

    let begin = manifest.find_containing(&begin_marker);
    let end = manifest
        .lines()
        .iter()
        .position(|line| line.trim_end().ends_with(&end_marker));

    match (begin, end) {
        (None, None) => Ok(None),
        (Some(begin), Some(end)) if begin < end => Ok(Some(SectionSpan { begin, end })),
        (begin, end) => Err(MergeError::UnbalancedSection {
            tag: tag.to_string(),
            begin,
            end,
        }),
    }
}
