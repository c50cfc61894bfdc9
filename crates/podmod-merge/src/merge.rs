//! Idempotent merging of generated blocks into manifest text.
//!
//! [`merge_contents`] inserts a tagged block below an anchor line. If the
//! exact block (same tag, same content hash) is already present the source
//! is returned untouched; if a block with the same tag but different content
//! is present it is removed first, so the file never carries two copies.

use tracing::debug;

use crate::anchor::Anchor;
use crate::error::{MergeError, MergeResult};
use crate::manifest::Manifest;
use crate::section::{self, find_section};

/// A block of generated lines and where it belongs.
#[derive(Clone, Debug)]
pub struct GeneratedBlock {
    /// Text to insert; may span several lines.
    pub new_src: String,
    /// Stable identifier written into both marker comments.
    pub tag: String,
    /// Line the block is positioned relative to.
    pub anchor: Anchor,
    /// How many lines below the anchor line the header goes.
    pub offset: usize,
    /// Comment prefix for the marker lines (e.g. `"  #"` for Ruby).
    pub comment: String,
}

impl GeneratedBlock {
    /// The header comment this block is written with.
    pub fn header(&self) -> String {
        section::header_comment(&self.new_src, &self.tag, &self.comment)
    }

    /// The footer comment this block is written with.
    pub fn footer(&self) -> String {
        section::footer_comment(&self.tag, &self.comment)
    }

    /// Every line of the block, markers included, in file order.
    pub fn rendered_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.new_src.lines().count() + 2);
        lines.push(self.header());
        lines.extend(self.new_src.split('\n').map(str::to_owned));
        lines.push(self.footer());
        lines
    }
}

/// The result of a merge or removal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeOutcome {
    /// The resulting text.
    pub contents: String,
    /// `true` if a block was inserted.
    pub did_merge: bool,
    /// `true` if an existing block with the tag was removed.
    pub did_clear: bool,
}

impl MergeOutcome {
    fn unchanged(src: &str) -> Self {
        Self {
            contents: src.to_string(),
            did_merge: false,
            did_clear: false,
        }
    }

    /// Returns `true` if `contents` differs from the input.
    pub fn is_changed(&self) -> bool {
        self.did_merge || self.did_clear
    }
}

/// Insert `block` into `src`, replacing any stale block with the same tag.
///
/// Fails with [`MergeError::NoMatch`] if no line matches the anchor and with
/// [`MergeError::UnbalancedSection`] if the tag's markers are malformed.
pub fn merge_contents(src: &str, block: &GeneratedBlock) -> MergeResult<MergeOutcome> {
    section::validate_tag(&block.tag)?;

    let header = block.header();
    if src.contains(&header) {
        debug!(tag = %block.tag, "generated block already up to date");
        return Ok(MergeOutcome::unchanged(src));
    }

    let mut manifest = Manifest::parse(src);
    let did_clear = clear_section(&mut manifest, &block.tag)?;

    let anchor_index = manifest
        .find_anchor(&block.anchor)
        .ok_or_else(|| MergeError::NoMatch {
            anchor: block.anchor.to_string(),
        })?;

    let at = manifest.insert_lines(anchor_index + block.offset, block.rendered_lines());
    debug!(tag = %block.tag, anchor_index, at, did_clear, "inserted generated block");

    Ok(MergeOutcome {
        contents: manifest.to_string(),
        did_merge: true,
        did_clear,
    })
}

/// Remove the block owned by `tag` from `src`, if there is one.
pub fn remove_contents(src: &str, tag: &str) -> MergeResult<MergeOutcome> {
    section::validate_tag(tag)?;

    let mut manifest = Manifest::parse(src);
    if !clear_section(&mut manifest, tag)? {
        return Ok(MergeOutcome::unchanged(src));
    }
    Ok(MergeOutcome {
        contents: manifest.to_string(),
        did_merge: false,
        did_clear: true,
    })
}

fn clear_section(manifest: &mut Manifest, tag: &str) -> MergeResult<bool> {
    match find_section(manifest, tag)? {
        Some(span) => {
            let removed = manifest.remove_lines(span.begin, span.end);
            debug!(tag, begin = span.begin, lines = removed.len(), "removed generated block");
            Ok(true)
        }
        None => Ok(false),
    }
}
