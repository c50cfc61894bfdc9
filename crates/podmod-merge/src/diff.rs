//! Line-level diff between two versions of a manifest.
//!
//! Uses the `similar` crate (Myers diff algorithm) to produce structured
//! hunks with context lines, and renders them as a unified diff for
//! dry-run previews.

use std::fmt::Write as _;

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

/// Lines of context kept around each change.
const CONTEXT_LINES: usize = 3;

/// The result of diffing two manifest texts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ManifestDiff {
    /// The diff hunks.
    pub hunks: Vec<DiffHunk>,
    /// Total number of lines in the old content.
    pub old_lines: usize,
    /// Total number of lines in the new content.
    pub new_lines: usize,
}

/// A contiguous region of changes in a diff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiffHunk {
    /// Line number in the old content where this hunk starts (1-based).
    pub old_start: usize,
    /// Number of lines from the old content in this hunk.
    pub old_count: usize,
    /// Line number in the new content where this hunk starts (1-based).
    pub new_start: usize,
    /// Number of lines from the new content in this hunk.
    pub new_count: usize,
    /// The individual diff lines in this hunk.
    pub lines: Vec<DiffLine>,
}

/// A single line in a diff hunk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum DiffLine {
    /// A line present in both old and new (context).
    Context(String),
    /// A line added in the new content.
    Added(String),
    /// A line removed from the old content.
    Removed(String),
}

impl ManifestDiff {
    /// Compute a line-by-line diff from `old` to `new`.
    pub fn compute(old: &str, new: &str) -> Self {
        let old_lines = old.lines().count();
        let new_lines = new.lines().count();

        if old == new {
            return Self {
                hunks: Vec::new(),
                old_lines,
                new_lines,
            };
        }

        let text_diff = TextDiff::from_lines(old, new);
        let mut hunks = Vec::new();

        for group in text_diff.grouped_ops(CONTEXT_LINES) {
            let (Some(first), Some(last)) = (group.first(), group.last()) else {
                continue;
            };
            let old_range = first.old_range().start..last.old_range().end;
            let new_range = first.new_range().start..last.new_range().end;

            let mut lines = Vec::new();
            for op in &group {
                for change in text_diff.iter_changes(op) {
                    let text = change.value().trim_end_matches('\n').to_string();
                    lines.push(match change.tag() {
                        ChangeTag::Equal => DiffLine::Context(text),
                        ChangeTag::Delete => DiffLine::Removed(text),
                        ChangeTag::Insert => DiffLine::Added(text),
                    });
                }
            }

            hunks.push(DiffHunk {
                old_start: old_range.start + 1,
                old_count: old_range.len(),
                new_start: new_range.start + 1,
                new_count: new_range.len(),
                lines,
            });
        }

        Self {
            hunks,
            old_lines,
            new_lines,
        }
    }

    /// Returns `true` if the two texts are identical.
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    /// Total number of lines added across all hunks.
    pub fn additions(&self) -> usize {
        self.count(|l| matches!(l, DiffLine::Added(_)))
    }

    /// Total number of lines removed across all hunks.
    pub fn deletions(&self) -> usize {
        self.count(|l| matches!(l, DiffLine::Removed(_)))
    }

    fn count(&self, pred: impl Fn(&DiffLine) -> bool) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| pred(l))
            .count()
    }

    /// Render as a unified diff with `a/` and `b/` path headers.
    pub fn unified(&self, path: &str) -> String {
        let mut out = String::new();
        if self.is_empty() {
            return out;
        }
        let _ = writeln!(out, "--- a/{path}");
        let _ = writeln!(out, "+++ b/{path}");
        for hunk in &self.hunks {
            let _ = writeln!(
                out,
                "@@ -{},{} +{},{} @@",
                hunk.old_start, hunk.old_count, hunk.new_start, hunk.new_count
            );
            for line in &hunk.lines {
                let _ = match line {
                    DiffLine::Context(t) => writeln!(out, " {t}"),
                    DiffLine::Added(t) => writeln!(out, "+{t}"),
                    DiffLine::Removed(t) => writeln!(out, "-{t}"),
                };
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_texts_no_diff() {
        let diff = ManifestDiff::compute("a\nb\n", "a\nb\n");
        assert!(diff.is_empty());
        assert_eq!(diff.additions(), 0);
        assert_eq!(diff.unified("Podfile"), "");
    }

    #[test]
    fn inserted_block_counts_as_additions() {
        let old = "use_expo_modules!\ntarget 'App' do\nend\n";
        let new = "use_expo_modules!\ntarget 'App' do\nend\n  # begin\n  pod 'X'\n  # end\n";
        let diff = ManifestDiff::compute(old, new);
        assert_eq!(diff.additions(), 3);
        assert_eq!(diff.deletions(), 0);
        assert_eq!(diff.old_lines, 3);
        assert_eq!(diff.new_lines, 6);
    }

    #[test]
    fn removal_counts_as_deletions() {
        let diff = ManifestDiff::compute("a\nb\nc\n", "a\nc\n");
        assert_eq!(diff.deletions(), 1);
        assert_eq!(diff.additions(), 0);
    }

    #[test]
    fn hunk_ranges_cover_change() {
        let old = "a\nb\nc\nd\ne\nf\ng\nh\ni\nj\n";
        let new = "a\nb\nc\nd\nX\nf\ng\nh\ni\nj\n";
        let diff = ManifestDiff::compute(old, new);
        assert_eq!(diff.hunks.len(), 1);
        let hunk = &diff.hunks[0];
        assert_eq!(hunk.old_start, 2);
        assert_eq!(hunk.old_count, 7);
        assert_eq!(hunk.new_count, 7);
        assert!(hunk.lines.iter().any(|l| matches!(l, DiffLine::Context(_))));
    }

    #[test]
    fn unified_rendering() {
        let text = ManifestDiff::compute("a\nb\n", "a\nx\nb\n").unified("ios/Podfile");
        assert!(text.starts_with("--- a/ios/Podfile\n+++ b/ios/Podfile\n@@ -1,2 +1,3 @@\n"));
        assert!(text.contains("\n+x\n"));
        assert!(text.contains("\n a\n"));
    }
}
