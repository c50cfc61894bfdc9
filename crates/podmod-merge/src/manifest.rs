//! Line model for dependency manifests.
//!
//! A [`Manifest`] is the target file as an ordered list of lines. Splitting
//! happens on `\n` only, so carriage returns stay attached to their line and
//! a trailing newline shows up as a final empty line. Rendering joins the
//! lines with `\n` again, which makes parse/render lossless.

use std::fmt;

use regex::Regex;

use crate::anchor::Anchor;

/// A line-oriented text manifest (e.g. a Podfile).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Manifest {
    lines: Vec<String>,
}

impl Manifest {
    /// Split `src` into lines.
    pub fn parse(src: &str) -> Self {
        Self {
            lines: src.split('\n').map(str::to_owned).collect(),
        }
    }

    /// The lines of the manifest, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines (a trailing newline counts as one empty line).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the manifest has no lines at all.
    ///
    /// Parsing never produces this: even `""` yields one empty line.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Index of the first line matching `anchor`.
    pub fn find_anchor(&self, anchor: &Anchor) -> Option<usize> {
        self.lines.iter().position(|line| anchor.is_match(line))
    }

    /// Index of the first line containing `needle`.
    pub fn find_containing(&self, needle: &str) -> Option<usize> {
        self.lines.iter().position(|line| line.contains(needle))
    }

    /// Insert `new_lines` so the first of them lands at `index`.
    ///
    /// An index past the end appends. Returns the index the block actually
    /// starts at.
    pub fn insert_lines<I, S>(&mut self, index: usize, new_lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let start = index.min(self.lines.len());
        let tail = self.lines.split_off(start);
        self.lines.extend(new_lines.into_iter().map(Into::into));
        self.lines.extend(tail);
        start
    }

    /// Remove the inclusive line range `start..=end`.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds or `start > end`.
    pub fn remove_lines(&mut self, start: usize, end: usize) -> Vec<String> {
        self.lines.drain(start..=end).collect()
    }

    /// Returns the indexes of lines declaring the pod `name`, e.g.
    /// `pod 'VLCKit', '4.0.0a10'` or `pod "VLCKit"`.
    pub fn pod_declarations(&self, name: &str) -> Vec<usize> {
        let pattern = format!(r#"^\s*pod\s+['"]{}['"]"#, regex::escape(name));
        // The pattern is built from an escaped literal, so it always compiles.
        let Ok(re) = Regex::new(&pattern) else {
            return Vec::new();
        };
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| re.is_match(line))
            .map(|(i, _)| i)
            .collect()
    }
}

impl fmt::Display for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

impl From<&str> for Manifest {
    fn from(src: &str) -> Self {
        Self::parse(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_render_is_lossless() {
        for src in ["", "a", "a\n", "a\r\nb\r\n", "\n\n", "x\n\ny"] {
            assert_eq!(Manifest::parse(src).to_string(), src);
        }
    }

    #[test]
    fn trailing_newline_is_an_empty_line() {
        let m = Manifest::parse("a\nb\n");
        assert_eq!(m.lines(), ["a", "b", ""]);
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn insert_in_middle() {
        let mut m = Manifest::parse("a\nd");
        let at = m.insert_lines(1, ["b", "c"]);
        assert_eq!(at, 1);
        assert_eq!(m.to_string(), "a\nb\nc\nd");
    }

    #[test]
    fn insert_past_end_appends() {
        let mut m = Manifest::parse("a\nb");
        let at = m.insert_lines(10, ["z"]);
        assert_eq!(at, 2);
        assert_eq!(m.to_string(), "a\nb\nz");
    }

    #[test]
    fn remove_inclusive_range() {
        let mut m = Manifest::parse("a\nb\nc\nd");
        let removed = m.remove_lines(1, 2);
        assert_eq!(removed, ["b", "c"]);
        assert_eq!(m.to_string(), "a\nd");
    }

    #[test]
    fn find_anchor_is_first_match() {
        let m = Manifest::parse("x\nuse_expo_modules!\nUSE_EXPO_MODULES!");
        let anchor = Anchor::literal("use_expo_modules!");
        assert_eq!(m.find_anchor(&anchor), Some(1));
    }

    #[test]
    fn pod_declarations_detects_quote_styles() {
        let m = Manifest::parse(
            "target 'App' do\n  pod 'VLCKit', '3.6.0'\n  pod \"VLCKit\"\n  pod 'VLCKitX'\n  # pod 'VLCKit'\nend",
        );
        assert_eq!(m.pod_declarations("VLCKit"), vec![1, 2]);
    }
}
