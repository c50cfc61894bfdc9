//! Merge engine for podmod.
//!
//! Inserts generated blocks into line-oriented manifests (Podfiles) below an
//! anchor line, wrapped in tagged marker comments so that repeated runs are
//! idempotent, and computes diffs between manifest versions.
//!
//! # Key Types
//!
//! - [`Manifest`] -- Lossless line model of the target file
//! - [`Anchor`] -- Line matcher used as the insertion reference point
//! - [`GeneratedBlock`] / [`MergeOutcome`] -- Merge input and result
//! - [`ManifestDiff`] / [`DiffHunk`] / [`DiffLine`] -- Line-level diff
//!
//! # Quick Start
//!
//! ```rust
//! use podmod_merge::{merge_contents, Anchor, GeneratedBlock};
//!
//! let block = GeneratedBlock {
//!     new_src: "  pod 'VLCKit', '4.0.0a10'".into(),
//!     tag: "withVlcMediaPlayer".into(),
//!     anchor: Anchor::literal("use_expo_modules!"),
//!     offset: 3,
//!     comment: "  #".into(),
//! };
//! let src = "use_expo_modules!\ntarget 'App' do\nend";
//! let merged = merge_contents(src, &block).unwrap();
//! assert!(merged.did_merge);
//!
//! let again = merge_contents(&merged.contents, &block).unwrap();
//! assert_eq!(again.contents, merged.contents);
//! ```

pub mod anchor;
pub mod diff;
pub mod error;
pub mod manifest;
pub mod merge;
pub mod section;

pub use anchor::Anchor;
pub use diff::{DiffHunk, DiffLine, ManifestDiff};
pub use error::{MergeError, MergeResult};
pub use manifest::Manifest;
pub use merge::{merge_contents, remove_contents, GeneratedBlock, MergeOutcome};
pub use section::{content_hash, find_section, SectionSpan};
