// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// A normalized path inside the shared content container.
///
/// Paths are sequences of non-empty segments; the empty sequence is the
/// container root. Parsing drops separators and empty segments and applies
/// Unicode NFC to every segment, so that two spellings of the same name
/// (precomposed "é" vs. "e" plus combining accent) can never straddle an
/// access boundary.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PagePath {
    segments: Vec<String>,
}

impl PagePath {
    /// The container root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a `/`-separated path. Leading, trailing and doubled separators
    /// are ignored; `""` and `"/"` both parse to the root.
    pub fn parse(raw: &str) -> Self {
        let segments = raw
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| segment.nfc().collect())
            .collect();
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Append a segment (or a `/`-separated run of segments), normalized the
    /// same way as [`PagePath::parse`].
    pub fn join(&self, raw: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(Self::parse(raw).segments);
        Self { segments }
    }

    /// The path with the last segment removed; `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// All prefixes of this path in increasing specificity, starting at the
    /// root and ending with the path itself.
    pub fn prefixes(&self) -> impl Iterator<Item = PagePath> + '_ {
        (0..=self.segments.len()).map(|len| PagePath {
            segments: self.segments[..len].to_vec(),
        })
    }

    /// Segment-wise prefix check, true also when both paths are equal.
    ///
    /// This is not a string-prefix match: `hr` is a prefix of `hr/salary` but
    /// not of `hr2/page`. The root is a prefix of every path.
    pub fn is_prefix_of(&self, other: &PagePath) -> bool {
        other.segments.len() >= self.segments.len()
            && other.segments[..self.segments.len()] == self.segments[..]
    }

    /// Strip `base` from the front of this path, segment-wise.
    pub fn strip_prefix(&self, base: &PagePath) -> Option<PagePath> {
        if !base.is_prefix_of(self) {
            return None;
        }
        Some(Self {
            segments: self.segments[base.segments.len()..].to_vec(),
        })
    }
}

impl fmt::Display for PagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

impl From<String> for PagePath {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<&str> for PagePath {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<PagePath> for String {
    fn from(path: PagePath) -> Self {
        path.to_string()
    }
}
