//! Property paths for addressing within attribute trees
//!
//! Provides [`PropPath`] and [`Segment`]. A path string is split on `.`;
//! each part may carry trailing bracketed integers, each of which becomes
//! its own segment after the part's key.
//!
//! # Examples
//! - `a.b[2].c` → `[Key(a), Key(b), Index(2), Key(c)]`
//! - `marker.line[-1].width` → `[Key(marker), Key(line), All, Key(width)]`
//! - `[0].x` → `[Index(0), Key(x)]`

use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Literal suffix that marks a broadcast leaf
pub const BROADCAST_SUFFIX: &str = "[-1]";

/// Bracket value meaning "every element"
pub const BROADCAST_INDEX: i64 = -1;

// key (possibly empty) followed by one or more bracket groups
static INDEXED_PART: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^\[\]]*)((?:\[-?[0-9]+\])+)$").expect("static regex is valid")
});

static BRACKET_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(-?[0-9]+)\]").expect("static regex is valid"));

/// One atomic step of a path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Mapping member by name
    Key(String),

    /// Sequence element by position
    Index(usize),

    /// Every element of a sequence
    All,
}

impl Segment {
    /// Check if segment addresses sequence elements
    #[inline]
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Index(_) | Self::All)
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(i) => write!(f, "[{i}]"),
            Self::All => f.write_str(BROADCAST_SUFFIX),
        }
    }
}

/// Parsed property path
///
/// Keeps the literal text it was parsed from; [`Display`] prints it back.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropPath {
    raw: String,
    segments: SmallVec<[Segment; 4]>,
}

impl PropPath {
    /// Parse a path string
    ///
    /// # Errors
    /// Returns [`PathError`] if brackets are malformed, an index has no
    /// preceding key (except at the start), or the path ends on `[-1]`.
    pub fn parse(s: &str) -> Result<Self, PathError> {
        if s.is_empty() {
            return Err(PathError::Empty);
        }
        if s.ends_with(BROADCAST_SUFFIX) {
            return Err(PathError::BroadcastLeaf(s.to_string()));
        }

        let mut segments: SmallVec<[Segment; 4]> = SmallVec::new();
        for (position, part) in s.split('.').enumerate() {
            if !part.contains(['[', ']']) {
                if part.is_empty() {
                    return Err(PathError::EmptySegment { position });
                }
                segments.push(Segment::Key(part.to_string()));
                continue;
            }

            let caps = INDEXED_PART
                .captures(part)
                .ok_or_else(|| PathError::UnbalancedBrackets(part.to_string()))?;

            let key = &caps[1];
            if !key.is_empty() {
                segments.push(Segment::Key(key.to_string()));
            } else if position != 0 {
                return Err(PathError::IndexWithoutKey { position });
            }

            for group in BRACKET_GROUP.captures_iter(&caps[2]) {
                segments.push(parse_index(&group[1], part)?);
            }
        }

        // `[-01]` and friends also parse to a broadcast
        if segments.last() == Some(&Segment::All) {
            return Err(PathError::BroadcastLeaf(s.to_string()));
        }

        Ok(Self {
            raw: s.to_string(),
            segments,
        })
    }

    /// Build a path from segments
    ///
    /// # Errors
    /// Returns error if there are no segments or the last one is [`Segment::All`]
    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Result<Self, PathError> {
        let segments: SmallVec<[Segment; 4]> = segments.into_iter().collect();
        let raw = render(&segments);
        match segments.last() {
            None => Err(PathError::Empty),
            Some(Segment::All) => Err(PathError::BroadcastLeaf(raw)),
            Some(_) => Ok(Self { raw, segments }),
        }
    }

    /// Path segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Literal text of the path
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Number of segments (never zero)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check for zero segments (never true for a constructed path)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Check if any segment broadcasts
    #[inline]
    #[must_use]
    pub fn has_broadcast(&self) -> bool {
        self.segments.contains(&Segment::All)
    }

    /// Last segment
    #[inline]
    #[must_use]
    pub fn leaf(&self) -> &Segment {
        // construction guarantees at least one segment
        &self.segments[self.segments.len() - 1]
    }
}

fn parse_index(digits: &str, part: &str) -> Result<Segment, PathError> {
    let value: i64 = digits
        .parse()
        .map_err(|_| PathError::IndexOutOfRange(part.to_string()))?;
    if value == BROADCAST_INDEX {
        return Ok(Segment::All);
    }
    usize::try_from(value)
        .map(Segment::Index)
        .map_err(|_| PathError::IndexOutOfRange(part.to_string()))
}

fn render(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        if let Segment::Key(key) = segment {
            if !out.is_empty() {
                out.push('.');
            }
            out.push_str(key);
        } else {
            out.push_str(&segment.to_string());
        }
    }
    out
}

impl Display for PropPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for PropPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for PropPath {
    type Error = PathError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

/// Malformed path strings
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Empty path
    #[error("path is empty")]
    Empty,

    /// Empty dot-separated part
    #[error("path contains empty segment at position {position}")]
    EmptySegment { position: usize },

    /// Brackets that are unbalanced or hold something other than an integer
    #[error("unbalanced or non-numeric brackets in '{0}'")]
    UnbalancedBrackets(String),

    /// Bracket-only part after the first position
    #[error("index without preceding key at position {position}")]
    IndexWithoutKey { position: usize },

    /// Negative index other than -1, or index too large
    #[error("index out of range in '{0}'")]
    IndexOutOfRange(String),

    /// Path ends on the broadcast marker
    #[error("path '{0}' ends on a broadcast index; set the whole array instead")]
    BroadcastLeaf(String),
}
