// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use core::fmt;
use std::rc::Rc;

/// One step of a dotted path: a literal key or the `*` wildcard.
///
/// A `Key` token may look numeric; it addresses both mapping keys and
/// sequence indices interchangeably.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(Rc<str>),
    Wildcard,
}

impl Segment {
    fn from_token(token: &str) -> Segment {
        if token == "*" {
            Segment::Wildcard
        } else {
            Segment::Key(token.into())
        }
    }
}

/// A parsed path through nested containers.
///
/// Parsing never fails: any string is a valid path. A raw string is split on
/// `.`, so `Path::parse("")` yields a single empty `Key` segment, which lets
/// an explicit empty-string key be addressed. The zero-segment path —
/// [`Path::none`] — denotes "the whole container" for get/set and "no match"
/// for has.
///
/// There is no escaping mechanism; a literal key containing `.` must be
/// supplied pre-split via [`Path::from_segments`], where each element is one
/// atomic segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    // Raw text of a dotted-string path. Pre-split paths have none.
    source: Option<Rc<str>>,
    segments: Vec<Segment>,
}

impl Path {
    /// The "no path" sentinel: zero segments.
    pub fn none() -> Path {
        Path {
            source: None,
            segments: vec![],
        }
    }

    /// Split a dotted string into segments.
    pub fn parse(path: &str) -> Path {
        Path {
            source: Some(path.into()),
            segments: path.split('.').map(Segment::from_token).collect(),
        }
    }

    /// Build a path from already-split tokens; each token is matched as one
    /// atomic segment with no further splitting. A `"*"` token is still the
    /// wildcard.
    pub fn from_segments<I, S>(tokens: I) -> Path
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Path {
            source: None,
            segments: tokens
                .into_iter()
                .map(|t| Segment::from_token(t.as_ref()))
                .collect(),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Raw text of the path, when it was parsed from a dotted string.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn has_wildcard(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Wildcard))
    }
}

impl From<&str> for Path {
    fn from(path: &str) -> Path {
        Path::parse(path)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(source) = &self.source {
            return write!(f, "{source}");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            match segment {
                Segment::Key(k) => write!(f, "{k}")?,
                Segment::Wildcard => write!(f, "*")?,
            }
        }
        Ok(())
    }
}

/// Parse a key token as a sequence index.
///
/// Only the canonical decimal form of a non-negative integer matches: no
/// sign, no leading zeros. `"007"` is a mapping key, not index 7.
pub(crate) fn parse_index(token: &str) -> Option<usize> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if token.len() > 1 && token.starts_with('0') {
        return None;
    }
    token.parse().ok()
}
