//! Path patterns.
//!
//! # Responsibilities
//! - Parse `/reservations/:reservationRefNo` style templates
//! - Match a normalized request path segment by segment
//! - Build a concrete path back from parameter values
//! - Compare patterns for shadowing and specificity
//!
//! # Design Decisions
//! - Segment-wise comparison only, no regex
//! - Literal segments are case-sensitive
//! - A parameter matches exactly one non-empty segment

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::collections::BTreeMap;
use std::fmt;

use crate::routing::error::RouteError;

/// Characters escaped when a parameter value is written into a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Captured parameter values keyed by parameter name.
pub type Params = BTreeMap<String, String>;

/// One `/`-separated piece of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

impl Segment {
    fn rank(&self) -> u8 {
        match self {
            Segment::Literal(_) => 0,
            Segment::Param(_) => 1,
        }
    }
}

/// A parsed route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern. A single trailing slash is dropped.
    pub fn parse(raw: &str) -> Result<Self, RouteError> {
        let invalid = |reason: &str| RouteError::InvalidPattern {
            pattern: raw.to_string(),
            reason: reason.to_string(),
        };

        let rest = raw
            .strip_prefix('/')
            .ok_or_else(|| invalid("must start with `/`"))?;
        let rest = rest.strip_suffix('/').unwrap_or(rest);

        let mut segments = Vec::new();
        if !rest.is_empty() {
            for piece in rest.split('/') {
                if piece.is_empty() {
                    return Err(invalid("empty segment"));
                }
                match piece.strip_prefix(':') {
                    Some(name) => {
                        if !is_param_name(name) {
                            return Err(invalid(&format!("`{}` is not a valid parameter name", name)));
                        }
                        if segments.iter().any(|s| matches!(s, Segment::Param(p) if p == name)) {
                            return Err(invalid(&format!("parameter `{}` appears twice", name)));
                        }
                        segments.push(Segment::Param(name.to_string()));
                    }
                    None => segments.push(Segment::Literal(piece.to_string())),
                }
            }
        }

        let raw = format!("/{}", rest);
        Ok(Self { raw, segments })
    }

    /// Normalized pattern text.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Parameter names in the order they appear.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match already-split request segments, returning decoded captures.
    pub fn match_segments(&self, path: &[&str]) -> Option<Params> {
        if path.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, actual) in self.segments.iter().zip(path) {
            match segment {
                Segment::Literal(expected) => {
                    if expected != actual {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if actual.is_empty() {
                        return None;
                    }
                    let value = percent_decode_str(actual).decode_utf8_lossy();
                    params.insert(name.clone(), value.into_owned());
                }
            }
        }
        Some(params)
    }

    /// Match a raw request path (normalized first).
    pub fn matches(&self, path: &str) -> Option<Params> {
        let segments = split_path(path)?;
        self.match_segments(&segments)
    }

    /// True when every path `other` accepts is also accepted by `self`.
    pub fn covers(&self, other: &PathPattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Param(_), _) => true,
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Literal(_), Segment::Param(_)) => false,
                })
    }

    /// Sort key: at the first differing position a literal ranks before a parameter.
    pub fn specificity(&self) -> Vec<u8> {
        self.segments.iter().map(Segment::rank).collect()
    }

    /// Fill parameters in. Returns the name of the first missing parameter on failure.
    pub fn build(&self, params: &Params) -> Result<String, String> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Param(name) => match params.get(name) {
                    Some(value) if !value.is_empty() => {
                        out.extend(utf8_percent_encode(value, SEGMENT));
                    }
                    _ => return Err(name.clone()),
                },
            }
        }
        Ok(out)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Split a request path into segments.
///
/// The empty path is `/`. One trailing slash is ignored, so `/a/` and `/a`
/// are the same path. Paths not starting with `/` yield `None`.
pub fn split_path(path: &str) -> Option<Vec<&str>> {
    let path = if path.is_empty() { "/" } else { path };
    let rest = path.strip_prefix('/')?;
    if rest.is_empty() {
        return Some(Vec::new());
    }
    let trimmed = rest.strip_suffix('/').unwrap_or(rest);
    Some(trimmed.split('/').collect())
}

fn is_param_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
