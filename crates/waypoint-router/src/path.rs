//! Path patterns for deep linking
//!
//! A pattern is a `/`-separated list of segments:
//! 1. `people`: literal, must match exactly
//! 2. `:name`: parameter, captures one path segment
//! 3. `:tab?`: optional parameter, captures a segment when one is left
//!
//! A route without an explicit path uses its route name as the pattern.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

use crate::error::RouterError;
use crate::Result;
use waypoint_state::Params;

/// Bytes escaped in a param segment. `/` and `%` keep values with slashes or
/// escapes intact through a round trip.
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

/// Result of encoding a state as a path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathAndParams {
    pub path: String,
    #[serde(default)]
    pub params: Params,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param { name: String, optional: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(source: &str) -> Result<Self> {
        let invalid = |reason: &str| RouterError::InvalidPathPattern {
            pattern: source.to_string(),
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        for part in split_path(source) {
            let Some(param) = part.strip_prefix(':') else {
                segments.push(Segment::Literal(part.to_string()));
                continue;
            };

            let (name, optional) = match param.strip_suffix('?') {
                Some(name) => (name, true),
                None => (param, false),
            };
            if name.is_empty() {
                return Err(invalid("parameter without a name"));
            }
            if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                return Err(invalid("parameter names may only contain letters, digits and `_`"));
            }
            if segments
                .iter()
                .any(|s| matches!(s, Segment::Param { name: n, .. } if n == name))
            {
                return Err(invalid("parameter appears twice"));
            }
            segments.push(Segment::Param {
                name: name.to_string(),
                optional,
            });
        }

        Ok(Self { segments })
    }

    /// Match the pattern against the start of `parts`.
    ///
    /// Captured segments are percent-decoded. A param with no segment of its
    /// own is skipped when it is optional or already present in `supplied`,
    /// which is how empty values come back from the query params.
    ///
    /// Returns the captured params and the number of parts consumed.
    pub fn match_prefix(&self, parts: &[&str], supplied: &Params) -> Option<(Params, usize)> {
        let mut params = Params::new();
        let consumed = self.match_from(0, parts, supplied, &mut params)?;
        Some((params, consumed))
    }

    fn match_from(
        &self,
        segment: usize,
        parts: &[&str],
        supplied: &Params,
        params: &mut Params,
    ) -> Option<usize> {
        let Some(current) = self.segments.get(segment) else {
            return Some(0);
        };

        match current {
            Segment::Literal(literal) => match parts.split_first() {
                Some((part, rest)) if part == literal => self
                    .match_from(segment + 1, rest, supplied, params)
                    .map(|n| n + 1),
                _ => None,
            },
            Segment::Param { name, optional } => {
                if let Some((part, rest)) = parts.split_first() {
                    if let Some(n) = self.match_from(segment + 1, rest, supplied, params) {
                        params.insert(name.clone(), decode_segment(part));
                        return Some(n + 1);
                    }
                }
                if *optional || supplied.contains_key(name) {
                    return self.match_from(segment + 1, parts, supplied, params);
                }
                None
            }
        }
    }

    /// Fill the pattern from `params`, percent-encoding each value.
    ///
    /// Empty values get no segment; they travel in the params next to the
    /// path. Fails with the name of the first required param that is missing.
    pub fn to_path(&self, params: &Params) -> std::result::Result<String, String> {
        let mut parts = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => parts.push(literal.clone()),
                Segment::Param { name, optional } => match params.get(name) {
                    Some(value) if value.is_empty() => {}
                    Some(value) => parts.push(utf8_percent_encode(value, SEGMENT).to_string()),
                    None if *optional => {}
                    None => return Err(name.clone()),
                },
            }
        }
        Ok(parts.join("/"))
    }
}

fn decode_segment(part: &str) -> String {
    percent_decode_str(part).decode_utf8_lossy().into_owned()
}

/// Split a path into its non-empty segments
pub(crate) fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Join two path fragments, skipping empty ones
pub(crate) fn join_path(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{}/{}", head, tail),
    }
}
