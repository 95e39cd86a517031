//! Path segmentation and parameter-slot classification.
//!
//! # Responsibilities
//! - Strip the query-string suffix before segmenting
//! - Split a path into ordered, non-empty segments
//! - Classify each segment as a literal or a parameter slot
//! - Substitute `{paramsN}` placeholders, numbered among parameter slots only
//!
//! # Design Decisions
//! - All-ASCII-digit segments are parameter slots (the well-defined rule)
//! - A configurable marker prefix covers non-numeric identifiers
//! - Anything else is a literal; classification never fails
//! - No regex (prefix and digit checks only)

use std::fmt;

/// Classification rules for parameter slots.
///
/// A segment is a parameter slot when it consists entirely of ASCII digits,
/// or when it starts with the configured marker (e.g. `params:`). An empty
/// marker disables the second rule.
#[derive(Debug, Clone)]
pub struct SegmentRules {
    param_marker: String,
}

impl SegmentRules {
    pub fn new(param_marker: impl Into<String>) -> Self {
        Self {
            param_marker: param_marker.into(),
        }
    }

    /// Returns true if the segment qualifies as a parameter slot.
    pub fn is_param(&self, segment: &str) -> bool {
        if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
            return true;
        }
        !self.param_marker.is_empty() && segment.starts_with(self.param_marker.as_str())
    }
}

impl Default for SegmentRules {
    fn default() -> Self {
        Self::new("params:")
    }
}

/// One segment of a placeholder-substituted route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSegment {
    /// A fixed route word, kept verbatim.
    Literal(String),
    /// A positional placeholder; the index is 1-based among parameter
    /// slots only, not among all segments.
    Param(u32),
}

impl fmt::Display for TemplateSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSegment::Literal(word) => f.write_str(word),
            TemplateSegment::Param(n) => write!(f, "{{params{n}}}"),
        }
    }
}

/// A parsed request path: the template segments plus the raw values captured
/// for each parameter slot, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteShape {
    segments: Vec<TemplateSegment>,
    params: Vec<String>,
}

impl RouteShape {
    /// Parse a path (with optional query suffix) into a route shape.
    ///
    /// Returns `None` when the path contains zero non-empty segments, which
    /// callers treat as "no dispatch".
    pub fn parse(path_and_query: &str, rules: &SegmentRules) -> Option<Self> {
        let path = match path_and_query.split_once('?') {
            Some((path, _query)) => path,
            None => path_and_query,
        };

        let mut segments = Vec::new();
        let mut params = Vec::new();
        for raw in path.split('/').filter(|s| !s.is_empty()) {
            if rules.is_param(raw) {
                params.push(raw.to_string());
                segments.push(TemplateSegment::Param(params.len() as u32));
            } else {
                segments.push(TemplateSegment::Literal(raw.to_string()));
            }
        }

        if segments.is_empty() {
            return None;
        }
        Some(Self { segments, params })
    }

    /// True when the final segment is a parameter placeholder, i.e. the
    /// request names a single resource rather than a collection.
    pub fn is_search_like(&self) -> bool {
        matches!(self.segments.last(), Some(TemplateSegment::Param(_)))
    }

    /// The placeholder-substituted template, e.g. `/user/group/{params1}`.
    pub fn template(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            out.push_str(&segment.to_string());
        }
        out
    }

    /// Literal segments in order, placeholders excluded.
    pub fn literals(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            TemplateSegment::Literal(word) => Some(word.as_str()),
            TemplateSegment::Param(_) => None,
        })
    }

    /// Raw captured values for the parameter slots, in placeholder order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn segments(&self) -> &[TemplateSegment] {
        &self.segments
    }
}
