//! Parsing of flat, dot-delimited keys into typed path segments.

use crate::error::{JpathError, Result};
use std::fmt::{Display, Formatter};
use std::ops::Deref;

/// Separator between the components of a flat key.
pub const DELIMITER: char = '.';

/// One component of a flat key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Addresses a member of an object.
    Field(String),
    /// Addresses a position in an array.
    Index(usize),
}

impl Display for Segment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Field(name) => write!(f, "{}", name),
            Segment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// A trailing path component which selects how the raw value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    /// `[]`: split a string on `,` into an array of strings.
    SplitCsv,
    /// `num()`: parse a string as a number.
    CoerceNumber,
    /// `bool()`: a string is `true` only when it is exactly `"true"`.
    CoerceBool,
}

impl Directive {
    /// Recognizes a directive token. Matching is exact.
    pub fn from_suffix(component: &str) -> Option<Self> {
        match component {
            "[]" => Some(Directive::SplitCsv),
            "num()" => Some(Directive::CoerceNumber),
            "bool()" => Some(Directive::CoerceBool),
            _ => None,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Directive::SplitCsv => "[]",
            Directive::CoerceNumber => "num()",
            Directive::CoerceBool => "bool()",
        }
    }
}

impl Display for Directive {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

/// A parsed flat key: the segments leading to a location and the optional
/// directive for the value stored there.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    segments: Vec<Segment>,
    directive: Option<Directive>,
}

impl Deref for Path {
    type Target = [Segment];

    fn deref(&self) -> &Self::Target {
        &self.segments
    }
}

impl Path {
    /// Splits `key` on `.` and classifies every component.
    ///
    /// # Errors
    /// Returns [`JpathError::MalformedPath`] when a component is empty, has
    /// surrounding whitespace, is a directive in a non-final position, is an
    /// index too large for `usize`, or when the key has no segments besides
    /// a directive.
    pub fn parse(key: &str) -> Result<Self> {
        let mut components = key.split(DELIMITER).collect::<Vec<_>>();

        let directive = components.last().and_then(|c| Directive::from_suffix(c));
        if directive.is_some() {
            components.pop();
        }

        if components.is_empty() {
            return Err(malformed(key, "directive without a preceding segment"));
        }

        let segments = components
            .iter()
            .enumerate()
            .map(|(position, component)| classify(key, position, component))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            segments,
            directive,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn directive(&self) -> Option<Directive> {
        self.directive
    }

    /// Returns the count of segments (depth) in a path
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Creates a new `Path` containing the first `len` segments, without a
    /// directive.
    pub fn prefix(&self, len: usize) -> Path {
        Path {
            segments: self.segments.iter().take(len).cloned().collect(),
            directive: None,
        }
    }

    /// Checks if path represents the root (is empty)
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_root() {
            return write!(f, "<root>");
        }

        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", DELIMITER)?;
            }
            write!(f, "{}", segment)?;
        }
        if let Some(directive) = self.directive {
            write!(f, "{}{}", DELIMITER, directive)?;
        }
        Ok(())
    }
}

fn classify(key: &str, position: usize, component: &str) -> Result<Segment> {
    if component.is_empty() {
        return Err(malformed(
            key,
            format!("empty segment at position {}", position),
        ));
    }

    if let Some(directive) = Directive::from_suffix(component) {
        return Err(malformed(
            key,
            format!(
                "directive {} at position {} must be the last segment",
                directive, position
            ),
        ));
    }

    if component.bytes().all(|b| b.is_ascii_digit()) {
        return component.parse::<usize>().map(Segment::Index).map_err(|_| {
            malformed(
                key,
                format!("index {} at position {} is too large", component, position),
            )
        });
    }

    if component.trim() != component {
        return Err(malformed(
            key,
            format!(
                "segment {:?} at position {} has surrounding whitespace",
                component, position
            ),
        ));
    }

    Ok(Segment::Field(component.to_string()))
}

fn malformed(key: &str, reason: impl Into<String>) -> JpathError {
    JpathError::MalformedPath {
        path: key.to_string(),
        reason: reason.into(),
    }
}
