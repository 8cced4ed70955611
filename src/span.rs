//! Character spans, including discontinuous ones.
//!
//! All offsets are byte positions into the document text, half-open
//! `[start, end)`. Coordinated and gapped expressions ("the left and right
//! ventricles") occupy a [`MultiSpan`] with more than one part; everything
//! else is a single-part span.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

// =============================================================================
// Span
// =============================================================================

/// A contiguous half-open character span `[start, end)`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Span {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span. `start > end` is normalized to an empty span at `start`.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        if end < start {
            Span { start, end: start }
        } else {
            Span { start, end }
        }
    }

    /// Span length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the span is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Check if this span overlaps another.
    #[must_use]
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Check if this span fully contains another.
    #[must_use]
    pub fn subsumes(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Check if this span strictly contains another (contains, not equal).
    #[must_use]
    pub fn strictly_subsumes(&self, other: &Span) -> bool {
        self.subsumes(other) && self != other
    }

    /// Check if an offset falls inside the span.
    #[must_use]
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Smallest span covering both.
    #[must_use]
    pub fn hull(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}-{})", self.start, self.end)
    }
}

impl From<Span> for MultiSpan {
    fn from(span: Span) -> Self {
        MultiSpan { parts: vec![span] }
    }
}

// =============================================================================
// MultiSpan
// =============================================================================

/// A possibly discontinuous span: a non-empty, ordered list of disjoint parts.
///
/// Ordering between multi-spans follows document order: first start, then
/// last end. A single-part multi-span behaves like its one [`Span`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MultiSpan {
    parts: Vec<Span>,
}

impl MultiSpan {
    /// Create a single-part multi-span.
    #[must_use]
    pub fn single(start: usize, end: usize) -> Self {
        MultiSpan {
            parts: vec![Span::new(start, end)],
        }
    }

    /// Create a multi-span from parts. Parts are sorted and overlapping or
    /// adjacent parts merged. An empty part list is a document error.
    pub fn from_parts(mut parts: Vec<Span>) -> Result<Self> {
        if parts.is_empty() {
            return Err(Error::document("multi-span requires at least one part"));
        }
        parts.sort();
        let mut merged: Vec<Span> = Vec::with_capacity(parts.len());
        for part in parts {
            match merged.last_mut() {
                Some(last) if part.start <= last.end => last.end = last.end.max(part.end),
                _ => merged.push(part),
            }
        }
        Ok(MultiSpan { parts: merged })
    }

    /// The ordered parts.
    #[must_use]
    pub fn parts(&self) -> &[Span] {
        &self.parts
    }

    /// Start of the first part.
    #[must_use]
    pub fn start(&self) -> usize {
        self.parts[0].start
    }

    /// End of the last part.
    #[must_use]
    pub fn end(&self) -> usize {
        self.parts[self.parts.len() - 1].end
    }

    /// Convex hull: the single span from first start to last end.
    #[must_use]
    pub fn interval(&self) -> Span {
        Span::new(self.start(), self.end())
    }

    /// Is the span discontinuous (more than one part)?
    #[must_use]
    pub fn is_discontinuous(&self) -> bool {
        self.parts.len() > 1
    }

    /// Total covered length (gaps excluded).
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.iter().map(Span::len).sum()
    }

    /// Check if all parts are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if any part overlaps any part of another multi-span.
    #[must_use]
    pub fn overlaps(&self, other: &MultiSpan) -> bool {
        self.parts
            .iter()
            .any(|a| other.parts.iter().any(|b| a.overlaps(b)))
    }

    /// Check if this multi-span's hull contains the other's hull.
    #[must_use]
    pub fn subsumes(&self, other: &MultiSpan) -> bool {
        self.interval().subsumes(&other.interval())
    }

    /// Strict subsumption: contains but is not identical.
    #[must_use]
    pub fn strictly_subsumes(&self, other: &MultiSpan) -> bool {
        self.subsumes(other) && self != other
    }

    /// Check if one of the parts equals the given span.
    #[must_use]
    pub fn has_part(&self, span: &Span) -> bool {
        self.parts.contains(span)
    }
}

impl PartialOrd for MultiSpan {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MultiSpan {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.start(), self.end()).cmp(&(other.start(), other.end()))
    }
}

impl std::fmt::Display for MultiSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for part in &self.parts {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{part}")?;
            first = false;
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
