use std::fmt;

/// An inclusive range `[start, end]` within a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: i64,
    pub end: i64, // inclusive
}

impl Range {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Number of units covered by the range.
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start).saturating_add(1).max(0) as u64
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// The ranges requested by a header, tagged with their unit.
///
/// The order of `ranges` is the order in which the client asked for them
/// (or, after combining, the order of the first request of each merged group).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RangeSet {
    /// Unit token preceding `=` in the header, e.g. `bytes`
    pub unit: String,
    pub ranges: Vec<Range>,
}

impl RangeSet {
    pub fn new(unit: impl Into<String>, ranges: Vec<Range>) -> Self {
        Self {
            unit: unit.into(),
            ranges,
        }
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Range> {
        self.ranges.iter()
    }

    /// Sum of the lengths of all ranges.
    ///
    /// Overlapping ranges are counted once per occurrence, so this is the
    /// number of units a server would send for an uncombined set.
    pub fn total_len(&self) -> u64 {
        self.ranges
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.len()))
    }
}

impl std::ops::Index<usize> for RangeSet {
    type Output = Range;

    fn index(&self, index: usize) -> &Range {
        &self.ranges[index]
    }
}

impl IntoIterator for RangeSet {
    type Item = Range;
    type IntoIter = std::vec::IntoIter<Range>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.into_iter()
    }
}

impl<'a> IntoIterator for &'a RangeSet {
    type Item = &'a Range;
    type IntoIter = std::slice::Iter<'a, Range>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

/// Renders the set as a canonical header value, e.g. `bytes=0-499,600-999`.
impl fmt::Display for RangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=", self.unit)?;
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{range}")?;
        }
        Ok(())
    }
}

/// Options controlling [`parse_range`](super::parse_range).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Merge overlapping and adjacent ranges before returning
    pub combine: bool,
}

impl ParseOptions {
    pub fn combined() -> Self {
        Self { combine: true }
    }
}

/// Result of parsing a Range header.
///
/// `Malformed` and `Unsatisfiable` are expected outcomes of untrusted input,
/// not errors: the first means the value is not a Range header at all, the
/// second that it is one but none of its specs apply to the resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// At least one range survived; never empty
    Satisfiable(RangeSet),
    /// The header has no `unit=` separator
    Malformed,
    /// Every spec was invalid or outside the resource
    Unsatisfiable,
}

impl ParseOutcome {
    /// Numeric status conventionally used by Range parsers:
    /// `-2` malformed, `-1` unsatisfiable, `0` success.
    pub fn code(&self) -> i32 {
        match self {
            ParseOutcome::Satisfiable(_) => 0,
            ParseOutcome::Unsatisfiable => -1,
            ParseOutcome::Malformed => -2,
        }
    }

    pub fn ranges(&self) -> Option<&RangeSet> {
        match self {
            ParseOutcome::Satisfiable(set) => Some(set),
            _ => None,
        }
    }

    pub fn into_ranges(self) -> Option<RangeSet> {
        match self {
            ParseOutcome::Satisfiable(set) => Some(set),
            _ => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, ParseOutcome::Malformed)
    }

    pub fn is_unsatisfiable(&self) -> bool {
        matches!(self, ParseOutcome::Unsatisfiable)
    }
}
