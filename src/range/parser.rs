//! Range header parser.
//!
//! ## Parsing Strategy
//!
//! The header is split once on the first `=` into unit and spec list, then
//! each comma-separated spec is resolved independently against the resource
//! size:
//! 1. `-n` (no start) becomes the last `n` units
//! 2. `n-` (no end) runs to the last unit
//! 3. any end past the resource is clamped to the last unit
//! 4. specs that are still invalid or start before 0 are dropped
//!
//! Numbers are read with leading-integer-prefix semantics: surrounding text
//! after the digits is ignored, so `bytes=0-499abc` reads as `0-499`. This
//! leniency matches what clients have historically been allowed to send and
//! must not be tightened.

use tracing::{debug, trace};

use super::combiner::combine_ranges;
use super::error::RangeError;
use super::structures::{ParseOptions, ParseOutcome, Range, RangeSet};

/// Parse a `Range` header value relative to a resource of `size` units.
///
/// # Arguments
///
/// * `size` - Total length of the resource, in the header's unit
/// * `header` - Raw header value, e.g. `bytes=0-499`
/// * `options` - Set `combine` to merge overlapping and adjacent ranges
///
/// # Returns
///
/// [`ParseOutcome::Malformed`] if the header has no `=`,
/// [`ParseOutcome::Unsatisfiable`] if no spec applies to the resource,
/// otherwise the non-empty set of ranges in request order.
///
/// # Examples
///
/// ```
/// use range_parser::{parse_range, ParseOptions, ParseOutcome, Range};
///
/// let outcome = parse_range(1000, "bytes=-400", ParseOptions::default());
/// let set = outcome.into_ranges().unwrap();
/// assert_eq!(set.unit, "bytes");
/// assert_eq!(set.ranges, vec![Range::new(600, 999)]);
///
/// assert_eq!(parse_range(200, "malformed", ParseOptions::default()), ParseOutcome::Malformed);
/// ```
pub fn parse_range(size: i64, header: &str, options: ParseOptions) -> ParseOutcome {
    let Some((unit, specs)) = header.split_once('=') else {
        debug!(header, "range header has no unit separator");
        return ParseOutcome::Malformed;
    };

    let last = size.saturating_sub(1);
    let mut ranges = Vec::new();

    for spec in specs.split(',') {
        match resolve_spec(spec, size, last) {
            Some(range) => ranges.push(range),
            None => trace!(spec, size, "discarding unsatisfiable range spec"),
        }
    }

    if ranges.is_empty() {
        debug!(header, size, "no satisfiable range in header");
        return ParseOutcome::Unsatisfiable;
    }

    let set = RangeSet::new(unit, ranges);
    let set = if options.combine {
        combine_ranges(&set)
    } else {
        set
    };

    debug!(
        unit = %set.unit,
        count = set.len(),
        combine = options.combine,
        "parsed range header"
    );

    ParseOutcome::Satisfiable(set)
}

/// Parse a `Range` header value received as raw bytes.
///
/// Behaves like [`parse_range`] once the value is known to be text.
///
/// # Errors
///
/// Returns [`RangeError::InvalidHeader`] if `header` is not valid UTF-8. This
/// is a fault in the caller, distinct from a malformed header.
pub fn parse_range_bytes(
    size: i64,
    header: &[u8],
    options: ParseOptions,
) -> Result<ParseOutcome, RangeError> {
    let header = std::str::from_utf8(header).map_err(|_| RangeError::InvalidHeader)?;
    Ok(parse_range(size, header, options))
}

/// Resolve one `start-end` spec to a bounded range, or `None` to drop it.
fn resolve_spec(spec: &str, size: i64, last: i64) -> Option<Range> {
    // Pieces beyond the second are ignored, e.g. `1-2-3` reads as `1-2`
    let mut parts = spec.split('-');
    let start = parts.next().and_then(parse_leading_int);
    let end = parts.next().and_then(parse_leading_int);

    let (start, end) = match (start, end) {
        // -nnn: the last nnn units
        (None, end) => (end.map(|n| size.saturating_sub(n)), Some(last)),
        // nnn-: from nnn to the end
        (Some(start), None) => (Some(start), Some(last)),
        (start, end) => (start, end),
    };

    let start = start?;
    let end = end?.min(last);

    if start > end || start < 0 {
        return None;
    }

    Some(Range { start, end })
}

/// Read the integer at the front of `text`, ignoring whatever follows it.
///
/// Leading whitespace and a single `+`/`-` sign are accepted. Returns `None`
/// when no digit follows. Values outside `i64` saturate.
fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start_matches(is_leading_space);

    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits = digits.as_bytes();
    let len = digits.iter().take_while(|b| b.is_ascii_digit()).count();
    if len == 0 {
        return None;
    }

    let magnitude = digits[..len].iter().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });

    Some(if negative { -magnitude } else { magnitude })
}

fn is_leading_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(size: i64, header: &str) -> ParseOutcome {
        parse_range(size, header, ParseOptions::default())
    }

    fn ranges(size: i64, header: &str) -> RangeSet {
        match parse(size, header) {
            ParseOutcome::Satisfiable(set) => set,
            other => panic!("expected ranges for {header:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_reject_non_utf8_header() {
        let err = parse_range_bytes(200, &[0x62, 0xff, 0x3d], ParseOptions::default())
            .unwrap_err();
        assert_eq!(err, RangeError::InvalidHeader);
        assert_eq!(err.to_string(), "argument header must be a string");
    }

    #[test]
    fn test_bytes_entry_matches_str_entry() {
        let outcome = parse_range_bytes(1000, b"bytes=0-499", ParseOptions::default()).unwrap();
        assert_eq!(outcome, parse(1000, "bytes=0-499"));
    }

    #[test]
    fn test_malformed_without_separator() {
        assert_eq!(parse(200, "malformed"), ParseOutcome::Malformed);
        assert_eq!(parse(200, ""), ParseOutcome::Malformed);
        assert_eq!(parse(200, "bytes 0-499"), ParseOutcome::Malformed);
    }

    #[test]
    fn test_unsatisfiable_when_all_specs_invalid() {
        assert_eq!(parse(200, "bytes=500-20"), ParseOutcome::Unsatisfiable);
        assert_eq!(parse(200, "bytes=500-999"), ParseOutcome::Unsatisfiable);
        assert_eq!(
            parse(200, "bytes=500-999,1000-1499"),
            ParseOutcome::Unsatisfiable
        );
        assert_eq!(parse(200, "bytes="), ParseOutcome::Unsatisfiable);
        assert_eq!(parse(200, "bytes=-"), ParseOutcome::Unsatisfiable);
        assert_eq!(parse(200, "bytes=abc"), ParseOutcome::Unsatisfiable);
    }

    #[test]
    fn test_parse_simple_range() {
        let set = ranges(1000, "bytes=0-499");
        assert_eq!(set.unit, "bytes");
        assert_eq!(set.ranges, vec![Range::new(0, 499)]);

        let set = ranges(1000, "bytes=40-80");
        assert_eq!(set.ranges, vec![Range::new(40, 80)]);
    }

    #[test]
    fn test_cap_end_at_size() {
        let set = ranges(200, "bytes=0-499");
        assert_eq!(set.unit, "bytes");
        assert_eq!(set.ranges, vec![Range::new(0, 199)]);
    }

    #[test]
    fn test_suffix_range() {
        assert_eq!(ranges(1000, "bytes=-400").ranges, vec![Range::new(600, 999)]);
        assert_eq!(ranges(1000, "bytes=-1").ranges, vec![Range::new(999, 999)]);
        // Suffix longer than the resource starts before 0 and is dropped
        assert_eq!(parse(1000, "bytes=-2000"), ParseOutcome::Unsatisfiable);
        assert_eq!(parse(1000, "bytes=-0"), ParseOutcome::Unsatisfiable);
    }

    #[test]
    fn test_open_ended_range() {
        assert_eq!(ranges(1000, "bytes=400-").ranges, vec![Range::new(400, 999)]);
        assert_eq!(ranges(1000, "bytes=0-").ranges, vec![Range::new(0, 999)]);
        // A spec without any dash reads like an open-ended one
        assert_eq!(ranges(1000, "bytes=400").ranges, vec![Range::new(400, 999)]);
    }

    #[test]
    fn test_single_unit_range() {
        assert_eq!(ranges(1000, "bytes=0-0").ranges, vec![Range::new(0, 0)]);
    }

    #[test]
    fn test_multiple_ranges_keep_order() {
        let set = ranges(1000, "bytes=40-80,81-90,-1");
        assert_eq!(set.unit, "bytes");
        assert_eq!(
            set.ranges,
            vec![Range::new(40, 80), Range::new(81, 90), Range::new(999, 999)]
        );
    }

    #[test]
    fn test_some_invalid_ranges_dropped() {
        let set = ranges(200, "bytes=0-499,1000-,500-999");
        assert_eq!(set.ranges, vec![Range::new(0, 199)]);
    }

    #[test]
    fn test_non_byte_unit_passthrough() {
        let set = ranges(1000, "items=0-5");
        assert_eq!(set.unit, "items");
        assert_eq!(set.ranges, vec![Range::new(0, 5)]);

        let set = ranges(1000, " Bytes =0-5");
        assert_eq!(set.unit, " Bytes ");
    }

    #[test]
    fn test_only_first_separator_splits_unit() {
        let set = ranges(1000, "bytes=0-5=7");
        assert_eq!(set.unit, "bytes");
        assert_eq!(set.ranges, vec![Range::new(0, 5)]);
    }

    #[test]
    fn test_trailing_garbage_ignored() {
        assert_eq!(ranges(1000, "bytes=0-499abc").ranges, vec![Range::new(0, 499)]);
        assert_eq!(ranges(1000, "bytes= 10 - 20").ranges, vec![Range::new(10, 20)]);
        assert_eq!(ranges(1000, "bytes=1-2-3").ranges, vec![Range::new(1, 2)]);
        assert_eq!(ranges(1000, "bytes=+5-+9").ranges, vec![Range::new(5, 9)]);
        assert_eq!(ranges(1000, "bytes=0x10-20").ranges, vec![Range::new(0, 20)]);
    }

    #[test]
    fn test_zero_and_negative_size() {
        assert_eq!(parse(0, "bytes=0-0"), ParseOutcome::Unsatisfiable);
        assert_eq!(parse(0, "bytes=-1"), ParseOutcome::Unsatisfiable);
        assert_eq!(parse(0, "bytes=0-"), ParseOutcome::Unsatisfiable);
        assert_eq!(parse(-10, "bytes=0-5"), ParseOutcome::Unsatisfiable);
        assert_eq!(parse(-10, "bytes=-5"), ParseOutcome::Unsatisfiable);
    }

    #[test]
    fn test_huge_values_saturate() {
        let set = ranges(1000, "bytes=0-99999999999999999999999");
        assert_eq!(set.ranges, vec![Range::new(0, 999)]);

        assert_eq!(
            parse(1000, "bytes=-99999999999999999999999"),
            ParseOutcome::Unsatisfiable
        );

        let set = ranges(i64::MAX, "bytes=-1");
        assert_eq!(set.ranges, vec![Range::new(i64::MAX - 1, i64::MAX - 1)]);

        assert_eq!(parse(i64::MIN, "bytes=0-"), ParseOutcome::Unsatisfiable);
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("  42xyz"), Some(42));
        assert_eq!(parse_leading_int("\t+7"), Some(7));
        assert_eq!(parse_leading_int("-7"), Some(-7));
        assert_eq!(parse_leading_int("\u{feff}3"), Some(3));
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("+"), None);
        assert_eq!(parse_leading_int("+-5"), None);
        assert_eq!(parse_leading_int("x5"), None);
        assert_eq!(parse_leading_int("99999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn test_combine_option() {
        let set = parse_range(
            150,
            "bytes=0-4,90-99,5-75,100-199,101-102",
            ParseOptions::combined(),
        )
        .into_ranges()
        .unwrap();
        assert_eq!(set.unit, "bytes");
        assert_eq!(set.ranges, vec![Range::new(0, 75), Range::new(90, 149)]);
    }

    #[test]
    fn test_combine_retains_original_order() {
        let set = parse_range(150, "bytes=-1,20-100,0-1,101-120", ParseOptions::combined())
            .into_ranges()
            .unwrap();
        assert_eq!(
            set.ranges,
            vec![Range::new(149, 149), Range::new(20, 120), Range::new(0, 1)]
        );
    }
}
