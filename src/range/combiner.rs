use super::structures::{Range, RangeSet};

/// A range tagged with its position in the request.
#[derive(Debug, Clone, Copy)]
struct IndexedRange {
    start: i64,
    end: i64,
    index: usize,
}

/// Merge overlapping and adjacent ranges.
///
/// Merged groups are returned in the order of the earliest requested range
/// among their members, so a client's priority order survives combining.
/// The unit is copied unchanged.
///
/// # Examples
///
/// ```
/// use range_parser::{combine_ranges, Range, RangeSet};
///
/// let set = RangeSet::new(
///     "bytes",
///     vec![Range::new(149, 149), Range::new(20, 100), Range::new(0, 1), Range::new(101, 120)],
/// );
/// let combined = combine_ranges(&set);
/// assert_eq!(
///     combined.ranges,
///     vec![Range::new(149, 149), Range::new(20, 120), Range::new(0, 1)]
/// );
/// ```
pub fn combine_ranges(set: &RangeSet) -> RangeSet {
    let mut ordered: Vec<IndexedRange> = set
        .ranges
        .iter()
        .enumerate()
        .map(|(index, range)| IndexedRange {
            start: range.start,
            end: range.end,
            index,
        })
        .collect();
    ordered.sort_by_key(|r| r.start);

    let mut j = 0;
    for i in 1..ordered.len() {
        let range = ordered[i];
        let current = &mut ordered[j];

        if range.start > current.end.saturating_add(1) {
            // next disjoint group
            j += 1;
            ordered[j] = range;
        } else if range.end > current.end {
            current.end = range.end;
            current.index = current.index.min(range.index);
        }
    }

    ordered.truncate(j + 1);

    ordered.sort_by_key(|r| r.index);

    RangeSet {
        unit: set.unit.clone(),
        ranges: ordered
            .into_iter()
            .map(|r| Range {
                start: r.start,
                end: r.end,
            })
            .collect(),
    }
}
