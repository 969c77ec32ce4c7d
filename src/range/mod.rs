//! HTTP `Range` header parsing and range combining.
//!
//! ## Architecture
//!
//! The module is organized into four components:
//!
//! - [`structures`]: Data types for parsed ranges and the parse outcome
//! - [`parser`]: Tokenizing and bounds-checking a header against a resource size
//! - [`combiner`]: Merging overlapping or adjacent ranges
//! - [`error`]: Contract violations that are not data outcomes
//!
//! ## Header Format Overview
//!
//! A Range header value looks like `bytes=0-499,1000-,-200`:
//! 1. A unit token before the first `=` (passed through uninterpreted)
//! 2. A comma-separated list of specs, each one of
//!    - `start-end`: an inclusive range
//!    - `start-`: from `start` to the end of the resource
//!    - `-n`: the last `n` units of the resource
//!
//! Specs that fall outside the resource are dropped individually. Only when
//! none are left is the whole header unsatisfiable.

mod combiner;
mod error;
mod parser;
mod structures;

pub use combiner::combine_ranges;
pub use error::RangeError;
pub use parser::{parse_range, parse_range_bytes};
pub use structures::*;
