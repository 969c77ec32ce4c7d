//! # range-parser
//!
//! Parse HTTP `Range` request headers against a known resource size.
//!
//! A header such as `bytes=0-499,-200` is turned into a bounds-checked list of
//! inclusive ranges. Specs that do not fit the resource are dropped one by one;
//! a header with no usable spec is reported as unsatisfiable, and a value that
//! is not a Range header at all as malformed. Overlapping and adjacent ranges
//! can optionally be combined while keeping the order in which the client
//! asked for them.
//!
//! ## Features
//!
//! - Suffix (`-500`) and open-ended (`9500-`) specs
//! - Clamping to the resource size
//! - Combining of overlapping or adjacent ranges, preserving request order
//! - Opaque unit tokens (`items=0-5` works like `bytes=0-5`)
//! - Size probes for local files and remote HTTP resources, used by the CLI
//!
//! ## Example
//!
//! ```
//! use range_parser::{parse_range, ParseOptions, ParseOutcome, Range};
//!
//! match parse_range(150, "bytes=-1,20-100,0-1,101-120", ParseOptions::combined()) {
//!     ParseOutcome::Satisfiable(set) => {
//!         assert_eq!(set.unit, "bytes");
//!         assert_eq!(
//!             set.ranges,
//!             vec![Range::new(149, 149), Range::new(20, 120), Range::new(0, 1)]
//!         );
//!     }
//!     ParseOutcome::Malformed => println!("not a Range header"),
//!     ParseOutcome::Unsatisfiable => println!("416 Range Not Satisfiable"),
//! }
//! ```

pub mod cli;
pub mod io;
pub mod range;

pub use cli::Cli;
pub use io::{HttpProbe, LocalFileProbe, SizeProbe};
pub use range::{
    ParseOptions, ParseOutcome, Range, RangeError, RangeSet, combine_ranges, parse_range,
    parse_range_bytes,
};
