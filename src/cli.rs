use clap::Parser;

use crate::range::ParseOptions;

#[derive(Parser, Debug)]
#[command(name = "range-parser")]
#[command(version)]
#[command(about = "Parse an HTTP Range header against a resource size", long_about = None)]
#[command(after_help = "Examples:\n  \
  range-parser 1000 bytes=0-499            ranges of a 1000 byte resource\n  \
  range-parser -c data.bin bytes=0-4,5-9   merge ranges against a local file\n  \
  range-parser -v https://example.com/archive.zip bytes=-1024   size a remote resource\n\n\
Exit status: 0 ranges printed, 2 malformed header, 3 unsatisfiable, 1 other errors")]
pub struct Cli {
    /// Resource size, local file path, or HTTP URL
    #[arg(value_name = "RESOURCE", allow_hyphen_values = true)]
    pub resource: String,

    /// Range header value, e.g. bytes=0-499
    #[arg(value_name = "RANGE", allow_hyphen_values = true)]
    pub range: String,

    /// Combine overlapping and adjacent ranges
    #[arg(short = 'c', long)]
    pub combine: bool,

    /// Show a table with range lengths and a total
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Quiet mode (-qq => quieter)
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Timeout for HTTP requests
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,

    /// Retries for HTTP connection errors
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub max_retry: u32,
}

impl Cli {
    pub fn is_http_url(&self) -> bool {
        self.resource.starts_with("http://") || self.resource.starts_with("https://")
    }

    /// The resource given directly as a size, if it is one
    pub fn literal_size(&self) -> Option<i64> {
        self.resource.parse().ok()
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet > 0
    }

    pub fn is_very_quiet(&self) -> bool {
        self.quiet > 1
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            combine: self.combine,
        }
    }
}
