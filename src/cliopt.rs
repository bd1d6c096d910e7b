use std::path::PathBuf;
use std::time::Duration;

use structopt::StructOpt;

use crate::error::{Error, Result};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "stacesg",
    about = "Find STAC collections covering a region and period, and summarize them for ESG research"
)]
pub struct CliOpt {
    /// minLon, minLat, maxLon, maxLat
    #[structopt(
        long,
        short = "b",
        allow_hyphen_values = true,
        default_value = "-135.17, 36.83, -51.24, 62.25"
    )]
    pub bbox: String,

    /// Place name to geocode instead of --bbox.
    #[structopt(long, short = "l")]
    pub location: Option<String>,

    /// start, end (ISO-8601 dates or date-times, `..` for an open bound)
    #[structopt(long, short = "d", default_value = "2020-01-01, 2023-01-01")]
    pub dates: String,

    /// Maximum number of matching collections.
    #[structopt(long, short = "n", default_value = "5")]
    pub limit: usize,

    #[structopt(
        long,
        env = "STAC_URL",
        default_value = "https://planetarycomputer.microsoft.com/api/stac/v1"
    )]
    pub stac_url: String,

    /// Read collections from a local JSON file instead of --stac-url.
    #[structopt(long, parse(from_os_str))]
    pub catalog_file: Option<PathBuf>,

    /// Leave out collections without a usable extent instead of failing.
    #[structopt(long)]
    pub skip_incomplete: bool,

    /// Only list the matching collections.
    #[structopt(long)]
    pub no_insight: bool,

    #[structopt(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[structopt(
        long,
        env = "OPENAI_API_URL",
        default_value = "https://api.openai.com/v1/chat/completions"
    )]
    pub api_url: String,

    #[structopt(long, default_value = "gpt-3.5-turbo")]
    pub model: String,

    /// Network timeout in seconds.
    #[structopt(long, default_value = "60", parse(try_from_str = parse_timeout))]
    pub timeout: Duration,

    /// Output format: h (human readable) or json.
    #[structopt(long, short = "e")]
    pub encode: Option<String>,

    #[structopt(long, short = "v")]
    pub verbose: bool,
}

fn parse_timeout(s: &str) -> Result<Duration> {
    s.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| Error::malformed(format!("invalid timeout '{}': {}", s, e)))
}
