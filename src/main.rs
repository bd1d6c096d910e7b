use std::io;

use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

use stacesg::catalog::{Catalog, FileCatalog, StacApiCatalog};
use stacesg::cliopt::CliOpt;
use stacesg::error::{Error, ErrorKind, Result};
use stacesg::filter::{ExtentPolicy, Query};
use stacesg::geocode::{Geocoder, NominatimGeocoder, NOMINATIM_URL};
use stacesg::insight::{ApiKey, ChatCompletionRequester, ChatConfig, InsightRequester};
use stacesg::model::Rectangle;
use stacesg::output::{Encoder, HumanReadableEncoder, JsonEncoder, LineWriter};
use stacesg::parser::{parse_bbox, parse_date_range};
use stacesg::runner::Runner;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let opt = CliOpt::from_args();

    // RUST_LOG wins over --verbose.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if opt.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let query = Query::new(search_area(&opt)?, parse_date_range(&opt.dates)?);

    let catalog: Box<dyn Catalog> = match &opt.catalog_file {
        Some(path) => Box::new(FileCatalog::new(path)),
        None => Box::new(StacApiCatalog::new(&opt.stac_url, opt.timeout)?),
    };

    let policy = if opt.skip_incomplete {
        ExtentPolicy::Skip
    } else {
        ExtentPolicy::Fail
    };

    let mut runner = Runner::new(
        catalog,
        insight_requester(&opt)?,
        encoder(opt.encode.as_deref())?,
        Box::new(LineWriter::new(io::stdout())),
        opt.limit,
        policy,
    );

    runner.run(query)?;

    Ok(())
}

fn search_area(opt: &CliOpt) -> Result<Rectangle> {
    let location = match &opt.location {
        Some(location) => location,
        None => return parse_bbox(&opt.bbox),
    };

    NominatimGeocoder::new(NOMINATIM_URL, opt.timeout)?
        .locate(location)?
        .ok_or_else(|| Error::malformed(format!("location '{}' not found", location)))
}

fn insight_requester(opt: &CliOpt) -> Result<Option<Box<dyn InsightRequester>>> {
    if opt.no_insight {
        return Ok(None);
    }

    let api_key = opt.api_key.as_ref().ok_or_else(|| {
        Error::new(
            ErrorKind::Configuration,
            "an API key is required for insights (--api-key or OPENAI_API_KEY), or pass --no-insight",
        )
    })?;

    let mut config = ChatConfig::new(ApiKey::new(api_key.as_str()));
    config.api_url = opt.api_url.clone();
    config.model = opt.model.clone();
    config.timeout = opt.timeout;

    Ok(Some(Box::new(ChatCompletionRequester::new(config)?)))
}

fn encoder(name: Option<&str>) -> Result<Box<dyn Encoder>> {
    match name {
        None | Some("h") => Ok(Box::new(HumanReadableEncoder::new())),
        Some("json") => Ok(Box::new(JsonEncoder::new())),
        Some(other) => Err(Error::new(
            ErrorKind::Configuration,
            format!("unknown output format '{}', expected h or json", other),
        )),
    }
}
