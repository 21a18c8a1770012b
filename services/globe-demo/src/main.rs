//! Globe demo service.
//!
//! Applies EGM96 geoid offsets to a globe and reports terrain heights:
//! - Loads the offset grid at startup (optional unless `--require-offsets`)
//! - Samples offsets at requested points, with an LRU cache in front
//! - Summarises a region sampled on a regular lattice
//! - Writes one JSON report to stdout; logs go to stderr

mod context;
mod report;

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use geoid_common::{GeoBounds, GeoCoordinate};
use offset_grid::GridFormat;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use context::{FlatElevation, GlobeContext};
use report::{build_report, RegionRequest};

#[derive(Parser, Debug)]
#[command(name = "globe-demo")]
#[command(about = "Apply EGM96 geoid offsets to a globe and report heights")]
struct Args {
    /// Path to the EGM96 offset grid
    #[arg(long, env = "EGM96_PATH", default_value = "config/EGM96.dat")]
    offsets_path: PathBuf,

    /// YAML file describing the grid layout (default: EGM96 quarter degree)
    #[arg(long, env = "EGM_GRID_CONFIG")]
    grid_config: Option<PathBuf>,

    /// Point to report as "lat,lon" (repeatable)
    #[arg(long = "point", allow_hyphen_values = true)]
    points: Vec<GeoCoordinate>,

    /// Region to summarise as "south,west,north,east"
    #[arg(long, allow_hyphen_values = true, value_parser = GeoBounds::from_str_degrees)]
    region: Option<GeoBounds>,

    /// Region lattice size as "WxH"
    #[arg(long, default_value = "64x32")]
    region_size: RegionSize,

    /// Terrain height above the geoid, in meters
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    base_elevation: f64,

    /// Abort when the offset grid cannot be loaded
    #[arg(long)]
    require_offsets: bool,

    /// Offset cache capacity (0 disables the cache)
    #[arg(long, env = "OFFSET_CACHE_SIZE", default_value = "4096")]
    cache_size: usize,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Lattice dimensions parsed from "WxH".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RegionSize {
    width: usize,
    height: usize,
}

impl FromStr for RegionSize {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WxH, got '{}'", s))?;
        let width: usize = w
            .trim()
            .parse()
            .map_err(|_| format!("invalid width '{}'", w))?;
        let height: usize = h
            .trim()
            .parse()
            .map_err(|_| format!("invalid height '{}'", h))?;
        if width == 0 || height == 0 {
            return Err(format!("region size must be non-zero, got {}x{}", width, height));
        }
        Ok(Self { width, height })
    }
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting globe demo");

    let format = match &args.grid_config {
        Some(path) => GridFormat::from_yaml_file(path)
            .with_context(|| format!("Failed to read grid config {}", path.display()))?
            .with_env_overrides(),
        None => GridFormat::from_env(),
    };

    let mut globe = GlobeContext::new(Box::new(FlatElevation::new(args.base_elevation)));

    if let Err(e) = globe.apply_egm96_offsets(&args.offsets_path, &format, args.cache_size) {
        if args.require_offsets {
            return Err(e).with_context(|| {
                format!(
                    "Failed to load EGM96 offsets from {}",
                    args.offsets_path.display()
                )
            });
        }
        error!(
            error = %e,
            path = %args.offsets_path.display(),
            "Failed to load EGM96 offsets, continuing without them"
        );
    }

    let region = args.region.map(|bounds| RegionRequest {
        bounds,
        width: args.region_size.width,
        height: args.region_size.height,
    });

    let report = build_report(&globe, &args.points, region).context("Failed to build report")?;

    let stdout = std::io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), &report)?;
    println!();

    if let Some(stats) = report.cache {
        info!(
            hits = stats.hits,
            misses = stats.misses,
            hit_rate = stats.hit_rate(),
            "Offset cache stats"
        );
    }

    Ok(())
}
