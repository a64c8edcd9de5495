extern crate log;
pub mod config;
pub mod error;
pub mod filter;
pub mod geofile;
pub mod mask;
pub mod occurrence;
use crate::config::{load_config, Config};
use crate::filter::sea_points::filter_sea_points_with_progress;
use crate::geofile::geojson::write_feature_collection_to_geojson;
use crate::mask::source::MaskSource;
use crate::occurrence::parser::parse_occurrences_from_file;
use crate::occurrence::summary::CollectionSummary;
use clap::Parser;
use indicatif::ProgressBar;
use std::borrow::Cow;
use std::path::PathBuf;

/// Convert a GBIF occurrence export to GeoJSON points, optionally dropping points on land.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the tab-separated GBIF occurrence export.
    #[arg(long = "in")]
    input: PathBuf,

    /// Path of the GeoJSON file to write.
    #[arg(long = "out")]
    output: PathBuf,

    /// Stop after this many points.
    #[arg(long)]
    limit: Option<usize>,

    /// Land mask GeoJSON, a local path or an http(s) URL. Points on land are dropped.
    #[arg(long)]
    mask: Option<String>,

    /// Path to an optional YAML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ConversionReport {
    points_written: usize,
    lines_read: usize,
}

fn convert(args: &Args, config: &Config) -> anyhow::Result<ConversionReport> {
    let options = config.parse_options(args.limit);
    log::info!("Reading occurrences from {:?}", &args.input);
    let parsed = parse_occurrences_from_file(&args.input, &options)?;
    log::info!(
        "Read {} points from {} lines, skipped {} rows without coordinates",
        parsed.features.len(),
        parsed.stats.lines_read,
        parsed.stats.rows_skipped
    );
    let points = parsed.to_feature_collection();

    let mask_source = match &args.mask {
        Some(mask) => Some(MaskSource::parse(mask)),
        None => config.mask.clone(),
    };
    let land_mask = match mask_source {
        Some(mask_source) => Some(mask_source.load(&config.data_dir)?),
        None => None,
    };

    let bar = ProgressBar::new(points.features.len() as u64);
    let sea_points = filter_sea_points_with_progress(Some(&points), land_mask.as_ref(), bar)
        .unwrap_or(Cow::Borrowed(&points));
    if land_mask.is_some() {
        log::info!(
            "Removed {} points on land",
            parsed.features.len() - sea_points.features.len()
        );
    }
    CollectionSummary::from_collection(&sea_points).log();

    log::info!("Writing {} points to {:?}", sea_points.features.len(), &args.output);
    write_feature_collection_to_geojson(&sea_points, &args.output)?;
    Ok(ConversionReport {
        points_written: sea_points.features.len(),
        lines_read: parsed.stats.lines_read,
    })
}

fn try_main(args: Args) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(config_filepath) => load_config(config_filepath)?,
        None => Config::default(),
    };
    log::debug!("Using config {:?}", config);

    let report = convert(&args, &config)?;
    println!(
        "Saved {} points to {} (from {} lines read)",
        report.points_written,
        args.output.display(),
        report.lines_read
    );
    Ok(())
}

fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    env_logger::init();

    let args = Args::parse();
    if let Err(e) = try_main(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1)
    }
}
