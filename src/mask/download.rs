use anyhow::{anyhow, Context};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Cache file name used when the URL has no usable last path segment.
pub const DEFAULT_MASK_FILENAME: &str = "land_mask.geojson";

/// Local file name for a mask URL: its last path segment without query or fragment.
pub fn filename_for_url(url: &str) -> String {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let path = without_scheme
        .split(['?', '#'])
        .next()
        .unwrap_or(without_scheme);
    let mut segments = path.split('/');
    // The first segment is the host.
    segments.next();
    match segments.filter(|segment| !segment.is_empty()).last() {
        Some(segment) => segment.to_string(),
        None => DEFAULT_MASK_FILENAME.to_string(),
    }
}

pub fn download_mask(url: &str) -> anyhow::Result<String> {
    let client = reqwest::blocking::Client::builder()
        .user_agent("gbif-points")
        .build()?;
    let response = client.get(url).send()?.error_for_status()?;
    response.text().or(Err(anyhow!("No response text")))
}

/// Download the mask at `url` into `output_dir`, unless a copy from an earlier run is there.
pub fn sync_mask_to_file(url: &str, output_dir: &Path) -> anyhow::Result<PathBuf> {
    let output_filepath = output_dir.join(filename_for_url(url));
    if output_filepath.exists() {
        log::info!(
            "Local file exists for land mask: {:?}",
            output_filepath.canonicalize()
        );
        return Ok(output_filepath);
    }

    log::info!("Downloading land mask from {}", url);
    let mask_data = download_mask(url)?;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Creating data directory {:?}", output_dir))?;
    fs::write(&output_filepath, mask_data)
        .or(Err(anyhow!("Could not write land mask to file")))?;
    Ok(output_filepath)
}
