use anyhow::{anyhow, Context};
use std::{fs, path::Path};

/// Write a feature collection as pretty-printed GeoJSON, creating missing parent directories.
pub fn write_feature_collection_to_geojson(
    feature_collection: &geojson::FeatureCollection,
    output_filepath: &Path,
) -> anyhow::Result<()> {
    if let Some(parent) = output_filepath.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Creating output directory {:?}", parent))?;
        }
    }
    let geojson_contents = serde_json::to_string_pretty(feature_collection)?;
    fs::write(output_filepath, geojson_contents)
        .with_context(|| format!("Writing GeoJSON to {:?}", output_filepath))
}

pub fn read_feature_collection_from_geojson(
    filepath: &Path,
) -> anyhow::Result<geojson::FeatureCollection> {
    let contents = fs::read_to_string(filepath)
        .with_context(|| format!("Reading GeoJSON from {:?}", filepath))?;
    let geojson_contents: geojson::GeoJson = contents
        .parse()
        .with_context(|| format!("Parsing GeoJSON from {:?}", filepath))?;
    match geojson_contents {
        geojson::GeoJson::FeatureCollection(feature_collection) => Ok(feature_collection),
        _ => Err(anyhow!(
            "Expected a FeatureCollection in {:?}",
            filepath
        )),
    }
}
