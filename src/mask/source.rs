use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::{download::sync_mask_to_file, land_mask::LandMask};

/// Where the land mask comes from.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub enum MaskSource {
    Geofile { filepath: PathBuf },
    Url { url: String },
}

impl MaskSource {
    /// Classify a command line value: `http://` and `https://` values are URLs, anything else a
    /// local file.
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            MaskSource::Url {
                url: value.to_string(),
            }
        } else {
            MaskSource::Geofile {
                filepath: PathBuf::from(value),
            }
        }
    }

    /// Load the mask. URLs are cached in `data_dir`.
    pub fn load(&self, data_dir: &Path) -> anyhow::Result<LandMask> {
        match self {
            MaskSource::Geofile { filepath } => LandMask::load_from_geojson(filepath),
            MaskSource::Url { url } => {
                log::info!("Syncing land mask from {}", url);
                let filepath = sync_mask_to_file(url, data_dir)?;
                LandMask::load_from_geojson(&filepath)
            }
        }
    }
}
