use anyhow::anyhow;
use serde::Deserialize;
use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

use crate::{
    mask::source::MaskSource,
    occurrence::{
        parser::{ParseOptions, DEFAULT_SEPARATOR},
        record::{PLACEHOLDER_SPECIES, SPECIES_FIELDS},
    },
};

/// Optional settings file. Every key may be left out.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub separator: char,
    pub species_fields: Vec<String>,
    pub placeholder_species: String,
    pub mask: Option<MaskSource>,
    /// Downloaded land masks are cached here.
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            species_fields: SPECIES_FIELDS.iter().map(|field| field.to_string()).collect(),
            placeholder_species: PLACEHOLDER_SPECIES.to_string(),
            mask: None,
            data_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn parse_options(&self, limit: Option<usize>) -> ParseOptions {
        ParseOptions {
            separator: self.separator,
            species_fields: self.species_fields.clone(),
            placeholder_species: self.placeholder_species.clone(),
            limit,
        }
    }
}

pub fn load_config(config_filepath: &Path) -> anyhow::Result<Config> {
    if !config_filepath.exists() {
        return Err(anyhow!("Config file {:?} not found", config_filepath));
    }
    let config_contents = read_to_string(config_filepath)?;
    let config: Config = serde_yaml::from_str(&config_contents)?;
    Ok(config)
}
