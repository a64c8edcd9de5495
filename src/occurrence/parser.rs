use anyhow::Context;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::{error::ConvertError, geofile::feature::OccurrenceFeature};

use super::{
    header::HeaderIndex,
    record::{OccurrenceRecord, PLACEHOLDER_SPECIES, SPECIES_FIELDS},
};

/// GBIF "simple" downloads are tab-delimited.
pub const DEFAULT_SEPARATOR: char = '\t';

#[derive(Debug, Clone, PartialEq)]
pub struct ParseOptions {
    pub separator: char,
    pub species_fields: Vec<String>,
    pub placeholder_species: String,
    /// Stop reading once this many features were produced.
    pub limit: Option<usize>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            species_fields: SPECIES_FIELDS.iter().map(|field| field.to_string()).collect(),
            placeholder_species: PLACEHOLDER_SPECIES.to_string(),
            limit: None,
        }
    }
}

impl ParseOptions {
    fn limit_reached(&self, num_features: usize) -> bool {
        matches!(self.limit, Some(limit) if num_features >= limit)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseStats {
    /// Every line consumed from the input, including blank lines and the header.
    pub lines_read: usize,
    /// Data lines without a usable coordinate pair.
    pub rows_skipped: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedOccurrences {
    pub features: Vec<OccurrenceFeature>,
    pub stats: ParseStats,
}

impl ParsedOccurrences {
    pub fn to_feature_collection(&self) -> geojson::FeatureCollection {
        self.features.iter().map(geojson::Feature::from).collect()
    }
}

/// Parse a delimited occurrence export into point features, in row order.
///
/// Blank lines are ignored, the first non-blank line is the header. Data lines whose latitude or
/// longitude does not parse to a finite number are skipped without error.
pub fn parse_occurrences<R: BufRead>(
    reader: R,
    options: &ParseOptions,
) -> anyhow::Result<ParsedOccurrences> {
    let mut header: Option<HeaderIndex> = None;
    let mut features = Vec::new();
    let mut stats = ParseStats::default();
    let mut lines = reader.split(b'\n');

    while !options.limit_reached(features.len()) {
        let mut bytes = match lines.next() {
            Some(bytes) => {
                bytes.with_context(|| format!("Reading line {}", stats.lines_read + 1))?
            }
            None => break,
        };
        stats.lines_read += 1;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        // Exports occasionally carry Latin-1 names; undecodable bytes become U+FFFD.
        let line = String::from_utf8_lossy(&bytes);
        if line.trim().is_empty() {
            continue;
        }

        let cells: Vec<&str> = line.split(options.separator).collect();
        let Some(header_index) = header.as_ref() else {
            let header_index = HeaderIndex::from_cells(&cells);
            log::debug!("Read header with {} columns", header_index.len());
            header = Some(header_index);
            continue;
        };

        let record = OccurrenceRecord::new(header_index, &cells);
        match record.to_feature(&options.species_fields, &options.placeholder_species) {
            Some(feature) => features.push(feature),
            None => stats.rows_skipped += 1,
        }
    }

    if header.is_none() {
        log::warn!("No header line found, the input is empty");
    }
    Ok(ParsedOccurrences { features, stats })
}

/// Like `parse_occurrences`, reading from a file. Fails with `ConvertError::InputNotFound` before
/// anything is read if the file does not exist.
pub fn parse_occurrences_from_file(
    filepath: &Path,
    options: &ParseOptions,
) -> anyhow::Result<ParsedOccurrences> {
    if !filepath.exists() {
        return Err(ConvertError::InputNotFound(filepath.to_path_buf()).into());
    }
    let infile = File::open(filepath).with_context(|| format!("Opening {:?}", filepath))?;
    parse_occurrences(BufReader::new(infile), options)
}
