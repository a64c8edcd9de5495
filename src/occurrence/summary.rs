use std::collections::BTreeMap;

use crate::geofile::feature::point_coordinates;

/// Key used in `species_counts` for features without a species property.
pub const UNKNOWN_SPECIES: &str = "unknown";

/// Overview of a point collection: how many points, where they are and which species.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSummary {
    pub feature_count: usize,
    /// Bounding rectangle of all valid point coordinates, `None` if there are none.
    pub bounds: Option<geo::Rect>,
    pub species_counts: BTreeMap<String, usize>,
}

impl CollectionSummary {
    pub fn from_collection(feature_collection: &geojson::FeatureCollection) -> Self {
        let mut bounds: Option<geo::Rect> = None;
        let mut species_counts = BTreeMap::new();
        for feature in &feature_collection.features {
            if let Some((lon, lat)) = point_coordinates(feature) {
                let coord = geo::Coord { x: lon, y: lat };
                bounds = Some(match bounds {
                    Some(rect) => geo::Rect::new(
                        geo::Coord {
                            x: rect.min().x.min(lon),
                            y: rect.min().y.min(lat),
                        },
                        geo::Coord {
                            x: rect.max().x.max(lon),
                            y: rect.max().y.max(lat),
                        },
                    ),
                    None => geo::Rect::new(coord, coord),
                });
            }
            let species = feature
                .property("species")
                .and_then(|value| value.as_str())
                .unwrap_or(UNKNOWN_SPECIES);
            *species_counts.entry(species.to_string()).or_insert(0) += 1;
        }
        Self {
            feature_count: feature_collection.features.len(),
            bounds,
            species_counts,
        }
    }

    pub fn log(&self) {
        match &self.bounds {
            Some(bounds) => log::info!(
                "{} points within lon [{}, {}], lat [{}, {}]",
                self.feature_count,
                bounds.min().x,
                bounds.max().x,
                bounds.min().y,
                bounds.max().y
            ),
            None => log::info!("{} points, none with valid coordinates", self.feature_count),
        }
        for (species, count) in &self.species_counts {
            log::info!("  {}: {}", species, count);
        }
    }
}
