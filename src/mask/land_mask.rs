use anyhow::Context;
use geo::{
    coordinate_position::{CoordPos, CoordinatePosition},
    BoundingRect,
};
use rstar::primitives::{GeomWithData, Rectangle};
use std::path::Path;

use crate::geofile::geojson::read_feature_collection_from_geojson;

/// Bounding box of a mask polygon, with the polygon's index as data.
type PolygonEnvelope = GeomWithData<Rectangle<[f64; 2]>, usize>;

/// Landmass polygons in planar lon/lat, indexed by bounding box. Read-only once built.
pub struct LandMask {
    polygons: Vec<geo::Polygon>,
    rtree: rstar::RTree<PolygonEnvelope>,
}

impl LandMask {
    pub fn from_polygons(polygons: Vec<geo::Polygon>) -> Self {
        let envelopes: Vec<PolygonEnvelope> = polygons
            .iter()
            .enumerate()
            .filter_map(|(index, polygon)| {
                let rect = polygon.bounding_rect()?;
                Some(PolygonEnvelope::new(
                    Rectangle::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]),
                    index,
                ))
            })
            .collect();
        Self {
            polygons,
            rtree: rstar::RTree::bulk_load(envelopes),
        }
    }

    /// Build a mask from the `Polygon` and `MultiPolygon` features of a collection. Features of
    /// any other geometry type, or without geometry, are skipped.
    pub fn from_feature_collection(
        feature_collection: &geojson::FeatureCollection,
    ) -> anyhow::Result<Self> {
        let mut polygons = Vec::new();
        let mut num_skipped = 0;
        for (index, feature) in feature_collection.features.iter().enumerate() {
            let Some(geometry) = &feature.geometry else {
                num_skipped += 1;
                continue;
            };
            if !matches!(
                geometry.value,
                geojson::Value::Polygon(_) | geojson::Value::MultiPolygon(_)
            ) {
                num_skipped += 1;
                continue;
            }
            let geometry: geo::Geometry = geometry
                .clone()
                .try_into()
                .with_context(|| format!("Converting land mask feature {}", index))?;
            match geometry {
                geo::Geometry::Polygon(polygon) => polygons.push(polygon),
                geo::Geometry::MultiPolygon(multi_polygon) => polygons.extend(multi_polygon.0),
                _ => num_skipped += 1,
            }
        }
        if num_skipped > 0 {
            log::warn!(
                "Out of {} land mask features, {} were not polygons and were skipped.",
                feature_collection.features.len(),
                num_skipped
            )
        }
        Ok(Self::from_polygons(polygons))
    }

    pub fn load_from_geojson(filepath: &Path) -> anyhow::Result<Self> {
        let feature_collection = read_feature_collection_from_geojson(filepath)?;
        let land_mask = Self::from_feature_collection(&feature_collection)?;
        log::info!(
            "Loaded land mask with {} polygons from {:?}",
            land_mask.len(),
            filepath
        );
        Ok(land_mask)
    }

    /// Whether the point lies inside or on the boundary of any mask polygon. Points inside a hole
    /// are not on land.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        let coord = geo::Coord { x: lon, y: lat };
        self.rtree
            .locate_all_at_point(&[lon, lat])
            .any(|envelope| {
                self.polygons[envelope.data].coordinate_position(&coord) != CoordPos::Outside
            })
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}
