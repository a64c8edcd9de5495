use indicatif::{ParallelProgressIterator, ProgressBar};
use rayon::prelude::*;
use std::borrow::Cow;

use crate::{geofile::feature::point_coordinates, mask::land_mask::LandMask};

/// Whether a feature is a valid point outside all land. Features without a finite point
/// coordinate pair count as not at sea.
pub fn is_sea_point(feature: &geojson::Feature, land_mask: &LandMask) -> bool {
    match point_coordinates(feature) {
        Some((lon, lat)) => !land_mask.contains(lon, lat),
        None => false,
    }
}

/// Keep the points that are not on land, in their original order.
///
/// Either input may still be missing: without points there is nothing to return, and without a
/// land mask the points are passed through untouched (borrowed, not copied).
pub fn filter_sea_points<'a>(
    points: Option<&'a geojson::FeatureCollection>,
    land_mask: Option<&LandMask>,
) -> Option<Cow<'a, geojson::FeatureCollection>> {
    filter_sea_points_with_progress(points, land_mask, ProgressBar::hidden())
}

/// Like `filter_sea_points`, advancing `bar` once per checked point.
pub fn filter_sea_points_with_progress<'a>(
    points: Option<&'a geojson::FeatureCollection>,
    land_mask: Option<&LandMask>,
    bar: ProgressBar,
) -> Option<Cow<'a, geojson::FeatureCollection>> {
    let points = points?;
    let Some(land_mask) = land_mask else {
        return Some(Cow::Borrowed(points));
    };

    let features: Vec<geojson::Feature> = points
        .features
        .par_iter()
        .progress_with(bar)
        .filter(|feature| is_sea_point(feature, land_mask))
        .cloned()
        .collect();
    log::debug!(
        "Kept {} of {} points outside the land mask",
        features.len(),
        points.features.len()
    );
    Some(Cow::Owned(geojson::FeatureCollection {
        bbox: points.bbox.clone(),
        features,
        foreign_members: points.foreign_members.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use serde_json::json;
    use std::borrow::Cow;

    use indicatif::ProgressBar;

    use super::{filter_sea_points, filter_sea_points_with_progress, is_sea_point};
    use crate::mask::land_mask::{
        tests::{feature_from_value, square_ring},
        LandMask,
    };

    fn point(lon: f64, lat: f64, name: &str) -> geojson::Feature {
        let mut feature = feature_from_value(geojson::Value::Point(vec![lon, lat]));
        feature.set_property("species", json!(name));
        feature
    }

    fn names(feature_collection: &geojson::FeatureCollection) -> Vec<String> {
        feature_collection
            .features
            .iter()
            .map(|feature| feature.property("species").unwrap().as_str().unwrap().to_string())
            .collect()
    }

    #[fixture]
    fn land_mask() -> LandMask {
        let feature_collection: geojson::FeatureCollection =
            vec![feature_from_value(geojson::Value::Polygon(vec![square_ring(0.0, 10.0)]))]
                .into_iter()
                .collect();
        LandMask::from_feature_collection(&feature_collection).unwrap()
    }

    #[fixture]
    fn points() -> geojson::FeatureCollection {
        vec![
            point(20.0, 20.0, "sea-1"),
            point(5.0, 5.0, "land"),
            point(-5.0, 3.0, "sea-2"),
            point(10.0, 2.0, "coast"),
            point(-75.2, 10.5, "sea-3"),
        ]
        .into_iter()
        .collect()
    }

    #[rstest]
    fn test_filter_removes_land_points_and_keeps_order(
        points: geojson::FeatureCollection,
        land_mask: LandMask,
    ) {
        let filtered = filter_sea_points(Some(&points), Some(&land_mask)).unwrap();
        assert_eq!(names(&filtered), vec!["sea-1", "sea-2", "sea-3"]);
        // Surviving features are unchanged.
        assert_eq!(filtered.features[0], points.features[0]);
        assert_eq!(filtered.features[2], points.features[4]);
    }

    #[rstest]
    fn test_filter_is_idempotent(points: geojson::FeatureCollection, land_mask: LandMask) {
        let once = filter_sea_points(Some(&points), Some(&land_mask)).unwrap();
        let twice = filter_sea_points(Some(&*once), Some(&land_mask)).unwrap();
        assert_eq!(*once, *twice);
    }

    #[rstest]
    fn test_filter_without_mask_passes_points_through(points: geojson::FeatureCollection) {
        let filtered = filter_sea_points(Some(&points), None).unwrap();
        match filtered {
            Cow::Borrowed(borrowed) => assert!(std::ptr::eq(borrowed, &points)),
            Cow::Owned(_) => panic!("Expected the input collection to be passed through"),
        }
    }

    #[rstest]
    fn test_filter_without_points(land_mask: LandMask) {
        assert!(filter_sea_points(None, Some(&land_mask)).is_none());
        assert!(filter_sea_points(None, None).is_none());
    }

    #[rstest]
    fn test_invalid_points_are_excluded(land_mask: LandMask) {
        let line = feature_from_value(geojson::Value::LineString(vec![
            vec![20.0, 20.0],
            vec![30.0, 30.0],
        ]));
        let short_point = feature_from_value(geojson::Value::Point(vec![20.0]));
        let nan_point = feature_from_value(geojson::Value::Point(vec![f64::NAN, 20.0]));
        let no_geometry = geojson::Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: None,
            foreign_members: None,
        };
        for feature in [&line, &short_point, &nan_point, &no_geometry] {
            assert!(!is_sea_point(feature, &land_mask));
        }

        let points: geojson::FeatureCollection = vec![line, point(20.0, 20.0, "sea"), nan_point]
            .into_iter()
            .collect();
        let filtered = filter_sea_points(Some(&points), Some(&land_mask)).unwrap();
        assert_eq!(names(&filtered), vec!["sea"]);
    }

    #[rstest]
    fn test_filter_with_progress_counts_every_point(
        points: geojson::FeatureCollection,
        land_mask: LandMask,
    ) {
        let bar = ProgressBar::hidden();
        let filtered =
            filter_sea_points_with_progress(Some(&points), Some(&land_mask), bar.clone()).unwrap();
        assert_eq!(bar.position(), points.features.len() as u64);
        assert_eq!(
            *filtered,
            *filter_sea_points(Some(&points), Some(&land_mask)).unwrap()
        );
    }

    #[rstest]
    fn test_filter_keeps_collection_members(land_mask: LandMask) {
        let mut points: geojson::FeatureCollection =
            vec![point(20.0, 20.0, "sea")].into_iter().collect();
        points.bbox = Some(vec![20.0, 20.0, 20.0, 20.0]);
        let filtered = filter_sea_points(Some(&points), Some(&land_mask)).unwrap();
        assert_eq!(filtered.bbox, points.bbox);
    }
}
