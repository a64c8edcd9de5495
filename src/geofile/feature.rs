use serde_json::Value as JsonValue;

/// Attributes attached to every occurrence point.
#[derive(Debug, Clone, PartialEq)]
pub struct OccurrenceProperties {
    pub species: String,
    pub event_date: Option<String>,
    pub basis_of_record: Option<String>,
}

impl OccurrenceProperties {
    /// GeoJSON properties object. Missing optional values are written as explicit nulls.
    pub fn to_json_object(&self) -> geojson::JsonObject {
        let optional = |value: &Option<String>| match value {
            Some(value) => JsonValue::String(value.clone()),
            None => JsonValue::Null,
        };
        let mut properties = geojson::JsonObject::new();
        properties.insert(
            "species".to_string(),
            JsonValue::String(self.species.clone()),
        );
        properties.insert("eventDate".to_string(), optional(&self.event_date));
        properties.insert("basisOfRecord".to_string(), optional(&self.basis_of_record));
        properties
    }
}

/// A single occurrence as a point. The point's x is the longitude and y the latitude.
#[derive(Debug, Clone, PartialEq)]
pub struct OccurrenceFeature {
    pub geometry: geo::Point,
    pub properties: OccurrenceProperties,
}

impl OccurrenceFeature {
    pub fn new(longitude: f64, latitude: f64, properties: OccurrenceProperties) -> Self {
        Self {
            geometry: geo::Point::new(longitude, latitude),
            properties,
        }
    }
}

impl From<&OccurrenceFeature> for geojson::Feature {
    fn from(feature: &OccurrenceFeature) -> Self {
        geojson::Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::Point(vec![
                feature.geometry.x(),
                feature.geometry.y(),
            ]))),
            id: None,
            properties: Some(feature.properties.to_json_object()),
            foreign_members: None,
        }
    }
}

/// Longitude and latitude of a GeoJSON point feature, if it has a point geometry whose first two
/// coordinates are finite.
pub fn point_coordinates(feature: &geojson::Feature) -> Option<(f64, f64)> {
    match &feature.geometry.as_ref()?.value {
        geojson::Value::Point(position) => match position.as_slice() {
            [lon, lat, ..] if lon.is_finite() && lat.is_finite() => Some((*lon, *lat)),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{point_coordinates, OccurrenceFeature, OccurrenceProperties};

    #[rstest]
    fn test_feature_to_geojson_is_lon_lat_with_null_properties() {
        let feature = OccurrenceFeature::new(
            -75.2,
            10.5,
            OccurrenceProperties {
                species: "Sphyrna lewini".to_string(),
                event_date: None,
                basis_of_record: Some("HUMAN_OBSERVATION".to_string()),
            },
        );
        let geojson_feature = geojson::Feature::from(&feature);
        let value = serde_json::to_value(&geojson_feature).unwrap();

        assert_eq!(value["geometry"]["type"], json!("Point"));
        assert_eq!(value["geometry"]["coordinates"], json!([-75.2, 10.5]));
        assert_eq!(value["properties"]["species"], json!("Sphyrna lewini"));
        // Explicit null, not an absent key.
        let properties = value["properties"].as_object().unwrap();
        assert_eq!(properties.get("eventDate"), Some(&json!(null)));
        assert_eq!(value["properties"]["basisOfRecord"], json!("HUMAN_OBSERVATION"));
    }

    #[rstest]
    fn test_properties_keep_insertion_order() {
        let feature = OccurrenceFeature::new(
            1.0,
            2.0,
            OccurrenceProperties {
                species: "Sphyrna tiburo".to_string(),
                event_date: Some("2020-01-01".to_string()),
                basis_of_record: None,
            },
        );
        let contents = serde_json::to_string(&geojson::Feature::from(&feature)).unwrap();
        let position = |key: &str| contents.find(&format!("\"{}\"", key)).unwrap();
        assert!(position("species") < position("eventDate"));
        assert!(position("eventDate") < position("basisOfRecord"));
    }

    #[rstest]
    #[case(geojson::Value::Point(vec![1.0, 2.0]), Some((1.0, 2.0)))]
    #[case(geojson::Value::Point(vec![1.0, 2.0, 30.0]), Some((1.0, 2.0)))]
    #[case(geojson::Value::Point(vec![1.0]), None)]
    #[case(geojson::Value::Point(vec![f64::NAN, 2.0]), None)]
    #[case(geojson::Value::LineString(vec![vec![1.0, 2.0], vec![3.0, 4.0]]), None)]
    fn test_point_coordinates(
        #[case] value: geojson::Value,
        #[case] expected: Option<(f64, f64)>,
    ) {
        let feature = geojson::Feature::from(geojson::Geometry::new(value));
        assert_eq!(point_coordinates(&feature), expected);
    }

    #[rstest]
    fn test_point_coordinates_without_geometry() {
        let feature = geojson::Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: None,
            foreign_members: None,
        };
        assert_eq!(point_coordinates(&feature), None);
    }
}
