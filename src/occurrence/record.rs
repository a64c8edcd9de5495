use crate::geofile::feature::{OccurrenceFeature, OccurrenceProperties};

use super::header::HeaderIndex;

pub const LATITUDE_FIELD: &str = "decimalLatitude";
pub const LONGITUDE_FIELD: &str = "decimalLongitude";
pub const EVENT_DATE_FIELD: &str = "eventDate";
pub const BASIS_OF_RECORD_FIELD: &str = "basisOfRecord";

/// Species name fields, in order of preference.
pub const SPECIES_FIELDS: [&str; 3] = ["species", "scientificName", "acceptedScientificName"];

/// Substituted when none of the species fields has a value.
pub const PLACEHOLDER_SPECIES: &str = "Shark";

/// One data line of an occurrence export, viewed through the header.
pub struct OccurrenceRecord<'a> {
    header: &'a HeaderIndex,
    cells: &'a [&'a str],
}

impl<'a> OccurrenceRecord<'a> {
    pub fn new(header: &'a HeaderIndex, cells: &'a [&'a str]) -> Self {
        Self { header, cells }
    }

    /// Value of the named field. Unknown fields, cells past the end of the line and empty cells
    /// are all missing.
    pub fn get(&self, name: &str) -> Option<&'a str> {
        let index = self.header.position(name)?;
        self.cells
            .get(index)
            .copied()
            .filter(|value| !value.is_empty())
    }

    fn coordinate(&self, name: &str) -> Option<f64> {
        parse_float_prefix(self.get(name)?).filter(|value| value.is_finite())
    }

    pub fn latitude(&self) -> Option<f64> {
        self.coordinate(LATITUDE_FIELD)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.coordinate(LONGITUDE_FIELD)
    }

    pub fn event_date(&self) -> Option<&'a str> {
        self.get(EVENT_DATE_FIELD)
    }

    pub fn basis_of_record(&self) -> Option<&'a str> {
        self.get(BASIS_OF_RECORD_FIELD)
    }

    /// Convert to a point feature. `None` if either coordinate is not a finite number.
    pub fn to_feature<S: AsRef<str>>(
        &self,
        species_fields: &[S],
        placeholder_species: &str,
    ) -> Option<OccurrenceFeature> {
        let latitude = self.latitude()?;
        let longitude = self.longitude()?;
        Some(OccurrenceFeature::new(
            longitude,
            latitude,
            OccurrenceProperties {
                species: resolve_species(self, species_fields, placeholder_species),
                event_date: self.event_date().map(str::to_string),
                basis_of_record: self.basis_of_record().map(str::to_string),
            },
        ))
    }
}

/// Number at the start of `value`, ignoring leading whitespace and anything after the longest
/// numeric prefix, so `"10.5 N"` reads as 10.5. A signed `Infinity` prefix reads as infinite.
pub fn parse_float_prefix(value: &str) -> Option<f64> {
    let value = value.trim_start();
    let bytes = value.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    if value[end..].starts_with("Infinity") {
        let infinity = if value.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        return Some(infinity);
    }

    let count_digits = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count()
    };
    let integer_digits = count_digits(end);
    end += integer_digits;
    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = count_digits(end + 1);
        if integer_digits > 0 || fraction_digits > 0 {
            end += 1 + fraction_digits;
        }
    }
    if integer_digits == 0 && fraction_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+') | Some(b'-')) {
            exponent_end += 1;
        }
        let exponent_digits = count_digits(exponent_end);
        if exponent_digits > 0 {
            end = exponent_end + exponent_digits;
        }
    }
    value[..end].parse::<f64>().ok()
}

/// First non-empty value among `species_fields`, otherwise the placeholder.
pub fn resolve_species<S: AsRef<str>>(
    record: &OccurrenceRecord,
    species_fields: &[S],
    placeholder: &str,
) -> String {
    species_fields
        .iter()
        .find_map(|field| record.get(field.as_ref()))
        .unwrap_or(placeholder)
        .to_string()
}
