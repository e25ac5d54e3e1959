//! Location intake: form validation, parsing, and the startup seed list

use thiserror::Error;
use tracing::warn;

use crate::geo::GeoLocation;

/// Error raised by a rejected form submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IntakeError {
    /// At least one field was left empty
    #[error("Please fill in all fields!")]
    IncompleteForm,
}

/// In-progress contents of the location form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationForm {
    pub latitude: String,
    pub longitude: String,
    pub name: String,
}

impl LocationForm {
    /// True when every field has at least one character.
    ///
    /// Emptiness is the only criterion; whitespace-only input counts as
    /// filled, and numeric validity is not checked here at all.
    pub fn is_complete(&self) -> bool {
        !self.latitude.is_empty() && !self.longitude.is_empty() && !self.name.is_empty()
    }

    /// Validate and convert the form into a location.
    ///
    /// A malformed coordinate does not fail the submission; it becomes NaN
    /// and flows through the projection math unchanged, which downstream
    /// passes must tolerate.
    pub fn submit(&self) -> Result<GeoLocation, IntakeError> {
        if !self.is_complete() {
            return Err(IntakeError::IncompleteForm);
        }
        Ok(GeoLocation::new(
            parse_coordinate(&self.latitude),
            parse_coordinate(&self.longitude),
            self.name.clone(),
        ))
    }

    /// Reset all fields to empty
    pub fn clear(&mut self) {
        self.latitude.clear();
        self.longitude.clear();
        self.name.clear();
    }
}

fn parse_coordinate(raw: &str) -> f64 {
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(raw, "coordinate is not numeric, using NaN");
            f64::NAN
        }
    }
}

/// Locations registered at startup, in registration order
pub fn seed_locations() -> Vec<GeoLocation> {
    vec![
        GeoLocation::new(55.755864, 37.617698, "Moscow"),
        GeoLocation::new(-37.813747, 144.963033, "Melbourne"),
        GeoLocation::new(39.901850, 116.391441, "Beijing"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(latitude: &str, longitude: &str, name: &str) -> LocationForm {
        LocationForm {
            latitude: latitude.to_string(),
            longitude: longitude.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_complete_form_submits() {
        let location = form("55.755864", "37.617698", "Moscow").submit().unwrap();
        assert_eq!(location.latitude, 55.755864);
        assert_eq!(location.longitude, 37.617698);
        assert_eq!(location.name, "Moscow");
    }

    #[test]
    fn test_any_empty_field_is_rejected() {
        assert_eq!(
            form("", "37.6", "Moscow").submit(),
            Err(IntakeError::IncompleteForm)
        );
        assert_eq!(
            form("55.7", "", "Moscow").submit(),
            Err(IntakeError::IncompleteForm)
        );
        assert_eq!(
            form("55.7", "37.6", "").submit(),
            Err(IntakeError::IncompleteForm)
        );
    }

    #[test]
    fn test_whitespace_counts_as_filled() {
        // Only emptiness is validated; a blank-but-nonempty name passes.
        let location = form("1.0", "2.0", " ").submit().unwrap();
        assert_eq!(location.name, " ");
    }

    #[test]
    fn test_malformed_coordinate_becomes_nan() {
        let location = form("north", "37.6", "Somewhere").submit().unwrap();
        assert!(location.latitude.is_nan());
        assert_eq!(location.longitude, 37.6);
    }

    #[test]
    fn test_surrounding_whitespace_is_accepted() {
        let location = form(" 55.7 ", "\t37.6", "Moscow").submit().unwrap();
        assert_eq!(location.latitude, 55.7);
        assert_eq!(location.longitude, 37.6);
    }

    #[test]
    fn test_clear_empties_all_fields() {
        let mut f = form("1", "2", "x");
        f.clear();
        assert_eq!(f, LocationForm::default());
        assert!(!f.is_complete());
    }

    #[test]
    fn test_seed_list_order() {
        let seeds = seed_locations();
        let names: Vec<&str> = seeds.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Moscow", "Melbourne", "Beijing"]);
    }
}
