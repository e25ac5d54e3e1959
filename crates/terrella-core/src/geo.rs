//! Geographic anchoring on the globe surface

use serde::{Deserialize, Serialize};

/// Radius of the globe surface, in scene units
pub const GLOBE_RADIUS: f64 = 2.0;

/// A named geographic coordinate pair
///
/// Latitude is expected in [-90, 90] and longitude in [-180, 180], but
/// neither is validated; out-of-range values still project to a
/// well-defined point on the sphere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees, north positive
    pub latitude: f64,
    /// Longitude in degrees, east positive
    pub longitude: f64,
    /// Display name for the marker
    pub name: String,
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64, name: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            name: name.into(),
        }
    }
}

/// Convert spherical coordinates to Cartesian with the polar axis on +Y.
///
/// `phi` is the polar angle measured from the +Y axis, `theta` the azimuth
/// measured from +Z toward +X.
pub fn from_spherical(radius: f64, phi: f64, theta: f64) -> [f64; 3] {
    [
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
        radius * phi.sin() * theta.cos(),
    ]
}

/// Project a geographic coordinate onto a sphere of the given radius.
///
/// The anchor is expressed in the sphere's local, un-rotated frame and is
/// never recomputed after creation.
pub fn anchor_point(location: &GeoLocation, radius: f64) -> [f64; 3] {
    let phi = (90.0 - location.latitude).to_radians();
    let theta = location.longitude.to_radians();
    from_spherical(radius, phi, theta)
}
