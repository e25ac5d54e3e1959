//! Screen-space placement of marker overlays

/// Convert a normalized-device-coordinate position into pixel offsets from
/// the viewport center.
///
/// NDC x and y are each in [-1, 1]. The y offset is negated because NDC up
/// is screen up while pixel coordinates grow downward. The overlay element
/// is pre-centered, so this offset is the only translation it needs.
pub fn screen_offset(ndc_x: f64, ndc_y: f64, viewport_width: f64, viewport_height: f64) -> [f64; 2] {
    [
        ndc_x * viewport_width * 0.5,
        -ndc_y * viewport_height * 0.5,
    ]
}
