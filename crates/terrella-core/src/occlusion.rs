//! Occlusion decision for anchors against the globe surface

/// One ray intersection from the per-marker scene cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Whether the intersected mesh is the globe surface itself
    pub globe: bool,
    /// Distance from the camera along the ray
    pub distance: f64,
}

/// Per-marker visibility verdict for the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occlusion {
    Visible,
    Hidden,
}

/// Decide whether the globe surface blocks the camera's view of an anchor.
///
/// `hits` is the full intersection list for the ray through the anchor's
/// screen position, ordered by ascending distance from the camera. Only the
/// first globe-surface hit matters; the atmosphere shell, marker stems, and
/// any other content never occlude. The comparison is strict, so an anchor
/// exactly on the intersected surface stays visible.
pub fn resolve(hits: &[SurfaceHit], anchor_distance: f64) -> Occlusion {
    let Some(globe_hit) = hits.iter().find(|hit| hit.globe) else {
        return Occlusion::Visible;
    };
    if globe_hit.distance < anchor_distance {
        Occlusion::Hidden
    } else {
        Occlusion::Visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn globe(distance: f64) -> SurfaceHit {
        SurfaceHit {
            globe: true,
            distance,
        }
    }

    fn other(distance: f64) -> SurfaceHit {
        SurfaceHit {
            globe: false,
            distance,
        }
    }

    #[test]
    fn test_no_intersections_is_visible() {
        assert_eq!(resolve(&[], 5.0), Occlusion::Visible);
    }

    #[test]
    fn test_non_globe_intersections_never_occlude() {
        // Atmosphere shell and stems sit closer than the anchor but are ignored.
        assert_eq!(resolve(&[other(1.0), other(2.0)], 5.0), Occlusion::Visible);
    }

    #[test]
    fn test_globe_closer_than_anchor_hides() {
        assert_eq!(resolve(&[globe(3.0)], 5.0), Occlusion::Hidden);
    }

    #[test]
    fn test_globe_behind_anchor_stays_visible() {
        assert_eq!(resolve(&[globe(8.0)], 5.0), Occlusion::Visible);
    }

    #[test]
    fn test_equal_distance_is_visible() {
        assert_eq!(resolve(&[globe(5.0)], 5.0), Occlusion::Visible);
    }

    #[test]
    fn test_first_globe_hit_wins() {
        // Near-side and far-side surface hits; only the first decides.
        let hits = [other(0.9), globe(3.0), globe(7.0)];
        assert_eq!(resolve(&hits, 5.0), Occlusion::Hidden);
    }

    #[test]
    fn test_nan_anchor_distance_is_visible() {
        // A degenerate anchor fails the strict comparison and stays visible.
        assert_eq!(resolve(&[globe(3.0)], f64::NAN), Occlusion::Visible);
    }
}
