use crate::core::crs::Projector;
use crate::core::geo::{CoordBounds, Point};
use serde::{Deserialize, Serialize};

/// Pixel extent of the source imagery, fixed at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl RawImageDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Derives the coordinate bounds of the full imagery by unprojecting its
/// pixel corners at the given maximum zoom level.
///
/// Pure in `(dimensions, max_zoom, projector)`: the southwest slot holds
/// `unproject((0,0))` and the northeast slot `unproject((width,height))`,
/// exactly as the tile layer expects them.
pub fn resolve_bounds(
    dimensions: RawImageDimensions,
    max_zoom: f64,
    projector: &dyn Projector,
) -> CoordBounds {
    let south_west = projector.unproject(&Point::new(0.0, 0.0), max_zoom);
    let north_east = projector.unproject(
        &Point::new(dimensions.width as f64, dimensions.height as f64),
        max_zoom,
    );
    CoordBounds::new(south_west, north_east)
}

/// Viewport-scoped holder for the resolved bounds.
///
/// Resolution is deferred until the viewport-ready event: before that the
/// bounds are absent (`None`, never a sentinel) and dependents must tolerate
/// the absence by rendering unconstrained. The holder lives exactly as long
/// as the mounted viewport; a remount starts from a fresh, unresolved state.
#[derive(Debug, Clone)]
pub struct BoundsResolver {
    dimensions: RawImageDimensions,
    bounds: Option<CoordBounds>,
}

impl BoundsResolver {
    pub fn new(dimensions: RawImageDimensions) -> Self {
        Self {
            dimensions,
            bounds: None,
        }
    }

    /// The resolved bounds, or `None` while the viewport does not exist yet.
    pub fn bounds(&self) -> Option<&CoordBounds> {
        self.bounds.as_ref()
    }

    /// Runs the resolution against a live viewport's projection.
    ///
    /// Returns the bounds for convenience. Calling this again with the same
    /// zoom and projector yields an identical value.
    pub fn on_viewport_ready(&mut self, max_zoom: f64, projector: &dyn Projector) -> &CoordBounds {
        let resolved = resolve_bounds(self.dimensions, max_zoom, projector);
        log::info!(
            "resolved map bounds: SW({:.3}, {:.3}) - NE({:.3}, {:.3})",
            resolved.south_west.lat,
            resolved.south_west.lng,
            resolved.north_east.lat,
            resolved.north_east.lng
        );
        self.bounds.insert(resolved)
    }

    /// Drops the resolved state, as happens when the viewport is unmounted.
    pub fn reset(&mut self) {
        self.bounds = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{MAX_ZOOM, RAW_IMAGE_DIMENSIONS};
    use crate::core::crs::SimpleCrs;
    use crate::core::geo::MapCoord;

    #[test]
    fn test_resolve_bounds_matches_unprojected_corners() {
        let crs = SimpleCrs;
        let bounds = resolve_bounds(RAW_IMAGE_DIMENSIONS, MAX_ZOOM, &crs);

        use crate::core::crs::Projector;
        let expected_sw = crs.unproject(&Point::new(0.0, 0.0), MAX_ZOOM);
        let expected_ne = crs.unproject(&Point::new(81_920.0, 114_688.0), MAX_ZOOM);

        assert_eq!(bounds.south_west, expected_sw);
        assert_eq!(bounds.north_east, expected_ne);
        assert_eq!(bounds.north_east, MapCoord::new(-896.0, 640.0));
    }

    #[test]
    fn test_resolution_is_deferred_until_viewport_ready() {
        let mut resolver = BoundsResolver::new(RAW_IMAGE_DIMENSIONS);
        assert!(resolver.bounds().is_none());

        resolver.on_viewport_ready(MAX_ZOOM, &SimpleCrs);
        assert!(resolver.bounds().is_some());
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mut resolver = BoundsResolver::new(RAW_IMAGE_DIMENSIONS);
        let first = resolver.on_viewport_ready(MAX_ZOOM, &SimpleCrs).clone();
        let second = resolver.on_viewport_ready(MAX_ZOOM, &SimpleCrs).clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_reset_discards_bounds() {
        let mut resolver = BoundsResolver::new(RAW_IMAGE_DIMENSIONS);
        resolver.on_viewport_ready(MAX_ZOOM, &SimpleCrs);
        resolver.reset();
        assert!(resolver.bounds().is_none());
    }

    #[test]
    fn test_bounds_scale_with_max_zoom() {
        let dims = RawImageDimensions::new(512, 512);
        let at_one = resolve_bounds(dims, 1.0, &SimpleCrs);
        let at_two = resolve_bounds(dims, 2.0, &SimpleCrs);
        assert_eq!(at_one.north_east, MapCoord::new(-256.0, 256.0));
        assert_eq!(at_two.north_east, MapCoord::new(-128.0, 128.0));
    }
}
