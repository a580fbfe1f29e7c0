use crate::core::constants::{DEFAULT_ZOOM_SNAP, MAX_ZOOM, MIN_ZOOM};
use crate::core::crs::{Projector, SimpleCrs};
use crate::core::geo::{MapCoord, Point};
use serde::{Deserialize, Serialize};

/// Manages the current view of the map: center, zoom, and screen dimensions.
///
/// The viewport starts without a size. It becomes ready once the host tells
/// it how many pixels it occupies; until then screen conversions are
/// meaningless and bounds resolution stays deferred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the view in map coordinates
    pub center: MapCoord,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels, absent until the first layout
    size: Option<Point>,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
    /// The planar projection this viewport runs on
    crs: SimpleCrs,
}

impl Viewport {
    /// Creates a new, not-yet-ready viewport
    pub fn new(center: MapCoord, zoom: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            size: None,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            crs: SimpleCrs,
        }
    }

    /// Whether the viewport has been laid out with a concrete pixel size
    pub fn is_ready(&self) -> bool {
        self.size.is_some()
    }

    /// The pixel size, or zero before layout
    pub fn size(&self) -> Point {
        self.size.unwrap_or_default()
    }

    /// Records the laid-out pixel size. Returns true on the transition from
    /// absent to present, i.e. the viewport-ready event.
    pub fn set_size(&mut self, size: Point) -> bool {
        let was_ready = self.is_ready();
        self.size = Some(size);
        !was_ready
    }

    /// The projection in use, as an explicit capability for collaborators
    pub fn projector(&self) -> &dyn Projector {
        &self.crs
    }

    /// Sets the center of the viewport
    pub fn set_center(&mut self, center: MapCoord) {
        self.center = center;
    }

    /// Sets the zoom level, snapping and clamping to the allowed range
    pub fn set_zoom(&mut self, zoom: f64) {
        let snapped = (zoom / DEFAULT_ZOOM_SNAP).round() * DEFAULT_ZOOM_SNAP;
        self.zoom = snapped.clamp(self.min_zoom, self.max_zoom);
    }

    /// Projects a map coordinate to world pixel coordinates at the current
    /// zoom unless another is given
    pub fn project(&self, coord: &MapCoord, zoom: Option<f64>) -> Point {
        self.crs.project(coord, zoom.unwrap_or(self.zoom))
    }

    /// Unprojects world pixel coordinates back to a map coordinate
    pub fn unproject(&self, pixel: &Point, zoom: Option<f64>) -> MapCoord {
        self.crs.unproject(pixel, zoom.unwrap_or(self.zoom))
    }

    /// World pixel position of the viewport's top-left corner
    pub fn pixel_origin(&self) -> Point {
        let center_px = self.project(&self.center, None);
        let size = self.size();
        Point::new(center_px.x - size.x / 2.0, center_px.y - size.y / 2.0)
    }

    /// Converts a map coordinate to viewport-relative pixel coordinates
    pub fn coord_to_screen(&self, coord: &MapCoord) -> Point {
        self.project(coord, None).subtract(&self.pixel_origin())
    }

    /// Converts viewport-relative pixel coordinates back to a map coordinate
    pub fn screen_to_coord(&self, pixel: &Point) -> MapCoord {
        self.unproject(&pixel.add(&self.pixel_origin()), None)
    }

    /// Pans the viewport by the given screen-pixel delta
    pub fn pan(&mut self, delta: Point) {
        let center_px = self.project(&self.center, None);
        let moved = center_px.subtract(&delta);
        self.center = self.unproject(&moved, None);
    }

    /// Zooms to a level, keeping the map coordinate under `focus` stationary
    /// on screen when one is given
    pub fn zoom_to(&mut self, zoom: f64, focus: Option<Point>) {
        let old_zoom = self.zoom;
        self.set_zoom(zoom);
        if (self.zoom - old_zoom).abs() < f64::EPSILON {
            return;
        }

        if let Some(focus_screen) = focus {
            let size = self.size();
            let focus_coord = {
                // Recompute against the old zoom: what was under the cursor?
                let old_origin = {
                    let center_px = self.project(&self.center, Some(old_zoom));
                    Point::new(center_px.x - size.x / 2.0, center_px.y - size.y / 2.0)
                };
                self.unproject(&focus_screen.add(&old_origin), Some(old_zoom))
            };
            let new_focus_screen = self.coord_to_screen(&focus_coord);
            self.pan(focus_screen.subtract(&new_focus_screen));
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(
            crate::core::constants::DEFAULT_CENTER,
            crate::core::constants::DEFAULT_ZOOM,
        )
    }
}
