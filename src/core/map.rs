use crate::core::constants;
use crate::core::geo::{CoordBounds, MapCoord, Point};
use crate::core::resolver::BoundsResolver;
use crate::core::viewport::Viewport;
use crate::layers::marker::{MarkerEntry, MarkerLayer};
use crate::layers::tile::{TileLayer, TileLayerOptions};

/// Top-level map composition: viewport, tile layer, marker layer and the
/// deferred bounds resolver, wired together.
///
/// The map starts without a size. The first call to `set_size` marks the
/// viewport ready, which resolves the coordinate bounds and hands them to the
/// tile layer for culling.
pub struct Map {
    viewport: Viewport,
    tile_layer: TileLayer,
    marker_layer: MarkerLayer,
    resolver: BoundsResolver,
}

impl Map {
    pub fn new(tile_options: TileLayerOptions, markers: Vec<MarkerEntry>) -> Self {
        Self {
            viewport: Viewport::new(constants::DEFAULT_CENTER, constants::DEFAULT_ZOOM),
            tile_layer: TileLayer::new(tile_options),
            marker_layer: MarkerLayer::new(markers),
            resolver: BoundsResolver::new(constants::RAW_IMAGE_DIMENSIONS),
        }
    }

    /// Updates the viewport size, resolving bounds on the first real size.
    /// Returns true when this call made the viewport ready.
    pub fn set_size(&mut self, size: Point) -> bool {
        let became_ready = self.viewport.set_size(size);
        if became_ready {
            self.notify_viewport_ready();
        }
        became_ready
    }

    /// Resolves the map bounds from the raw image dimensions and installs
    /// them as the tile layer's render bounds. Idempotent.
    pub fn notify_viewport_ready(&mut self) {
        let bounds = self
            .resolver
            .on_viewport_ready(constants::MAX_ZOOM, self.viewport.projector())
            .clone();
        self.tile_layer.set_render_bounds(Some(bounds));
    }

    /// Resolved coordinate bounds, None until the viewport has a size
    pub fn bounds(&self) -> Option<&CoordBounds> {
        self.resolver.bounds()
    }

    /// Requests downloads for the tiles the current view needs and drains
    /// whatever finished since the last frame.
    pub fn update_tiles(&mut self) -> Vec<crate::core::geo::TileCoord> {
        self.tile_layer.ensure_visible(&self.viewport);
        self.tile_layer.poll_completed()
    }

    /// Routes a click at viewport pixel coordinates. Markers take precedence;
    /// a click that hits none of them closes any open popup and falls through
    /// to the map surface.
    pub fn handle_click(&mut self, screen: Point) {
        if self.marker_layer.handle_click(&self.viewport, &screen) {
            return;
        }
        self.marker_layer.close_popups();
        let coord = self.viewport.screen_to_coord(&screen);
        self.handle_map_click(coord);
    }

    /// A click that landed on the map surface rather than any marker.
    /// Intentionally does nothing beyond logging; the coordinate is the
    /// extension point for future selection behavior.
    pub fn handle_map_click(&mut self, position: MapCoord) {
        log::debug!("map clicked at ({:.3}, {:.3})", position.lat, position.lng);
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn tile_layer(&self) -> &TileLayer {
        &self.tile_layer
    }

    pub fn tile_layer_mut(&mut self) -> &mut TileLayer {
        &mut self.tile_layer
    }

    pub fn marker_layer(&self) -> &MarkerLayer {
        &self.marker_layer
    }

    pub fn marker_layer_mut(&mut self) -> &mut MarkerLayer {
        &mut self.marker_layer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_map() -> Map {
        Map::new(
            TileLayerOptions::default(),
            vec![
                MarkerEntry::new(MapCoord::new(-300.065, 340.401), "Some location"),
                MarkerEntry::new(MapCoord::new(-250.065, 330.0), "Some location"),
            ],
        )
    }

    #[test]
    fn test_bounds_absent_before_size() {
        let map = test_map();
        assert!(map.bounds().is_none());
        assert!(!map.viewport().is_ready());
    }

    #[test]
    fn test_size_resolves_bounds_once() {
        let mut map = test_map();
        assert!(map.set_size(Point::new(800.0, 600.0)));

        let bounds = map.bounds().expect("bounds resolved").clone();
        assert_eq!(bounds.south_west, MapCoord::new(0.0, 0.0));
        assert_eq!(bounds.north_east, MapCoord::new(-896.0, 640.0));

        // Later resizes are not a second ready event.
        assert!(!map.set_size(Point::new(1024.0, 768.0)));
        assert_eq!(map.bounds().unwrap(), &bounds);
    }

    #[test]
    fn test_markers_fall_inside_resolved_bounds() {
        let mut map = test_map();
        map.set_size(Point::new(800.0, 600.0));
        let bounds = map.bounds().unwrap().clone();
        for marker in map.marker_layer().markers() {
            assert!(bounds.contains(&marker.position()));
        }
    }
}
