use crate::core::constants::TILE_SIZE;
use crate::core::geo::{CoordBounds, MapCoord, Point, TileCoord};
use serde::{Deserialize, Serialize};

/// Projection between raw pixel space and the map's coordinate reference
/// system.
///
/// Implementations are passed explicitly to whatever needs them (the bounds
/// resolver, the viewport) rather than looked up from ambient context.
pub trait Projector {
    /// Projects a map coordinate to pixel coordinates at the given zoom level.
    fn project(&self, coord: &MapCoord, zoom: f64) -> Point;

    /// Unprojects pixel coordinates back to a map coordinate at the given
    /// zoom level.
    fn unproject(&self, pixel: &Point, zoom: f64) -> MapCoord;
}

/// The simple planar CRS used for flat imagery.
///
/// Scale doubles per zoom level (`scale = 2^zoom`) and the vertical axis is
/// flipped so that pixel rows grow downward while latitudes grow upward:
/// `lng = x / scale`, `lat = -y / scale`. At maximum zoom one map unit is one
/// raw image pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimpleCrs;

impl SimpleCrs {
    /// Pixels per map unit at the given zoom level
    pub fn scale(zoom: f64) -> f64 {
        2_f64.powf(zoom)
    }
}

impl Projector for SimpleCrs {
    fn project(&self, coord: &MapCoord, zoom: f64) -> Point {
        let scale = Self::scale(zoom);
        Point::new(coord.lng * scale, -coord.lat * scale)
    }

    fn unproject(&self, pixel: &Point, zoom: f64) -> MapCoord {
        let scale = Self::scale(zoom);
        MapCoord::new(-pixel.y / scale, pixel.x / scale)
    }
}

/// Computes the region of the map a tile covers, by unprojecting its pixel
/// corners at the tile's own zoom level.
pub fn tile_bounds(projector: &dyn Projector, coord: &TileCoord) -> CoordBounds {
    let size = TILE_SIZE as f64;
    let zoom = coord.z as f64;
    let nw_px = Point::new(coord.x as f64 * size, coord.y as f64 * size);
    let se_px = Point::new((coord.x + 1) as f64 * size, (coord.y + 1) as f64 * size);

    let nw = projector.unproject(&nw_px, zoom);
    let se = projector.unproject(&se_px, zoom);

    CoordBounds::new(MapCoord::new(se.lat, nw.lng), MapCoord::new(nw.lat, se.lng))
}
