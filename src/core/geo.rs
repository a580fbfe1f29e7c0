use serde::{Deserialize, Serialize};

/// A coordinate in the map's planar reference system.
///
/// The axes follow the web-map convention for flat imagery: `lng` grows to
/// the right, `lat` grows upward, so coordinates inside the imagery have
/// non-positive latitudes. There is no geographic curvature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapCoord {
    pub lat: f64,
    pub lng: f64,
}

impl MapCoord {
    /// Creates a new planar coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that both components are finite
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Straight-line distance to another coordinate, in map units
    pub fn distance_to(&self, other: &MapCoord) -> f64 {
        let dlat = other.lat - self.lat;
        let dlng = other.lng - self.lng;
        (dlat * dlat + dlng * dlng).sqrt()
    }
}

impl Default for MapCoord {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a point in screen or raw-image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    pub fn floor(&self) -> Point {
        Point::new(self.x.floor(), self.y.floor())
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// A rectangular region of the map given by its southwest and northeast
/// corners.
///
/// The corners are stored exactly as produced by the resolver; queries use
/// component-wise min/max so they work regardless of which corner carries the
/// smaller value on each axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordBounds {
    pub south_west: MapCoord,
    pub north_east: MapCoord,
}

impl CoordBounds {
    pub fn new(south_west: MapCoord, north_east: MapCoord) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::new(MapCoord::new(south, west), MapCoord::new(north, east))
    }

    fn lat_range(&self) -> (f64, f64) {
        let lo = self.south_west.lat.min(self.north_east.lat);
        let hi = self.south_west.lat.max(self.north_east.lat);
        (lo, hi)
    }

    fn lng_range(&self) -> (f64, f64) {
        let lo = self.south_west.lng.min(self.north_east.lng);
        let hi = self.south_west.lng.max(self.north_east.lng);
        (lo, hi)
    }

    /// Checks if the bounds contain a coordinate
    pub fn contains(&self, coord: &MapCoord) -> bool {
        let (lat_lo, lat_hi) = self.lat_range();
        let (lng_lo, lng_hi) = self.lng_range();
        coord.lat >= lat_lo && coord.lat <= lat_hi && coord.lng >= lng_lo && coord.lng <= lng_hi
    }

    /// Checks if the bounds intersect with another bounds
    pub fn intersects(&self, other: &CoordBounds) -> bool {
        let (a_lat_lo, a_lat_hi) = self.lat_range();
        let (a_lng_lo, a_lng_hi) = self.lng_range();
        let (b_lat_lo, b_lat_hi) = other.lat_range();
        let (b_lng_lo, b_lng_hi) = other.lng_range();
        !(b_lat_hi < a_lat_lo
            || b_lat_lo > a_lat_hi
            || b_lng_hi < a_lng_lo
            || b_lng_lo > a_lng_hi)
    }
}

/// A tile coordinate in the tile grid.
///
/// The planar CRS is unbounded, so indices are signed: panning past the
/// imagery yields negative or oversized indices, and it is the layer's render
/// bounds (not the grid) that decide which tiles are worth requesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: i32, y: i32, z: u8) -> Self {
        Self { x, y, z }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_coord_creation() {
        let coord = MapCoord::new(-300.065, 340.401);
        assert_eq!(coord.lat, -300.065);
        assert_eq!(coord.lng, 340.401);
        assert!(coord.is_valid());
    }

    #[test]
    fn test_map_coord_distance() {
        let a = MapCoord::new(0.0, 0.0);
        let b = MapCoord::new(-3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = CoordBounds::from_coords(-896.0, 0.0, 0.0, 640.0);
        assert!(bounds.contains(&MapCoord::new(-300.065, 340.401)));
        assert!(!bounds.contains(&MapCoord::new(-300.0, 700.0)));
        assert!(!bounds.contains(&MapCoord::new(10.0, 100.0)));
    }

    #[test]
    fn test_bounds_contains_with_inverted_corners() {
        // Corner order as produced by unprojecting (0,0) then (w,h): the
        // "southwest" slot holds the larger latitude.
        let bounds = CoordBounds::new(MapCoord::new(0.0, 0.0), MapCoord::new(-896.0, 640.0));
        assert!(bounds.contains(&MapCoord::new(-448.0, 320.0)));
        assert!(!bounds.contains(&MapCoord::new(-1000.0, 320.0)));
    }

    #[test]
    fn test_bounds_intersects() {
        let a = CoordBounds::from_coords(-100.0, 0.0, 0.0, 100.0);
        let b = CoordBounds::from_coords(-150.0, 50.0, -50.0, 150.0);
        let c = CoordBounds::from_coords(-300.0, 200.0, -200.0, 300.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_tile_coord_identity() {
        let a = TileCoord::new(-1, 4, 3);
        let b = TileCoord::new(-1, 4, 3);
        assert_eq!(a, b);
    }
}
