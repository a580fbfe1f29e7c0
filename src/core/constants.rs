//! Engine-wide constants: the raw imagery extent, the viewer's zoom window,
//! and chrome geometry taken from the deployed map. Keeping them in one place
//! makes it easier to tweak viewer-wide magic numbers.

use crate::core::geo::MapCoord;
use crate::core::resolver::RawImageDimensions;

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Full extent of the source imagery in raw pixels at maximum zoom.
pub const RAW_IMAGE_DIMENSIONS: RawImageDimensions = RawImageDimensions {
    width: 81_920,
    height: 114_688,
};

/// Deepest zoom level the tile set provides.
pub const MAX_ZOOM: f64 = 7.0;

/// Shallowest zoom level the viewer allows.
pub const MIN_ZOOM: f64 = 2.0;

/// Snap zoom levels to these quanta (1 → integer zooms).
pub const DEFAULT_ZOOM_SNAP: f64 = 1.0;

/// Programmatic +/- zoom step for the zoom control.
pub const DEFAULT_ZOOM_DELTA: f64 = 1.0;

/// Where the viewer opens.
pub const DEFAULT_CENTER: MapCoord = MapCoord {
    lat: -293.065,
    lng: 362.401,
};

/// Zoom level the viewer opens at.
pub const DEFAULT_ZOOM: f64 = 2.0;

/// Marker icon size in pixels.
pub const MARKER_ICON_SIZE: (u32, u32) = (32, 32);

/// Anchor inside the icon (hot-spot) in pixel coords.
pub const MARKER_ICON_ANCHOR: (u32, u32) = (16, 16);

/// Popup anchor relative to the icon anchor (negative Y → above the icon).
pub const MARKER_POPUP_ANCHOR: (i32, i32) = (0, -16);

/// Duration of the sidebar enter/leave transition in seconds.
pub const SIDEBAR_TRANSITION_SECS: f32 = 0.3;

/// Width of the slide-out sidebar panel in pixels.
pub const SIDEBAR_WIDTH: f32 = 320.0;
