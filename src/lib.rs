//! # Cartographe
//!
//! An interactive fictional-world map viewer built on a small planar tile
//! engine. The library provides the coordinate system, bounds resolution,
//! tile and marker layers, and the egui presentation widgets; the
//! `cartographe-app` binary composes them into the full viewer.

pub mod core;
pub mod layers;
pub mod tiles;
pub mod ui;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    crs::{Projector, SimpleCrs},
    geo::{CoordBounds, MapCoord, Point, TileCoord},
    map::Map,
    resolver::{resolve_bounds, BoundsResolver, RawImageDimensions},
    viewport::Viewport,
};

pub use crate::layers::{
    marker::{MarkerEntry, MarkerLayer},
    tile::{TileLayer, TileLayerOptions},
};

pub use crate::tiles::source::{TileSource, UrlTemplateSource};

pub use crate::ui::{
    sidebar::{Sidebar, SidebarEvent, SidebarState},
    widget::MapView,
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Layer error: {0}")]
    Layer(String),
}

/// Error type alias for convenience
pub type Error = MapError;
