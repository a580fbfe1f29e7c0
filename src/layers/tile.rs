use crate::core::crs::tile_bounds;
use crate::core::geo::{CoordBounds, TileCoord};
use crate::core::viewport::Viewport;
use crate::tiles::{cache::TileCache, loader::TileLoader, source::UrlTemplateSource};
use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;

/// Declarative configuration of the remote tile source and its rendering
/// constraints. Produces no computed output itself; the layer consumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileLayerOptions {
    /// URL template with `{z}`, `{x}` and `{y}` placeholders
    pub url_template: String,
    /// Square tile edge in pixels
    pub tile_size: u32,
    pub min_zoom: u8,
    pub max_zoom: u8,
    /// Never repeat the map horizontally
    pub no_wrap: bool,
    /// Attribution line shown in the viewport chrome
    pub attribution: Option<String>,
    /// Renderable region; `None` means render unconstrained
    pub bounds: Option<CoordBounds>,
}

impl Default for TileLayerOptions {
    fn default() -> Self {
        Self {
            url_template: String::new(),
            tile_size: crate::core::constants::TILE_SIZE,
            min_zoom: 0,
            max_zoom: crate::core::constants::MAX_ZOOM as u8,
            no_wrap: true,
            attribution: None,
            bounds: None,
        }
    }
}

/// The pannable tile layer: enumerates the tiles covering the viewport,
/// requests the missing ones in the background and keeps completed tiles in
/// an LRU cache.
///
/// The render bounds start absent and arrive later from the bounds resolver;
/// until then enumeration is unconstrained. Missing or failed tiles stay
/// blank.
pub struct TileLayer {
    options: TileLayerOptions,
    source: UrlTemplateSource,
    cache: TileCache,
    loader: TileLoader,
    rx: Receiver<(TileCoord, crate::Result<Vec<u8>>)>,
    pending: FxHashSet<TileCoord>,
}

impl TileLayer {
    pub fn new(options: TileLayerOptions) -> Self {
        let (tx, rx) = channel();
        let source = UrlTemplateSource::new(options.url_template.clone());
        Self {
            options,
            source,
            cache: TileCache::with_default_capacity(),
            loader: TileLoader::new(tx),
            rx,
            pending: FxHashSet::default(),
        }
    }

    pub fn options(&self) -> &TileLayerOptions {
        &self.options
    }

    /// Layer configuration as JSON, for the debug surface
    pub fn options_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.options).unwrap_or(serde_json::Value::Null)
    }

    pub fn attribution(&self) -> Option<&str> {
        self.options.attribution.as_deref()
    }

    pub fn render_bounds(&self) -> Option<&CoordBounds> {
        self.options.bounds.as_ref()
    }

    /// Installs (or clears) the renderable region. Called once the bounds
    /// resolver has run against a live viewport.
    pub fn set_render_bounds(&mut self, bounds: Option<CoordBounds>) {
        match &bounds {
            Some(b) => log::info!(
                "set render bounds: SW({:.3}, {:.3}) - NE({:.3}, {:.3})",
                b.south_west.lat,
                b.south_west.lng,
                b.north_east.lat,
                b.north_east.lng
            ),
            None => log::info!("cleared render bounds"),
        }
        self.options.bounds = bounds;
    }

    /// Tiles covering the viewport at its current (clamped) zoom level,
    /// culled against the render bounds when they are present.
    pub fn visible_tiles(&self, viewport: &Viewport) -> Vec<TileCoord> {
        if !viewport.is_ready() {
            return Vec::new();
        }

        let zoom = (viewport.zoom.floor() as i32)
            .clamp(self.options.min_zoom as i32, self.options.max_zoom as i32)
            as u8;
        let tile_size = self.options.tile_size as f64;

        let origin = viewport.pixel_origin();
        let size = viewport.size();
        let x_min = (origin.x / tile_size).floor() as i32;
        let y_min = (origin.y / tile_size).floor() as i32;
        let x_max = ((origin.x + size.x) / tile_size).ceil() as i32 - 1;
        let y_max = ((origin.y + size.y) / tile_size).ceil() as i32 - 1;

        let mut coords = Vec::new();
        for y in y_min..=y_max {
            for x in x_min..=x_max {
                let x = if self.options.no_wrap {
                    x
                } else {
                    let period = 1i32 << zoom;
                    x.rem_euclid(period)
                };
                let coord = TileCoord::new(x, y, zoom);
                if self.is_within_bounds(viewport, &coord) {
                    coords.push(coord);
                }
            }
        }
        coords
    }

    /// Whether a tile intersects the render bounds; unbounded while the
    /// bounds have not been resolved yet.
    fn is_within_bounds(&self, viewport: &Viewport, coord: &TileCoord) -> bool {
        match &self.options.bounds {
            Some(bounds) => bounds.intersects(&tile_bounds(viewport.projector(), coord)),
            None => true,
        }
    }

    /// Requests every visible tile that is neither cached nor in flight.
    pub fn ensure_visible(&mut self, viewport: &Viewport) {
        for coord in self.visible_tiles(viewport) {
            if self.cache.contains(&coord) || self.pending.contains(&coord) {
                continue;
            }
            self.pending.insert(coord);
            self.loader.start_download(&self.source, coord);
        }
    }

    /// Drains finished downloads, returning the coordinates that just became
    /// available so the renderer can upload textures. Failures only clear the
    /// in-flight entry; their tiles stay blank.
    pub fn poll_completed(&mut self) -> Vec<TileCoord> {
        let mut completed = Vec::new();
        while let Ok((coord, result)) = self.rx.try_recv() {
            self.pending.remove(&coord);
            if let Ok(data) = result {
                self.cache.insert(coord, data);
                completed.push(coord);
            }
        }
        completed
    }

    /// Whether any downloads are still in flight
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Raw bytes of a tile if it has been fetched
    pub fn tile_bytes(&self, coord: &TileCoord) -> Option<Arc<Vec<u8>>> {
        self.cache.get(coord)
    }

    #[cfg(test)]
    fn inject_tile(&mut self, coord: TileCoord, data: Vec<u8>) {
        self.pending.remove(&coord);
        self.cache.insert(coord, data);
    }
}
