use crate::core::geo::{Point, TileCoord};
use crate::core::map::Map;
use crate::ui::elements::{Attribution, Position, ZoomControl};
use crate::ui::popup::PopupRenderer;
use egui::{
    Color32, ColorImage, Pos2, Rect, Sense, Stroke, TextureHandle, TextureOptions, Ui, Vec2,
};
use lru::LruCache;
use std::num::NonZeroUsize;

const TILE_UV: Rect = Rect {
    min: Pos2::new(0.0, 0.0),
    max: Pos2::new(1.0, 1.0),
};

/// Decoded textures kept on the GPU, in step with the byte cache's capacity.
/// Eviction drops the `TextureHandle`, which frees the texture.
const TEXTURE_CACHE_TILES: usize = 512;

/// Retained egui widget drawing the whole map: tiles, markers, popup and the
/// viewport chrome. Owns the texture cache so decoded tiles survive across
/// frames.
pub struct MapView {
    map: Map,
    textures: LruCache<TileCoord, TextureHandle>,
    zoom_control: ZoomControl,
    attribution: Option<Attribution>,
    popup_renderer: PopupRenderer,
    background: Color32,
}

impl MapView {
    pub fn new(map: Map) -> Self {
        let attribution = map
            .tile_layer()
            .attribution()
            .map(|text| Attribution::new(text.to_string()));
        let capacity =
            NonZeroUsize::new(TEXTURE_CACHE_TILES).unwrap_or(NonZeroUsize::MIN);
        Self {
            map,
            textures: LruCache::new(capacity),
            zoom_control: ZoomControl::new(Position::BottomRight),
            attribution,
            popup_renderer: PopupRenderer::new(),
            background: Color32::from_gray(221),
        }
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut Map {
        &mut self.map
    }

    /// Draws the map into the available space and handles pan, zoom and click
    /// input for this frame.
    pub fn show(&mut self, ui: &mut Ui) -> egui::Response {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());

        self.map
            .set_size(Point::new(rect.width() as f64, rect.height() as f64));

        self.handle_input(ui, rect, &response);
        self.upload_completed_tiles(ui);

        self.draw_tiles(ui, rect);
        self.draw_markers(ui, rect);
        self.draw_popup(ui, rect);
        self.draw_chrome(ui, rect);

        if self.map.tile_layer().has_pending() {
            ui.ctx().request_repaint();
        }

        response
    }

    fn handle_input(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        if response.dragged() {
            let delta = response.drag_delta();
            if delta != Vec2::ZERO {
                self.map
                    .viewport_mut()
                    .pan(Point::new(delta.x as f64, delta.y as f64));
            }
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let step = if scroll > 0.0 { 1.0 } else { -1.0 };
                let target = self.map.viewport().zoom + step;
                let focus = response
                    .hover_pos()
                    .map(|pos| Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64));
                self.map.viewport_mut().zoom_to(target, focus);
            }
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let screen =
                    Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64);
                self.map.handle_click(screen);
            }
        }
    }

    /// Decodes tiles that finished downloading and uploads them as textures
    fn upload_completed_tiles(&mut self, ui: &Ui) {
        for coord in self.map.update_tiles() {
            let Some(bytes) = self.map.tile_layer().tile_bytes(&coord) else {
                continue;
            };
            match decode_tile(&bytes) {
                Ok(image) => {
                    let name = format!("tile_{}_{}_{}", coord.z, coord.x, coord.y);
                    let handle = ui.ctx().load_texture(name, image, TextureOptions::LINEAR);
                    self.textures.put(coord, handle);
                }
                Err(err) => {
                    log::warn!("failed to decode tile {},{} z{}: {}", coord.x, coord.y, coord.z, err);
                }
            }
        }
    }

    fn draw_tiles(&mut self, ui: &Ui, rect: Rect) {
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, self.background);

        let origin = self.map.viewport().pixel_origin();
        let tile_size = self.map.tile_layer().options().tile_size as f64;
        let visible = self.map.tile_layer().visible_tiles(self.map.viewport());

        for coord in visible {
            let Some(texture) = self.textures.get(&coord) else {
                continue;
            };
            let x = coord.x as f64 * tile_size - origin.x;
            let y = coord.y as f64 * tile_size - origin.y;
            let tile_rect = Rect::from_min_size(
                Pos2::new(rect.min.x + x as f32, rect.min.y + y as f32),
                Vec2::splat(tile_size as f32),
            );
            painter.image(texture.id(), tile_rect, TILE_UV, Color32::WHITE);
        }
    }

    fn draw_markers(&self, ui: &Ui, rect: Rect) {
        let painter = ui.painter_at(rect);
        let viewport = self.map.viewport();

        for marker in self.map.marker_layer().markers() {
            let (min, max) = marker.icon_rect(viewport);
            let icon = Rect::from_min_max(
                Pos2::new(rect.min.x + min.x as f32, rect.min.y + min.y as f32),
                Pos2::new(rect.min.x + max.x as f32, rect.min.y + max.y as f32),
            );
            if !rect.intersects(icon) {
                continue;
            }
            // Pin: a filled disc with a white ring, centered on the anchor.
            let center = icon.center();
            let radius = icon.width() * 0.35;
            painter.circle_filled(center, radius, Color32::from_rgb(37, 99, 235));
            painter.circle_stroke(center, radius, Stroke::new(2.5, Color32::WHITE));
            painter.circle_filled(center, radius * 0.3, Color32::WHITE);
        }
    }

    fn draw_popup(&self, ui: &mut Ui, rect: Rect) {
        if let Some(marker) = self.map.marker_layer().open_popup() {
            self.popup_renderer
                .show(ui, marker, self.map.viewport(), rect.min);
        }
    }

    fn draw_chrome(&mut self, ui: &mut Ui, rect: Rect) {
        if let Some(attribution) = &self.attribution {
            attribution.show(ui, rect);
        }

        let zoom = self.zoom_control.show(ui, rect);
        if zoom.zoom_in {
            let target = self.map.viewport().zoom + 1.0;
            self.map.viewport_mut().zoom_to(target, None);
        }
        if zoom.zoom_out {
            let target = self.map.viewport().zoom - 1.0;
            self.map.viewport_mut().zoom_to(target, None);
        }
    }
}

fn decode_tile(bytes: &[u8]) -> crate::Result<ColorImage> {
    let image = image::load_from_memory(bytes)?;
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(
        size,
        rgba.as_flat_samples().as_slice(),
    ))
}
