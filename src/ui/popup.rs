use crate::core::constants::{MARKER_ICON_ANCHOR, MARKER_POPUP_ANCHOR};
use crate::core::viewport::Viewport;
use crate::layers::marker::Marker;
use crate::ui::style::PopupStyle;
use egui::{Pos2, Rect, Ui, Vec2};

/// Renders the open marker popup as a bubble anchored above its icon.
pub struct PopupRenderer {
    style: PopupStyle,
}

impl PopupRenderer {
    pub fn new() -> Self {
        Self {
            style: PopupStyle::default(),
        }
    }

    /// Screen position the popup points at: the marker anchor shifted by the
    /// popup anchor offset.
    fn anchor_pos(marker: &Marker, viewport: &Viewport, map_origin: Pos2) -> Pos2 {
        let screen = viewport.coord_to_screen(&marker.position());
        let (_, ay) = MARKER_ICON_ANCHOR;
        let (px, py) = MARKER_POPUP_ANCHOR;
        Pos2::new(
            map_origin.x + screen.x as f32 + px as f32,
            map_origin.y + screen.y as f32 - ay as f32 + py as f32,
        )
    }

    pub fn show(&self, ui: &mut Ui, marker: &Marker, viewport: &Viewport, map_origin: Pos2) {
        let anchor = Self::anchor_pos(marker, viewport, map_origin);

        let galley = ui.fonts(|f| {
            f.layout(
                marker.label().to_string(),
                self.style.font_id.clone(),
                self.style.text_color,
                self.style.max_width,
            )
        });

        let padding = self.style.padding;
        let size = galley.size() + Vec2::splat(padding * 2.0);
        let rect = Rect::from_min_size(
            Pos2::new(anchor.x - size.x / 2.0, anchor.y - size.y - 6.0),
            size,
        );

        let painter = ui.painter();
        painter.rect_filled(rect, self.style.rounding, self.style.background_color);
        painter.rect_stroke(
            rect,
            self.style.rounding,
            (self.style.border_width, self.style.border_color),
        );

        // Pointer nib under the bubble
        let nib = [
            Pos2::new(anchor.x - 6.0, rect.max.y),
            Pos2::new(anchor.x + 6.0, rect.max.y),
            Pos2::new(anchor.x, rect.max.y + 6.0),
        ];
        painter.add(egui::Shape::convex_polygon(
            nib.to_vec(),
            self.style.background_color,
            egui::Stroke::NONE,
        ));

        painter.galley(rect.min + Vec2::splat(padding), galley, self.style.text_color);
    }
}

impl Default for PopupRenderer {
    fn default() -> Self {
        Self::new()
    }
}
