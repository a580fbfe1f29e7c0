use crate::ui::style::{AttributionStyle, ZoomControlStyle};
use egui::{Align2, FontId, Pos2, Rect, Response, Sense, Ui, Vec2};

/// Anchor position for chrome elements inside the map viewport
#[derive(Debug, Clone, PartialEq)]
pub enum Position {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Position {
    pub fn calculate_rect(&self, container: Rect, size: Vec2, margin: f32) -> Rect {
        let pos = match self {
            Position::TopLeft => container.min + Vec2::new(margin, margin),
            Position::TopRight => Pos2::new(container.max.x - margin - size.x, container.min.y + margin),
            Position::BottomLeft => Pos2::new(container.min.x + margin, container.max.y - margin - size.y),
            Position::BottomRight => container.max - Vec2::new(margin + size.x, margin + size.y),
        };
        Rect::from_min_size(pos, size)
    }
}

fn control_button(
    ui: &mut Ui,
    rect: Rect,
    text: &str,
    style: &ZoomControlStyle,
) -> Response {
    let response = ui.allocate_rect(rect, Sense::click());

    let bg_color = if response.is_pointer_button_down_on() {
        style.pressed_color
    } else if response.hovered() {
        style.hover_color
    } else {
        style.background_color
    };

    ui.painter().rect_filled(rect, style.rounding, bg_color);
    ui.painter()
        .rect_stroke(rect, style.rounding, style.border_stroke);
    ui.painter().text(
        rect.center(),
        Align2::CENTER_CENTER,
        text,
        FontId::proportional(16.0),
        style.text_color,
    );

    response
}

/// What the zoom control reported for this frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ZoomControlResponse {
    pub zoom_in: bool,
    pub zoom_out: bool,
}

/// The +/- zoom control, anchored bottom-right as on the deployed map
pub struct ZoomControl {
    position: Position,
    button_size: Vec2,
    margin: f32,
    style: ZoomControlStyle,
}

impl ZoomControl {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            button_size: Vec2::splat(30.0),
            margin: 10.0,
            style: ZoomControlStyle::default(),
        }
    }

    pub fn show(&self, ui: &mut Ui, container: Rect) -> ZoomControlResponse {
        let stack_size = Vec2::new(self.button_size.x, self.button_size.y * 2.0 + 5.0);
        let stack = self.position.calculate_rect(container, stack_size, self.margin);

        let in_rect = Rect::from_min_size(stack.min, self.button_size);
        let out_rect = Rect::from_min_size(
            stack.min + Vec2::new(0.0, self.button_size.y + 5.0),
            self.button_size,
        );

        ZoomControlResponse {
            zoom_in: control_button(ui, in_rect, "+", &self.style).clicked(),
            zoom_out: control_button(ui, out_rect, "\u{2212}", &self.style).clicked(),
        }
    }
}

/// The attribution line in the viewport chrome
pub struct Attribution {
    text: String,
    style: AttributionStyle,
}

impl Attribution {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: AttributionStyle::default(),
        }
    }

    pub fn show(&self, ui: &mut Ui, container: Rect) {
        let galley = ui.fonts(|f| {
            f.layout_no_wrap(
                self.text.clone(),
                self.style.font_id.clone(),
                self.style.text_color,
            )
        });

        let margin = self.style.margin;
        let size = galley.size() + Vec2::splat(margin * 2.0);
        let rect = Rect::from_min_size(
            Pos2::new(container.min.x, container.max.y - size.y),
            size,
        );

        ui.painter().rect_filled(rect, 0.0, self.style.background_color);
        ui.painter()
            .galley(rect.min + Vec2::splat(margin), galley, self.style.text_color);
    }
}
