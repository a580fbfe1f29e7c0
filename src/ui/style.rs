use egui::{Color32, FontId, Stroke};

/// Style of the +/- zoom control buttons
#[derive(Debug, Clone)]
pub struct ZoomControlStyle {
    pub background_color: Color32,
    pub hover_color: Color32,
    pub pressed_color: Color32,
    pub border_stroke: Stroke,
    pub text_color: Color32,
    pub rounding: f32,
}

impl Default for ZoomControlStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::WHITE,
            hover_color: Color32::from_gray(240),
            pressed_color: Color32::from_gray(220),
            border_stroke: Stroke::new(1.0, Color32::from_gray(180)),
            text_color: Color32::BLACK,
            rounding: 4.0,
        }
    }
}

/// Style of the attribution line in the viewport chrome
#[derive(Debug, Clone)]
pub struct AttributionStyle {
    pub font_id: FontId,
    pub text_color: Color32,
    pub background_color: Color32,
    pub margin: f32,
}

impl Default for AttributionStyle {
    fn default() -> Self {
        Self {
            font_id: FontId::proportional(10.0),
            text_color: Color32::from_gray(60),
            background_color: Color32::from_white_alpha(200),
            margin: 4.0,
        }
    }
}

/// Style of marker popups
#[derive(Debug, Clone)]
pub struct PopupStyle {
    pub background_color: Color32,
    pub border_color: Color32,
    pub border_width: f32,
    pub rounding: f32,
    pub padding: f32,
    pub font_id: FontId,
    pub text_color: Color32,
    pub max_width: f32,
}

impl Default for PopupStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::WHITE,
            border_color: Color32::GRAY,
            border_width: 1.0,
            rounding: 4.0,
            padding: 8.0,
            font_id: FontId::proportional(12.0),
            text_color: Color32::BLACK,
            max_width: 300.0,
        }
    }
}

/// Style of the sidebar overlay
#[derive(Debug, Clone)]
pub struct SidebarStyle {
    pub panel_color: Color32,
    pub backdrop_color: Color32,
    pub title_color: Color32,
    pub rounding: f32,
    pub padding: f32,
}

impl Default for SidebarStyle {
    fn default() -> Self {
        Self {
            panel_color: Color32::WHITE,
            // gray-600 at 75% opacity, as the deployed map dims its backdrop
            backdrop_color: Color32::from_rgba_unmultiplied(75, 85, 99, 191),
            title_color: Color32::BLACK,
            rounding: 8.0,
            padding: 12.0,
        }
    }
}
