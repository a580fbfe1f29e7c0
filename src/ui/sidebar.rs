use crate::core::constants::{SIDEBAR_TRANSITION_SECS, SIDEBAR_WIDTH};
use crate::ui::style::SidebarStyle;
use egui::{Align2, Color32, FontId, Id, Order, Pos2, Rect, Sense, Stroke, Ui, Vec2};

/// The two observable states of the sidebar overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidebarState {
    #[default]
    Closed,
    Open,
}

/// Named input events driving the sidebar state machine.
///
/// `Dismiss` is the external close signal (backdrop click); it is a distinct
/// event rather than a side effect of event bubbling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarEvent {
    Open,
    Close,
    Dismiss,
}

impl SidebarState {
    /// Applies one input event, returning the next state. Unmatched
    /// event/state pairs leave the state unchanged.
    pub fn transition(self, event: SidebarEvent) -> SidebarState {
        match (self, event) {
            (SidebarState::Closed, SidebarEvent::Open) => SidebarState::Open,
            (SidebarState::Open, SidebarEvent::Close) => SidebarState::Closed,
            (SidebarState::Open, SidebarEvent::Dismiss) => SidebarState::Closed,
            (state, _) => state,
        }
    }
}

/// The slide-out sidebar: a menu button, a dimming backdrop and a panel that
/// slides in from the left.
///
/// Enter and exit are animated over the transition duration; the animation is
/// purely presentational and the state machine never exposes an intermediate
/// state.
pub struct Sidebar {
    state: SidebarState,
    title: String,
    style: SidebarStyle,
}

impl Sidebar {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            state: SidebarState::Closed,
            title: title.into(),
            style: SidebarStyle::default(),
        }
    }

    pub fn state(&self) -> SidebarState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SidebarState::Open
    }

    /// Feeds one event through the state machine
    pub fn handle(&mut self, event: SidebarEvent) {
        let next = self.state.transition(event);
        if next != self.state {
            log::debug!("sidebar {:?} -> {:?} on {:?}", self.state, next, event);
            self.state = next;
        }
    }

    /// Draws the floating menu button; activating it opens the sidebar.
    pub fn show_menu_button(&mut self, ctx: &egui::Context) {
        egui::Area::new(Id::new("sidebar_menu_button"))
            .order(Order::Foreground)
            .fixed_pos(Pos2::new(8.0, 8.0))
            .show(ctx, |ui| {
                let rect = Rect::from_min_size(ui.next_widget_position(), Vec2::splat(44.0));
                let response = ui.allocate_rect(rect, Sense::click());

                let bg = if response.hovered() {
                    Color32::from_gray(245)
                } else {
                    Color32::WHITE
                };
                ui.painter().rect_filled(rect, self.style.rounding, bg);
                Self::paint_menu_glyph(ui, rect);

                if response.clicked() {
                    self.handle(SidebarEvent::Open);
                }
            });
    }

    /// Draws the backdrop and the sliding panel. A click on the backdrop
    /// dismisses, the close button closes.
    pub fn show_overlay(&mut self, ctx: &egui::Context) {
        let progress = ctx.animate_bool_with_time(
            Id::new("sidebar_transition"),
            self.is_open(),
            SIDEBAR_TRANSITION_SECS,
        );
        if progress <= 0.0 {
            return;
        }

        let screen = ctx.screen_rect();

        egui::Area::new(Id::new("sidebar_backdrop"))
            .order(Order::Foreground)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                // Linear fade, mirroring the panel's slide duration.
                let alpha = (self.style.backdrop_color.a() as f32 * progress) as u8;
                let color = Color32::from_rgba_unmultiplied(
                    self.style.backdrop_color.r(),
                    self.style.backdrop_color.g(),
                    self.style.backdrop_color.b(),
                    alpha,
                );
                ui.painter().rect_filled(screen, 0.0, color);

                let response = ui.allocate_rect(screen, Sense::click());
                if response.clicked() {
                    self.handle(SidebarEvent::Dismiss);
                }
            });

        let panel_x = -SIDEBAR_WIDTH * (1.0 - progress);
        egui::Area::new(Id::new("sidebar_panel"))
            .order(Order::Tooltip)
            .fixed_pos(Pos2::new(panel_x, 0.0))
            .show(ctx, |ui| {
                let rect = Rect::from_min_size(
                    Pos2::new(panel_x, 0.0),
                    Vec2::new(SIDEBAR_WIDTH, screen.height()),
                );
                ui.painter()
                    .rect_filled(rect, self.style.rounding, self.style.panel_color);

                // Swallow clicks so they never reach the backdrop.
                ui.allocate_rect(rect, Sense::click());

                let padding = self.style.padding;
                let header = Rect::from_min_size(
                    rect.min + Vec2::splat(padding),
                    Vec2::new(SIDEBAR_WIDTH - padding * 2.0, 24.0),
                );
                ui.painter().text(
                    header.left_center(),
                    Align2::LEFT_CENTER,
                    &self.title,
                    FontId::proportional(18.0),
                    self.style.title_color,
                );

                let close_rect =
                    Rect::from_min_size(Pos2::new(header.max.x - 20.0, header.min.y), Vec2::splat(20.0));
                let close = ui.allocate_rect(close_rect, Sense::click());
                Self::paint_close_glyph(ui, close_rect);
                if close.clicked() {
                    self.handle(SidebarEvent::Close);
                }

                let rule_y = header.max.y + padding / 2.0;
                ui.painter().hline(
                    rect.min.x + padding..=rect.max.x - padding,
                    rule_y,
                    Stroke::new(1.0, Color32::from_gray(220)),
                );
            });
    }

    fn paint_menu_glyph(ui: &Ui, rect: Rect) {
        let stroke = Stroke::new(2.0, Color32::from_gray(50));
        let inset = 12.0;
        for i in 0..3 {
            let y = rect.min.y + inset + i as f32 * (rect.height() - inset * 2.0) / 2.0;
            ui.painter()
                .hline(rect.min.x + inset..=rect.max.x - inset, y, stroke);
        }
    }

    fn paint_close_glyph(ui: &Ui, rect: Rect) {
        let stroke = Stroke::new(2.0, Color32::from_gray(50));
        let r = rect.shrink(4.0);
        ui.painter().line_segment([r.min, r.max], stroke);
        ui.painter()
            .line_segment([Pos2::new(r.min.x, r.max.y), Pos2::new(r.max.x, r.min.y)], stroke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_closed() {
        let sidebar = Sidebar::new("Cartographe");
        assert_eq!(sidebar.state(), SidebarState::Closed);
        assert!(!sidebar.is_open());
    }

    #[test]
    fn test_menu_opens_and_close_closes() {
        let mut sidebar = Sidebar::new("Cartographe");
        sidebar.handle(SidebarEvent::Open);
        assert_eq!(sidebar.state(), SidebarState::Open);
        sidebar.handle(SidebarEvent::Close);
        assert_eq!(sidebar.state(), SidebarState::Closed);
    }

    #[test]
    fn test_dismiss_closes_from_open() {
        let mut sidebar = Sidebar::new("Cartographe");
        sidebar.handle(SidebarEvent::Open);
        sidebar.handle(SidebarEvent::Dismiss);
        assert_eq!(sidebar.state(), SidebarState::Closed);
    }

    #[test]
    fn test_unmatched_events_leave_state_unchanged() {
        let mut sidebar = Sidebar::new("Cartographe");
        sidebar.handle(SidebarEvent::Close);
        sidebar.handle(SidebarEvent::Dismiss);
        assert_eq!(sidebar.state(), SidebarState::Closed);

        sidebar.handle(SidebarEvent::Open);
        sidebar.handle(SidebarEvent::Open);
        assert_eq!(sidebar.state(), SidebarState::Open);
    }

    #[test]
    fn test_repeated_toggles_never_leave_intermediate_state() {
        let mut sidebar = Sidebar::new("Cartographe");
        for _ in 0..10 {
            sidebar.handle(SidebarEvent::Open);
            assert_eq!(sidebar.state(), SidebarState::Open);
            sidebar.handle(SidebarEvent::Close);
            assert_eq!(sidebar.state(), SidebarState::Closed);
        }
    }
}
