use crate::core::constants::{MARKER_ICON_ANCHOR, MARKER_ICON_SIZE};
use crate::core::geo::{MapCoord, Point};
use crate::core::viewport::Viewport;
use serde::{Deserialize, Serialize};

/// One annotation on the map: a position and the popup label shown when the
/// marker is activated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerEntry {
    pub position: MapCoord,
    pub label: String,
}

impl MarkerEntry {
    pub fn new(position: MapCoord, label: impl Into<String>) -> Self {
        Self {
            position,
            label: label.into(),
        }
    }
}

/// A placed marker with its popup visibility
#[derive(Debug, Clone)]
pub struct Marker {
    entry: MarkerEntry,
    popup_open: bool,
}

impl Marker {
    fn new(entry: MarkerEntry) -> Self {
        Self {
            entry,
            popup_open: false,
        }
    }

    pub fn position(&self) -> MapCoord {
        self.entry.position
    }

    pub fn label(&self) -> &str {
        &self.entry.label
    }

    pub fn is_popup_open(&self) -> bool {
        self.popup_open
    }

    /// Screen rectangle of the icon as (top-left, bottom-right), honoring the
    /// icon anchor
    pub fn icon_rect(&self, viewport: &Viewport) -> (Point, Point) {
        let anchor = viewport.coord_to_screen(&self.entry.position);
        let (w, h) = MARKER_ICON_SIZE;
        let (ax, ay) = MARKER_ICON_ANCHOR;
        let min = Point::new(anchor.x - ax as f64, anchor.y - ay as f64);
        let max = Point::new(min.x + w as f64, min.y + h as f64);
        (min, max)
    }

    fn hit(&self, viewport: &Viewport, screen: &Point) -> bool {
        let (min, max) = self.icon_rect(viewport);
        screen.x >= min.x && screen.x <= max.x && screen.y >= min.y && screen.y <= max.y
    }
}

/// A fixed set of markers built once from static entries.
///
/// Purely declarative: N entries produce N markers, nothing is added or
/// removed afterwards. At most one popup is open at a time; clicking a marker
/// toggles its own popup and closes any other.
pub struct MarkerLayer {
    markers: Vec<Marker>,
}

impl MarkerLayer {
    pub fn new(entries: Vec<MarkerEntry>) -> Self {
        Self {
            markers: entries.into_iter().map(Marker::new).collect(),
        }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Index of the topmost marker whose icon contains the screen point
    pub fn hit_test(&self, viewport: &Viewport, screen: &Point) -> Option<usize> {
        self.markers
            .iter()
            .rposition(|marker| marker.hit(viewport, screen))
    }

    /// Routes a click: toggles the hit marker's popup (closing any other) and
    /// reports whether a marker consumed the click.
    pub fn handle_click(&mut self, viewport: &Viewport, screen: &Point) -> bool {
        let Some(hit) = self.hit_test(viewport, screen) else {
            return false;
        };
        let was_open = self.markers[hit].popup_open;
        for marker in &mut self.markers {
            marker.popup_open = false;
        }
        self.markers[hit].popup_open = !was_open;
        log::debug!(
            "marker '{}' popup {}",
            self.markers[hit].entry.label,
            if self.markers[hit].popup_open {
                "opened"
            } else {
                "closed"
            }
        );
        true
    }

    /// Closes whichever popup is open
    pub fn close_popups(&mut self) {
        for marker in &mut self.markers {
            marker.popup_open = false;
        }
    }

    /// The marker whose popup is currently open, if any
    pub fn open_popup(&self) -> Option<&Marker> {
        self.markers.iter().find(|m| m.popup_open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_viewport() -> Viewport {
        let mut viewport = Viewport::new(MapCoord::new(-293.065, 362.401), 2.0);
        viewport.set_size(Point::new(800.0, 600.0));
        viewport
    }

    fn entries() -> Vec<MarkerEntry> {
        vec![
            MarkerEntry::new(MapCoord::new(-300.065, 340.401), "Some location"),
            MarkerEntry::new(MapCoord::new(-250.065, 330.0), "Another location"),
        ]
    }

    #[test]
    fn test_n_entries_produce_n_markers() {
        let layer = MarkerLayer::new(entries());
        assert_eq!(layer.len(), 2);
        assert_eq!(layer.markers()[0].position(), MapCoord::new(-300.065, 340.401));
        assert_eq!(layer.markers()[1].label(), "Another location");
    }

    #[test]
    fn test_click_opens_only_its_own_popup() {
        let viewport = ready_viewport();
        let mut layer = MarkerLayer::new(entries());

        let first = viewport.coord_to_screen(&layer.markers()[0].position());
        assert!(layer.handle_click(&viewport, &first));
        assert!(layer.markers()[0].is_popup_open());
        assert!(!layer.markers()[1].is_popup_open());
    }

    #[test]
    fn test_click_toggles_and_switches_popups() {
        let viewport = ready_viewport();
        let mut layer = MarkerLayer::new(entries());

        let first = viewport.coord_to_screen(&layer.markers()[0].position());
        let second = viewport.coord_to_screen(&layer.markers()[1].position());

        layer.handle_click(&viewport, &first);
        layer.handle_click(&viewport, &second);
        assert!(!layer.markers()[0].is_popup_open());
        assert!(layer.markers()[1].is_popup_open());

        // Clicking the open marker again closes it.
        layer.handle_click(&viewport, &second);
        assert!(layer.open_popup().is_none());
    }

    #[test]
    fn test_click_outside_hits_nothing() {
        let viewport = ready_viewport();
        let mut layer = MarkerLayer::new(entries());
        assert!(!layer.handle_click(&viewport, &Point::new(5.0, 5.0)));
        assert!(layer.open_popup().is_none());
    }

    #[test]
    fn test_entries_deserialize_from_json() {
        let json = r#"[
            { "position": { "lat": -300.065, "lng": 340.401 }, "label": "Some location" },
            { "position": { "lat": -250.065, "lng": 330.0 }, "label": "Another location" }
        ]"#;
        let parsed: Vec<MarkerEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, entries());
    }
}
