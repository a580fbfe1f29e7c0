//! End-to-end scenarios at the library surface: the deferred bounds
//! lifecycle, marker behavior and the sidebar state machine.

use cartographe::{
    constants, Map, MapCoord, MarkerEntry, Point, Projector, Sidebar, SidebarEvent, SidebarState,
    SimpleCrs, TileLayerOptions,
};

fn world_map() -> Map {
    let options = TileLayerOptions {
        url_template: "https://tiles.example/{z}/{x}/{y}.jpg".to_string(),
        attribution: Some("Test imagery".to_string()),
        ..Default::default()
    };
    let markers = vec![
        MarkerEntry::new(MapCoord::new(-300.065, 340.401), "Some location"),
        MarkerEntry::new(MapCoord::new(-250.065, 330.0), "Some location"),
    ];
    Map::new(options, markers)
}

#[test]
fn test_bounds_deferred_until_first_layout() {
    let mut map = world_map();

    // Before any layout pass there is no size, hence no bounds and nothing
    // constraining the tile layer.
    assert!(!map.viewport().is_ready());
    assert!(map.bounds().is_none());
    assert!(map.tile_layer().render_bounds().is_none());
    assert!(map.tile_layer().visible_tiles(map.viewport()).is_empty());

    // The first layout resolves bounds and installs them for tile culling.
    assert!(map.set_size(Point::new(800.0, 600.0)));
    let bounds = map.bounds().expect("bounds after layout").clone();
    assert_eq!(map.tile_layer().render_bounds(), Some(&bounds));
    assert!(!map.tile_layer().visible_tiles(map.viewport()).is_empty());
}

#[test]
fn test_resolved_bounds_are_unprojected_image_corners() {
    let mut map = world_map();
    map.set_size(Point::new(1024.0, 768.0));

    let bounds = map.bounds().unwrap();
    let crs = SimpleCrs;
    let dims = constants::RAW_IMAGE_DIMENSIONS;

    let sw = crs.unproject(&Point::new(0.0, 0.0), constants::MAX_ZOOM);
    let ne = crs.unproject(
        &Point::new(dims.width as f64, dims.height as f64),
        constants::MAX_ZOOM,
    );
    assert_eq!(bounds.south_west, sw);
    assert_eq!(bounds.north_east, ne);
    assert_eq!(bounds.north_east, MapCoord::new(-896.0, 640.0));
}

#[test]
fn test_resolving_twice_yields_identical_bounds() {
    let mut map = world_map();
    map.set_size(Point::new(800.0, 600.0));
    let first = map.bounds().unwrap().clone();

    map.notify_viewport_ready();
    assert_eq!(map.bounds().unwrap(), &first);
}

#[test]
fn test_default_view_matches_initial_configuration() {
    let map = world_map();
    let viewport = map.viewport();
    assert_eq!(viewport.center, constants::DEFAULT_CENTER);
    assert_eq!(viewport.zoom, constants::DEFAULT_ZOOM);
    assert_eq!(viewport.min_zoom, constants::MIN_ZOOM);
    assert_eq!(viewport.max_zoom, constants::MAX_ZOOM);
}

#[test]
fn test_every_entry_becomes_a_marker_and_clicks_route_to_them() {
    let mut map = world_map();
    map.set_size(Point::new(800.0, 600.0));
    assert_eq!(map.marker_layer().len(), 2);

    // Clicking directly on the first marker opens its popup.
    let screen = map
        .viewport()
        .coord_to_screen(&MapCoord::new(-300.065, 340.401));
    map.handle_click(screen);
    let open = map.marker_layer().open_popup().expect("popup open");
    assert_eq!(open.position(), MapCoord::new(-300.065, 340.401));

    // A click far from any marker closes the popup.
    map.handle_click(Point::new(10.0, 10.0));
    assert!(map.marker_layer().open_popup().is_none());

    // Toggling works: open, then a second click on the same marker closes.
    map.handle_click(screen);
    assert!(map.marker_layer().open_popup().is_some());
    map.handle_click(screen);
    assert!(map.marker_layer().open_popup().is_none());
}

#[test]
fn test_sidebar_lifecycle() {
    let mut sidebar = Sidebar::new("Cartographe");
    assert_eq!(sidebar.state(), SidebarState::Closed);

    sidebar.handle(SidebarEvent::Open);
    assert!(sidebar.is_open());

    sidebar.handle(SidebarEvent::Dismiss);
    assert_eq!(sidebar.state(), SidebarState::Closed);

    sidebar.handle(SidebarEvent::Open);
    sidebar.handle(SidebarEvent::Close);
    assert_eq!(sidebar.state(), SidebarState::Closed);
}
