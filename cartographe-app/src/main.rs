use cartographe::{
    core::geo::MapCoord,
    layers::marker::MarkerEntry,
    layers::tile::TileLayerOptions,
    ui::sidebar::Sidebar,
    ui::widget::MapView,
    Map,
};

const TILE_URL: &str = "https://gw2rp-hekataios-tiles.netlify.app/1/1/{z}/{x}/{y}.jpg";
const ATTRIBUTION: &str =
    "Map data and imagery (c) ArenaNet | Additional imagery that_shaman | Data from GW2RP FR community";

/// Standalone viewer for the Cartographe world map
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Cartographe"),
        ..Default::default()
    };

    eframe::run_native(
        "cartographe-app",
        options,
        Box::new(|cc| Box::new(CartographeApp::new(cc))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start ui: {e}"))?;

    Ok(())
}

/// The main application struct
struct CartographeApp {
    map_view: MapView,
    sidebar: Sidebar,
}

impl CartographeApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let tile_options = TileLayerOptions {
            url_template: TILE_URL.to_string(),
            attribution: Some(ATTRIBUTION.to_string()),
            ..Default::default()
        };

        let markers = vec![
            MarkerEntry::new(MapCoord::new(-300.065, 340.401), "Some location"),
            MarkerEntry::new(MapCoord::new(-250.065, 330.0), "Some location"),
        ];

        let map = Map::new(tile_options, markers);
        log::info!("tile layer configured: {}", map.tile_layer().options_json());

        Self {
            map_view: MapView::new(map),
            sidebar: Sidebar::new("Cartographe"),
        }
    }
}

impl eframe::App for CartographeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.map_view.show(ui);
            });

        self.sidebar.show_menu_button(ctx);
        self.sidebar.show_overlay(ctx);
    }
}
