//! Compile-time settings. The dashboard takes no flags or environment
//! variables apart from `RUST_LOG`.

/// Dataset read at startup.
pub const DATA_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/pokemondata.csv");

pub const APP_TITLE: &str = "Visualizing Pokémon Data";
pub const WINDOW_SIZE: [f32; 2] = [1200.0, 800.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [600.0, 400.0];

/// Decimal places for height/weight annotations and the correlation value.
pub const DECIMALS: usize = 3;

pub const PLOT_HEIGHT: f32 = 420.0;
pub const TYPE_FILTER_WIDTH: f32 = 180.0;
pub const SIDE_PANEL_WIDTH: f32 = 200.0;

/// Headroom above the tallest bar so its label stays inside the plot.
pub const BAR_HEADROOM: f64 = 1.12;

pub const NO_DATA_MESSAGE: &str = "No data for the current selection.";

pub const TYPE_COLOR_EXPLANATION: &str = "Each bar uses the colour the games give that type, \
so anyone who knows the series can tell the bars apart at a glance.";
