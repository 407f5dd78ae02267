//! Charts module - Static chart rendering

mod renderer;

pub use renderer::{
    palette_color, ChartError, ChartRenderer, ATTACK_VECTORS_FILE, DAILY_ATTACKS_FILE,
    GEO_SCATTER_FILE, HOST_TYPE_FILE, PALETTE,
};
