mod component;
mod render;
mod scene;
mod state;
mod tooltip;

pub use component::PaletteGraphCanvas;
