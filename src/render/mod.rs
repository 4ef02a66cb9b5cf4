pub mod palette;
pub mod renderer;

pub use palette::{Palette, PaletteConfig, RenderConfig};
pub use renderer::Renderer;
