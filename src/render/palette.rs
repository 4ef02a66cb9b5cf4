use std::str::FromStr;

use anyhow::{Result, anyhow, bail};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Drawing options; none of these affect the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Terminal columns per grid tile
    pub tile_size: u16,
    pub palette: PaletteConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            tile_size: 2,
            palette: PaletteConfig::default(),
        }
    }
}

impl RenderConfig {
    /// Board size in terminal cells (columns, rows) for a grid
    pub fn canvas_size(&self, grid_width: usize, grid_height: usize) -> (usize, usize) {
        (usize::from(self.tile_size) * grid_width, grid_height)
    }
}

/// Colour names or `#rrggbb` hex strings as written in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub tile: String,
    pub border: String,
    /// Head-to-tail gradient
    pub snake: Vec<String>,
    pub food: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            tile: "#ebedf0".to_string(),
            border: "#ffffff".to_string(),
            snake: vec![
                "#216e39".to_string(),
                "#30a14e".to_string(),
                "#40c463".to_string(),
                "#9be9a8".to_string(),
            ],
            food: "#ea4a5a".to_string(),
        }
    }
}

/// Parsed palette ready for drawing
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub tile: Color,
    pub border: Color,
    pub snake: Vec<Color>,
    pub food: Color,
}

impl Palette {
    pub fn from_config(config: &PaletteConfig) -> Result<Self> {
        if config.snake.is_empty() {
            bail!("palette needs at least one snake colour");
        }

        Ok(Self {
            tile: parse_color(&config.tile)?,
            border: parse_color(&config.border)?,
            snake: config
                .snake
                .iter()
                .map(|c| parse_color(c))
                .collect::<Result<_>>()?,
            food: parse_color(&config.food)?,
        })
    }

    /// Colour for segment `index` of a snake `length` long.
    ///
    /// Short snakes take colours one per segment; longer ones stretch the
    /// gradient evenly over the body.
    pub fn snake_color(&self, index: usize, length: usize) -> Color {
        let count = self.snake.len();
        let slot = if length <= count {
            index
        } else {
            count * index / length
        };
        self.snake[slot.min(count - 1)]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            tile: Color::Rgb(0xeb, 0xed, 0xf0),
            border: Color::Rgb(0xff, 0xff, 0xff),
            snake: vec![
                Color::Rgb(0x21, 0x6e, 0x39),
                Color::Rgb(0x30, 0xa1, 0x4e),
                Color::Rgb(0x40, 0xc4, 0x63),
                Color::Rgb(0x9b, 0xe9, 0xa8),
            ],
            food: Color::Rgb(0xea, 0x4a, 0x5a),
        }
    }
}

fn parse_color(value: &str) -> Result<Color> {
    Color::from_str(value).map_err(|_| anyhow!("unrecognised colour {value:?}"))
}
