//! Shared types for the sashiko compositing stages.

use serde::{Deserialize, Serialize};

/// Re-export `GrayImage` (single-channel masks) so downstream crates can
/// reference raster data without depending on `image` directly.
pub use image::GrayImage;

/// Re-export `RgbaImage` so downstream crates can reference raster data
/// without depending on `image` directly.
pub use image::RgbaImage;

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Geometry and opacity of the stamped pattern grid.
///
/// The stamper walks a grid over the base image, advancing the cursor by
/// `tile extent + base spacing + uniform(-jitter..=jitter)` on each step.
///
/// # Preconditions
///
/// Every grid step must stay positive: if
/// `tile extent + spacing - jitter <= 0` on either axis the cursor can
/// stall and the walk never terminates. This is not validated; the
/// caller owns the geometry (see [`crate::pattern::stamp`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Width each tile is resized to before stamping, in pixels.
    pub tile_width: u32,
    /// Height each tile is resized to before stamping, in pixels.
    pub tile_height: u32,

    /// Base horizontal gap between tiles, in pixels.
    pub spacing_x: i32,
    /// Base vertical gap between tiles, in pixels.
    pub spacing_y: i32,

    /// Maximum horizontal deviation from `spacing_x`, re-rolled per column.
    pub jitter_x: i32,
    /// Maximum vertical deviation from `spacing_y`, re-rolled per cell.
    pub jitter_y: i32,

    /// Tile opacity in `[0, 1]`, applied to each tile's alpha channel
    /// before rotation.
    pub alpha: f32,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            tile_width: 100,
            tile_height: 100,
            spacing_x: 50,
            spacing_y: 50,
            jitter_x: 10,
            jitter_y: 10,
            alpha: 0.5,
        }
    }
}

/// Parameters for the full three-stage mockup render.
///
/// Defaults match a decorative sock mockup: a subtle texture wash, a
/// thick white outline around the stamp image, and large, dense,
/// strongly-jittered stamps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MockupConfig {
    /// Texture opacity in `[0, 1]` for the texture stage.
    pub texture_alpha: f32,

    /// Outline thickness in pixels added around the stamp image.
    pub stroke_radius: u32,

    /// Outline color as RGBA bytes.
    pub stroke_color: [u8; 4],

    /// Grid geometry and opacity for the pattern stage.
    pub pattern: PatternConfig,
}

impl Default for MockupConfig {
    fn default() -> Self {
        Self {
            texture_alpha: 0.6,
            stroke_radius: 10,
            stroke_color: [255, 255, 255, 255],
            pattern: PatternConfig {
                tile_width: 300,
                tile_height: 300,
                spacing_x: 80,
                spacing_y: 80,
                jitter_x: 50,
                jitter_y: 50,
                alpha: 0.9,
            },
        }
    }
}
