//! sashiko-compose: masked compositing stages for stylized product
//! mockups (sans-IO).
//!
//! Three independent, stateless transforms over in-memory pixel
//! buffers:
//!
//! - [`texture::apply`] blends a darkened texture into a masked region
//!   of a base image at a fixed opacity.
//! - [`stroke::stroke`] adds an outward-expanding solid-color border
//!   around an image's alpha silhouette.
//! - [`pattern::stamp`] tiles a stamp image across a masked region in a
//!   jittered grid, each tile independently rotated.
//!
//! No transform depends on another's internals; composition happens by
//! passing buffers. [`render_mockup`] wires the standard chain:
//! texture the base, stroke the stamp image, then stamp the bordered
//! result across the textured base.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! buffers and returns new buffers. Decoding, encoding, and path
//! handling live in the `sashiko` CLI crate.
//!
//! Randomness for the pattern stage is injected by the caller, so a
//! seeded generator replays an identical layout.

pub mod blend;
pub mod pattern;
pub mod resize;
pub mod rotate;
pub mod stroke;
pub mod texture;
pub mod types;

use image::Rgba;
use rand::Rng;

pub use types::{Dimensions, GrayImage, MockupConfig, PatternConfig, RgbaImage};

/// All stage outputs of a full mockup render.
///
/// Each field captures one stage so callers can persist or preview
/// every step, not just the final composite.
#[derive(Debug, Clone)]
pub struct MockupStages {
    /// Stage 1: base with the texture applied through the mask.
    pub textured: RgbaImage,
    /// Stage 2: stamp image with the border stroke added.
    pub bordered: RgbaImage,
    /// Stage 3: textured base with the bordered stamp patterned over it.
    pub patterned: RgbaImage,
    /// Dimensions of the base image (and of `textured` / `patterned`).
    pub dimensions: Dimensions,
}

impl MockupStages {
    /// The final composite (the pattern stage output).
    #[must_use]
    pub const fn final_image(&self) -> &RgbaImage {
        &self.patterned
    }
}

/// Run the full three-stage mockup pipeline.
///
/// 1. Apply `texture` over the masked region of `base`.
/// 2. Stroke `stamp` with the configured border.
/// 3. Stamp the bordered image across the masked region of the
///    textured base.
///
/// `textured` and `patterned` always share `base`'s dimensions;
/// `bordered` measures `stamp`'s size plus twice the stroke radius.
#[must_use = "returns the rendered stages"]
pub fn render_mockup<R: Rng>(
    base: &RgbaImage,
    texture: &RgbaImage,
    stamp: &RgbaImage,
    mask: &GrayImage,
    config: &MockupConfig,
    rng: &mut R,
) -> MockupStages {
    let textured = texture::apply(base, texture, mask, config.texture_alpha);
    let bordered = stroke::stroke(stamp, config.stroke_radius, Rgba(config.stroke_color));
    let patterned = pattern::stamp(&textured, &bordered, mask, &config.pattern, rng);

    MockupStages {
        dimensions: Dimensions {
            width: base.width(),
            height: base.height(),
        },
        textured,
        bordered,
        patterned,
    }
}
