//! Pattern stage: stamp a tile across a masked region in a jittered,
//! randomly-rotated grid.
//!
//! The tile is resized once up front, then stamped onto a transparent
//! working canvas at jittered grid points, each stamp independently
//! rotated by a fresh uniform angle. Tiles overhanging the canvas clip
//! naturally in the paste; there is deliberately no skip or clamp logic
//! for boundary cells, since partial off-edge stamps are part of the
//! organic look. The finished canvas is mask-selected and composited
//! over the base.
//!
//! Randomness is injected: the caller owns the generator, so a seeded
//! RNG replays the exact same layout.

use rand::Rng;

use crate::types::{GrayImage, PatternConfig, RgbaImage};
use crate::{blend, resize, rotate};

/// Stamp `tile` across the masked region of `base`.
///
/// `tile` is stretched to the configured tile size; `mask` is stretched
/// to `base`'s dimensions. Each grid cell draws a fresh rotation angle
/// in `[0, 360)` and fresh spacing jitter from `rng`. The output always
/// has `base`'s dimensions.
///
/// # Preconditions
///
/// Grid steps must stay positive (see [`PatternConfig`]); a
/// non-positive step stalls the walk. Jitter ranges must be
/// non-negative.
#[must_use = "returns the stamped image"]
pub fn stamp<R: Rng>(
    base: &RgbaImage,
    tile: &RgbaImage,
    mask: &GrayImage,
    config: &PatternConfig,
    rng: &mut R,
) -> RgbaImage {
    let (width, height) = base.dimensions();
    let tile = resize::stretch_rgba(tile, config.tile_width, config.tile_height);
    let mask = resize::stretch_mask(mask, width, height);

    let mut canvas = RgbaImage::new(width, height);

    let mut x: i64 = 0;
    while x < i64::from(width) {
        let mut y: i64 = 0;
        while y < i64::from(height) {
            let angle = rng.gen_range(0.0..360.0_f32);

            // Fresh copy per cell: the alpha scaling and rotation must
            // not leak into sibling cells or the resized tile.
            let faded = blend::scale_alpha(&tile, config.alpha);
            let rotated = rotate::rotate_expand(&faded, angle);

            // Center the rotated stamp on the grid point.
            let paste_x = x - i64::from(rotated.width()) / 2;
            let paste_y = y - i64::from(rotated.height()) / 2;
            blend::paste_weighted(&mut canvas, &rotated, paste_x, paste_y);

            let step_y = i64::from(config.spacing_y)
                + i64::from(rng.gen_range(-config.jitter_y..=config.jitter_y));
            y += i64::from(config.tile_height) + step_y;
        }

        let step_x = i64::from(config.spacing_x)
            + i64::from(rng.gen_range(-config.jitter_x..=config.jitter_x));
        x += i64::from(config.tile_width) + step_x;
    }

    let layer = blend::masked_layer(&canvas, &mask);
    blend::alpha_over(base, &layer)
}
