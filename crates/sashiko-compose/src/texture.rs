//! Texture stage: blend a darkened texture into a masked region.
//!
//! The texture and mask are stretched to the base image's dimensions,
//! the texture is darkened so it reads as a surface finish rather than
//! replacing the base, its opacity is scaled, and the result is
//! composited over the base only where the mask admits it.

use crate::types::{GrayImage, RgbaImage};
use crate::{blend, resize};

/// Fixed brightness factor applied to the texture before compositing.
const TEXTURE_BRIGHTNESS: f32 = 0.7;

/// Apply `texture` over the masked region of `base`.
///
/// `texture` and `mask` may be any size; both are stretched to `base`'s
/// dimensions first. `alpha` in `[0, 1]` scales the texture's own alpha
/// channel, and the mask scales the contribution per pixel on top of
/// that. The output always has `base`'s dimensions.
///
/// Pixels where the mask is zero are returned bit-identical to `base`;
/// an `alpha` of zero makes the whole call a no-op.
#[must_use = "returns the textured image"]
pub fn apply(base: &RgbaImage, texture: &RgbaImage, mask: &GrayImage, alpha: f32) -> RgbaImage {
    let (width, height) = base.dimensions();
    let texture = resize::stretch_rgba(texture, width, height);
    let mask = resize::stretch_mask(mask, width, height);

    let texture = blend::darken(&texture, TEXTURE_BRIGHTNESS);
    let texture = blend::scale_alpha(&texture, alpha);

    let layer = blend::masked_layer(&texture, &mask);
    blend::alpha_over(base, &layer)
}

#[cfg(test)]
mod tests {
    use image::{Luma, Rgba};

    use super::*;

    fn checker_base(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([40, 60, 80, 255])
            } else {
                // Color hidden behind zero alpha must survive gating.
                Rgba([200, 10, 90, 0])
            }
        })
    }

    #[test]
    fn output_matches_base_dimensions() {
        let base = checker_base(37, 23);
        let texture = RgbaImage::from_pixel(100, 7, Rgba([255, 255, 255, 255]));
        let mask = GrayImage::from_pixel(5, 90, Luma([255]));
        let out = apply(&base, &texture, &mask, 0.5);
        assert_eq!(out.dimensions(), (37, 23));
    }

    #[test]
    fn zero_mask_pixels_are_bit_identical_to_base() {
        let base = checker_base(16, 16);
        let texture = RgbaImage::from_pixel(16, 16, Rgba([255, 255, 255, 255]));
        // Left half masked out, right half fully applied.
        let mask = GrayImage::from_fn(16, 16, |x, _| Luma([if x < 8 { 0 } else { 255 }]));
        let out = apply(&base, &texture, &mask, 1.0);
        for y in 0..16 {
            for x in 0..8 {
                assert_eq!(
                    out.get_pixel(x, y),
                    base.get_pixel(x, y),
                    "pixel ({x},{y}) changed outside the mask",
                );
            }
        }
        // Inside the mask the texture must have contributed.
        assert_ne!(out.get_pixel(12, 0), base.get_pixel(12, 0));
    }

    #[test]
    fn zero_alpha_is_a_no_op() {
        let base = checker_base(10, 10);
        let texture = RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255]));
        let mask = GrayImage::from_pixel(10, 10, Luma([255]));
        let out = apply(&base, &texture, &mask, 0.0);
        assert_eq!(base, out);
    }

    #[test]
    fn texture_is_darkened_before_compositing() {
        // Opaque white texture at full alpha over an opaque black base,
        // fully masked: the result must show the darkened texture
        // (255 * 0.7 ~ 179) blended at its darkened opacity, never
        // pure white.
        let base = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]));
        let texture = RgbaImage::from_pixel(8, 8, Rgba([255, 255, 255, 255]));
        let mask = GrayImage::from_pixel(8, 8, Luma([255]));
        let out = apply(&base, &texture, &mask, 1.0);
        let pixel = out.get_pixel(4, 4);
        // src = 179 at alpha 179: 179 * 179/255 ~ 126.
        for c in 0..3 {
            let diff = i16::from(pixel[c]) - 126;
            assert!(diff.abs() <= 2, "channel {c}: got {}", pixel[c]);
        }
        assert_eq!(pixel[3], 255, "opaque base must stay opaque");
    }

    #[test]
    fn undersized_inputs_are_stretched_not_tiled() {
        // A 1x1 texture must cover the whole masked region.
        let base = RgbaImage::from_pixel(12, 12, Rgba([0, 0, 0, 255]));
        let texture = RgbaImage::from_pixel(1, 1, Rgba([255, 0, 0, 255]));
        let mask = GrayImage::from_pixel(1, 1, Luma([255]));
        let out = apply(&base, &texture, &mask, 1.0);
        let corner = out.get_pixel(11, 11);
        let center = out.get_pixel(6, 6);
        assert_eq!(corner, center, "stretched texture must be uniform");
        assert!(corner[0] > 0, "red texture must contribute everywhere");
    }
}
