//! Shared alpha-compositing primitives.
//!
//! All compositing stages are built from the same small set of pixel
//! operations: channel scaling, mask selection, straight-alpha "over",
//! and alpha-weighted pasting. Every function returns a fresh buffer
//! (or mutates only the destination canvas passed to it); inputs are
//! never modified.
//!
//! Buffers combined pixel-wise must already share dimensions — callers
//! stretch via [`crate::resize`] first. A mismatch is an internal
//! invariant violation, checked with debug assertions only.

use image::Rgba;

use crate::types::{GrayImage, RgbaImage};

/// Scale a single channel value by `factor`, clamped into byte range.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale_channel(value: u8, factor: f32) -> u8 {
    (f32::from(value) * factor).round().clamp(0.0, 255.0) as u8
}

/// Multiply an image's alpha channel by `factor`, leaving color
/// channels untouched.
///
/// Values are clamped into byte range, so `factor` above 1.0 saturates
/// rather than wrapping.
#[must_use = "returns a new image; the input is unchanged"]
pub fn scale_alpha(image: &RgbaImage, factor: f32) -> RgbaImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        pixel[3] = scale_channel(pixel[3], factor);
    }
    out
}

/// Multiply every channel of an image by `factor`.
///
/// This is the brightness pre-adjustment applied to textures. The alpha
/// channel participates: darkening blends the image toward transparent
/// black, so a darkened texture also becomes slightly more translucent.
#[must_use = "returns a new image; the input is unchanged"]
pub fn darken(image: &RgbaImage, factor: f32) -> RgbaImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        for c in 0..4 {
            pixel[c] = scale_channel(pixel[c], factor);
        }
    }
    out
}

/// Select `src` through `mask`, blending against full transparency.
///
/// Per pixel, every channel is scaled by `mask / 255`: where the mask is
/// 255 the source passes through exactly, where it is 0 the result is
/// fully transparent black, and intermediate values blend
/// proportionally.
#[must_use = "returns the masked layer"]
#[allow(clippy::cast_possible_truncation)]
pub fn masked_layer(src: &RgbaImage, mask: &GrayImage) -> RgbaImage {
    debug_assert_eq!(src.dimensions(), mask.dimensions());

    RgbaImage::from_fn(src.width(), src.height(), |x, y| {
        let weight = u32::from(mask.get_pixel(x, y)[0]);
        let pixel = src.get_pixel(x, y);
        let select = |v: u8| ((u32::from(v) * weight + 127) / 255) as u8;
        Rgba([
            select(pixel[0]),
            select(pixel[1]),
            select(pixel[2]),
            select(pixel[3]),
        ])
    })
}

/// Straight-alpha "over" composite of `overlay` onto `base`.
///
/// Per channel `out = src*srcA + dst*(1-srcA)` with the alpha
/// accumulated as `outA = srcA + dstA*(1-srcA)`. Where the overlay is
/// fully transparent the base pixel is returned bit-identically,
/// including color channels hidden behind zero alpha.
#[must_use = "returns the composited image"]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn alpha_over(base: &RgbaImage, overlay: &RgbaImage) -> RgbaImage {
    debug_assert_eq!(base.dimensions(), overlay.dimensions());

    RgbaImage::from_fn(base.width(), base.height(), |x, y| {
        let src = *overlay.get_pixel(x, y);
        let dst = *base.get_pixel(x, y);
        if src[3] == 0 {
            return dst;
        }

        let src_a = f32::from(src[3]) / 255.0;
        let blend = |s: u8, d: u8| {
            f32::from(s)
                .mul_add(src_a, f32::from(d) * (1.0 - src_a))
                .round()
                .clamp(0.0, 255.0) as u8
        };
        let out_a = f32::from(src[3]) + f32::from(dst[3]) * (1.0 - src_a);
        Rgba([
            blend(src[0], dst[0]),
            blend(src[1], dst[1]),
            blend(src[2], dst[2]),
            out_a.round().clamp(0.0, 255.0) as u8,
        ])
    })
}

/// Paste `src` onto `dst` at `(x, y)`, blending every channel by the
/// source pixel's own alpha weight.
///
/// The offset may be negative or extend past `dst`'s far edge;
/// off-canvas source pixels are silently discarded, so overhanging
/// content clips naturally at the canvas boundary. A fully opaque
/// source pixel overwrites the destination exactly; a fully transparent
/// one leaves it untouched.
///
/// This is a weighted copy, not an "over" composite: the destination
/// alpha is blended by the same weight as the color channels.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn paste_weighted(dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    let (dst_w, dst_h) = (i64::from(dst.width()), i64::from(dst.height()));

    for (src_x, src_y, src_px) in src.enumerate_pixels() {
        let out_x = x + i64::from(src_x);
        let out_y = y + i64::from(src_y);
        if out_x < 0 || out_y < 0 || out_x >= dst_w || out_y >= dst_h {
            continue;
        }

        let weight = u32::from(src_px[3]);
        if weight == 0 {
            continue;
        }

        let dst_px = dst.get_pixel_mut(out_x as u32, out_y as u32);
        for c in 0..4 {
            let s = u32::from(src_px[c]);
            let d = u32::from(dst_px[c]);
            dst_px[c] = ((s * weight + d * (255 - weight) + 127) / 255) as u8;
        }
    }
}
