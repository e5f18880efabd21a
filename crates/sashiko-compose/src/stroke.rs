//! Border stage: add a solid-color stroke around an image's silhouette.
//!
//! The silhouette is a hard binarization of the alpha channel (any
//! nonzero alpha counts), expanded outward by morphological dilation
//! with a square kernel and softened with a small smoothing pass. The
//! smoothed silhouette becomes the alpha of a solid-color canvas, and
//! the original image is pasted back centered on top, leaving the color
//! visible only in the dilated margin.

use image::{Luma, Rgba, imageops};
use imageproc::distance_transform::Norm;
use imageproc::morphology::dilate;

use crate::blend;
use crate::types::{GrayImage, RgbaImage};

/// Add a `radius`-pixel stroke of `color` around `image`'s silhouette.
///
/// The output measures `(width + 2*radius, height + 2*radius)` for every
/// radius, with the original image centered at `(radius, radius)`.
/// Fully opaque source pixels are reproduced exactly in the interior;
/// the stroke ring takes `color`'s RGB with the smoothed silhouette as
/// its alpha (the color's own alpha byte is replaced by that mask).
///
/// A radius of zero adds no margin but still binarizes and smooths the
/// silhouette.
#[must_use = "returns the stroked image"]
pub fn stroke(image: &RgbaImage, radius: u32, color: Rgba<u8>) -> RgbaImage {
    let out_w = image.width() + 2 * radius;
    let out_h = image.height() + 2 * radius;

    let mut canvas = RgbaImage::from_pixel(out_w, out_h, color);

    // Hard silhouette: partial transparency counts as inside.
    let silhouette = GrayImage::from_fn(image.width(), image.height(), |x, y| {
        Luma([if image.get_pixel(x, y)[3] > 0 { 255 } else { 0 }])
    });

    let mut stroke_alpha = GrayImage::new(out_w, out_h);
    imageops::replace(
        &mut stroke_alpha,
        &silhouette,
        i64::from(radius),
        i64::from(radius),
    );

    let dilated = dilate_by(stroke_alpha, radius);
    let smoothed = smooth(&dilated);

    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        pixel[3] = smoothed.get_pixel(x, y)[0];
    }

    blend::paste_weighted(&mut canvas, image, i64::from(radius), i64::from(radius));
    canvas
}

/// Square-kernel dilation (L-inf norm) growing the silhouette by
/// exactly `radius` pixels in every direction.
///
/// The underlying distance transform saturates distances at 255, so a
/// single pass with a kernel near that cap would mark *every* pixel as
/// in range. Chebyshev dilation composes (`k1` then `k2` equals
/// `k1 + k2`), so large radii run as repeated passes of at most 254.
fn dilate_by(mask: GrayImage, radius: u32) -> GrayImage {
    let mut dilated = mask;
    let mut remaining = radius;
    while remaining > 0 {
        let step = u8::try_from(remaining.min(254)).unwrap_or(u8::MAX);
        dilated = dilate(&dilated, Norm::LInf, step);
        remaining -= u32::from(step);
    }
    dilated
}

/// 3x3 smoothing pass over the dilated silhouette, anti-aliasing the
/// stroke boundary.
///
/// Kernel weights are `[1,1,1; 1,5,1; 1,1,1] / 13`, evaluated in
/// integer arithmetic with rounding so uniform regions pass through
/// exactly (13 * 255 maps back to 255). Edges clamp to the nearest
/// in-bounds pixel.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn smooth(mask: &GrayImage) -> GrayImage {
    let (w, h) = mask.dimensions();
    GrayImage::from_fn(w, h, |x, y| {
        let mut acc: u32 = 0;
        for dy in -1..=1_i64 {
            for dx in -1..=1_i64 {
                let sx = (i64::from(x) + dx).clamp(0, i64::from(w) - 1) as u32;
                let sy = (i64::from(y) + dy).clamp(0, i64::from(h) - 1) as u32;
                let weight = if dx == 0 && dy == 0 { 5 } else { 1 };
                acc += weight * u32::from(mask.get_pixel(sx, sy)[0]);
            }
        }
        Luma([((acc + 6) / 13) as u8])
    })
}
