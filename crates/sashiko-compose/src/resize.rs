//! Exact-stretch resizing to a target size.
//!
//! Every buffer that enters a pixel-wise combination is first stretched
//! to the combining buffer's dimensions. The stretch is exact: aspect
//! ratio is never preserved, matching the "resize-to-match is mandatory"
//! rule of the compositing stages.

use image::imageops::{self, FilterType};

use crate::types::{GrayImage, RgbaImage};

/// Resampling filter for all stretches (bicubic).
const FILTER: FilterType = FilterType::CatmullRom;

/// Stretch an RGBA image to exactly `width` x `height`.
///
/// Returns a clone when the image is already the target size.
#[must_use = "returns the stretched image"]
pub fn stretch_rgba(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    imageops::resize(image, width, height, FILTER)
}

/// Stretch a single-channel mask to exactly `width` x `height`.
///
/// Returns a clone when the mask is already the target size.
#[must_use = "returns the stretched mask"]
pub fn stretch_mask(mask: &GrayImage, width: u32, height: u32) -> GrayImage {
    if mask.dimensions() == (width, height) {
        return mask.clone();
    }
    imageops::resize(mask, width, height, FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stretch_rgba_hits_exact_dimensions() {
        let img = RgbaImage::from_pixel(30, 10, image::Rgba([10, 20, 30, 255]));
        let out = stretch_rgba(&img, 17, 23);
        assert_eq!(out.dimensions(), (17, 23));
    }

    #[test]
    fn stretch_rgba_ignores_aspect_ratio() {
        // A wide image stretched to a tall target must land exactly on
        // the target, not on an aspect-preserving fit.
        let img = RgbaImage::from_pixel(200, 50, image::Rgba([0, 0, 0, 255]));
        let out = stretch_rgba(&img, 50, 200);
        assert_eq!(out.dimensions(), (50, 200));
    }

    #[test]
    fn stretch_rgba_same_size_is_identity() {
        let img = RgbaImage::from_fn(8, 8, |x, y| {
            image::Rgba([(x * 30) as u8, (y * 30) as u8, 0, 255])
        });
        let out = stretch_rgba(&img, 8, 8);
        assert_eq!(img, out);
    }

    #[test]
    fn stretch_rgba_uniform_color_preserved() {
        let img = RgbaImage::from_pixel(10, 10, image::Rgba([40, 80, 120, 200]));
        let out = stretch_rgba(&img, 25, 5);
        for pixel in out.pixels() {
            for c in 0..4 {
                let diff = i16::from(pixel[c]) - i16::from([40u8, 80, 120, 200][c]);
                assert!(
                    diff.abs() <= 1,
                    "channel {c} drifted under stretch: {}",
                    pixel[c],
                );
            }
        }
    }

    #[test]
    fn stretch_mask_hits_exact_dimensions() {
        let mask = GrayImage::from_pixel(9, 40, image::Luma([255]));
        let out = stretch_mask(&mask, 33, 7);
        assert_eq!(out.dimensions(), (33, 7));
    }

    #[test]
    fn stretch_mask_same_size_is_identity() {
        let mask = GrayImage::from_fn(6, 6, |x, _| image::Luma([(x * 40) as u8]));
        let out = stretch_mask(&mask, 6, 6);
        assert_eq!(mask, out);
    }
}
