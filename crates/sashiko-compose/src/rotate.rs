//! Rotation with expanded bounds.
//!
//! Rotating a tile for stamping must never crop its corners, so the
//! output canvas grows to the rotated bounding box. The tile is first
//! embedded centered in a transparent square large enough to hold it at
//! any angle, rotated about that square's center with bicubic
//! interpolation, then cropped back to the exact bounding box of the
//! rotated content.

use image::{Rgba, imageops};
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};

use crate::types::RgbaImage;

/// Rotate an image by `angle_degrees`, expanding the canvas so no
/// content is cropped.
///
/// The output dimensions are the ceiling of the rotated bounding box,
/// `(w*|cos| + h*|sin|, w*|sin| + h*|cos|)`. Pixels outside the rotated
/// content are fully transparent. An angle of zero returns the pixel
/// data unchanged.
#[must_use = "returns the rotated image"]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn rotate_expand(image: &RgbaImage, angle_degrees: f32) -> RgbaImage {
    if angle_degrees.abs() < f32::EPSILON {
        return image.clone();
    }

    let theta = angle_degrees.to_radians();
    let (cos, sin) = (theta.cos().abs(), theta.sin().abs());
    let (w, h) = (image.width() as f32, image.height() as f32);
    let out_w = w.mul_add(cos, h * sin).ceil() as u32;
    let out_h = w.mul_add(sin, h * cos).ceil() as u32;

    // A square with the source's diagonal as its side contains the tile
    // at every angle, so nothing is lost during the rotation itself.
    // The bounding box never exceeds the diagonal, so the final crop
    // stays in bounds.
    let side = w.hypot(h).ceil() as u32;
    let mut square = RgbaImage::new(side, side);
    imageops::replace(
        &mut square,
        image,
        i64::from((side - image.width()) / 2),
        i64::from((side - image.height()) / 2),
    );

    let rotated = rotate_about_center(&square, theta, Interpolation::Bicubic, Rgba([0, 0, 0, 0]));

    imageops::crop_imm(
        &rotated,
        (side - out_w) / 2,
        (side - out_h) / 2,
        out_w,
        out_h,
    )
    .to_image()
}
