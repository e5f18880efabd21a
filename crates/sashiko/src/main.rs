//! Render a textured, stamped, and stroked product mockup.
//!
//! Loads a base image, a texture, a stamp image, and a single-channel
//! mask; applies the texture through the mask, strokes the stamp image
//! with a solid border, stamps the bordered result across the masked
//! region; then writes each stage to the output directory as PNG.
//!
//! All four inputs are decoded up front: a missing or unreadable file
//! aborts the run before any output is written.

use std::path::{Path, PathBuf};

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sashiko_compose::{GrayImage, MockupConfig, PatternConfig, RgbaImage, render_mockup};

/// Render a textured, stamped, and stroked product mockup.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Base product image (e.g. a sock silhouette).
    #[arg(long)]
    base: PathBuf,

    /// Texture image blended into the masked region.
    #[arg(long)]
    texture: PathBuf,

    /// Stamp image repeated across the masked region.
    #[arg(long)]
    stamp: PathBuf,

    /// Single-channel mask: 0 outside the region, 255 inside.
    #[arg(long)]
    mask: PathBuf,

    /// Directory for the stage outputs (created if missing).
    #[arg(short, long, default_value = "out")]
    output: PathBuf,

    /// Texture opacity (0 to 1).
    #[arg(long, default_value_t = 0.6)]
    texture_alpha: f32,

    /// Border thickness around the stamp image, in pixels.
    #[arg(long, default_value_t = 10)]
    stroke_radius: u32,

    /// Border color as "R,G,B,A" bytes.
    #[arg(long, value_name = "R,G,B,A", default_value = "255,255,255,255")]
    stroke_color: String,

    /// Side length each stamp is resized to, in pixels.
    #[arg(long, default_value_t = 300)]
    tile_size: u32,

    /// Base gap between stamps, in pixels.
    #[arg(long, default_value_t = 80)]
    spacing: i32,

    /// Maximum random deviation from the base gap, in pixels.
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(i32).range(0..))]
    jitter: i32,

    /// Stamp opacity (0 to 1).
    #[arg(long, default_value_t = 0.9)]
    pattern_alpha: f32,

    /// Seed for reproducible stamp placement and rotation.
    #[arg(long)]
    seed: Option<u64>,
}

/// Errors that abort the mockup run.
#[derive(Debug, thiserror::Error)]
enum MockupError {
    /// An input file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An input file could not be decoded as an image.
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    /// The output directory could not be created.
    #[error("failed to create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A stage output could not be written.
    #[error("failed to save {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        source: image::ImageError,
    },

    /// The stroke color flag was malformed.
    #[error("invalid stroke color '{0}': expected four comma-separated bytes, e.g. 255,0,0,255")]
    StrokeColor(String),

    /// The pattern geometry cannot advance the stamp grid.
    #[error(
        "pattern grid cannot advance: tile size {tile} + spacing {spacing} - jitter {jitter} \
         must be positive"
    )]
    Geometry { tile: u32, spacing: i32, jitter: i32 },
}

/// Reject geometry whose worst-case grid step is non-positive: the
/// stamp grid cursor would stall and the render would never finish.
fn validate_geometry(tile: u32, spacing: i32, jitter: i32) -> Result<(), MockupError> {
    let min_step = i64::from(tile) + i64::from(spacing) - i64::from(jitter);
    if min_step <= 0 {
        return Err(MockupError::Geometry {
            tile,
            spacing,
            jitter,
        });
    }
    Ok(())
}

fn decode(path: &Path) -> Result<image::DynamicImage, MockupError> {
    let bytes = std::fs::read(path).map_err(|source| MockupError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    image::load_from_memory(&bytes).map_err(|source| MockupError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

fn load_rgba(path: &Path) -> Result<RgbaImage, MockupError> {
    Ok(decode(path)?.to_rgba8())
}

fn load_mask(path: &Path) -> Result<GrayImage, MockupError> {
    Ok(decode(path)?.to_luma8())
}

/// Parse "R,G,B,A" into color bytes.
fn parse_color(spec: &str) -> Result<[u8; 4], MockupError> {
    let mut channels = [0_u8; 4];
    let mut parts = spec.split(',');
    for channel in &mut channels {
        let part = parts
            .next()
            .ok_or_else(|| MockupError::StrokeColor(spec.to_string()))?;
        *channel = part
            .trim()
            .parse()
            .map_err(|_| MockupError::StrokeColor(spec.to_string()))?;
    }
    if parts.next().is_some() {
        return Err(MockupError::StrokeColor(spec.to_string()));
    }
    Ok(channels)
}

fn save(image: &RgbaImage, path: &Path) -> Result<(), MockupError> {
    image.save(path).map_err(|source| MockupError::Save {
        path: path.to_path_buf(),
        source,
    })
}

fn main() -> Result<(), MockupError> {
    let args = Args::parse();

    validate_geometry(args.tile_size, args.spacing, args.jitter)?;

    let config = MockupConfig {
        texture_alpha: args.texture_alpha,
        stroke_radius: args.stroke_radius,
        stroke_color: parse_color(&args.stroke_color)?,
        pattern: PatternConfig {
            tile_width: args.tile_size,
            tile_height: args.tile_size,
            spacing_x: args.spacing,
            spacing_y: args.spacing,
            jitter_x: args.jitter,
            jitter_y: args.jitter,
            alpha: args.pattern_alpha,
        },
    };

    // Fail fast: decode everything before producing any output.
    eprintln!("Loading inputs...");
    let base = load_rgba(&args.base)?;
    let texture = load_rgba(&args.texture)?;
    let stamp = load_rgba(&args.stamp)?;
    let mask = load_mask(&args.mask)?;

    std::fs::create_dir_all(&args.output).map_err(|source| MockupError::OutputDir {
        path: args.output.clone(),
        source,
    })?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    eprintln!(
        "Rendering {}x{} mockup (texture alpha {}, stroke radius {}, tile {}px)...",
        base.width(),
        base.height(),
        args.texture_alpha,
        args.stroke_radius,
        args.tile_size,
    );
    let stages = render_mockup(&base, &texture, &stamp, &mask, &config, &mut rng);

    let textured_path = args.output.join("textured.png");
    let bordered_path = args.output.join("bordered.png");
    let patterned_path = args.output.join("patterned.png");

    save(&stages.textured, &textured_path)?;
    eprintln!("Texture stage saved to {}", textured_path.display());
    save(&stages.bordered, &bordered_path)?;
    eprintln!("Border stage saved to {}", bordered_path.display());
    save(&stages.patterned, &patterned_path)?;
    eprintln!("Pattern stage saved to {}", patterned_path.display());

    eprintln!("Done.");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_color_accepts_four_bytes() {
        assert_eq!(parse_color("255,0,0,255").unwrap(), [255, 0, 0, 255]);
        assert_eq!(parse_color(" 1, 2, 3, 4 ").unwrap(), [1, 2, 3, 4]);
    }

    #[test]
    fn parse_color_rejects_short_input() {
        assert!(parse_color("255,0,0").is_err());
    }

    #[test]
    fn parse_color_rejects_extra_components() {
        assert!(parse_color("1,2,3,4,5").is_err());
    }

    #[test]
    fn parse_color_rejects_out_of_range() {
        assert!(parse_color("256,0,0,0").is_err());
        assert!(parse_color("-1,0,0,0").is_err());
    }

    #[test]
    fn negative_jitter_is_rejected_at_parse_time() {
        let result = Args::try_parse_from([
            "sashiko",
            "--base",
            "b.png",
            "--texture",
            "t.png",
            "--stamp",
            "s.png",
            "--mask",
            "m.png",
            "--jitter=-5",
        ]);
        assert!(result.is_err(), "negative jitter must not reach the library");
    }

    #[test]
    fn stalled_grid_geometry_is_rejected() {
        // Worst-case step = tile + spacing - jitter; zero or below
        // would stall the stamp grid.
        assert!(validate_geometry(100, -100, 0).is_err());
        assert!(validate_geometry(100, -50, 50).is_err());
        assert!(validate_geometry(100, -49, 50).is_ok());
        assert!(validate_geometry(300, 80, 50).is_ok());
    }

    #[test]
    fn missing_input_reports_the_path() {
        let err = load_rgba(Path::new("definitely/not/here.png")).unwrap_err();
        assert!(err.to_string().contains("definitely/not/here.png"));
    }

    #[test]
    fn args_are_well_formed() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
