//! Content-aware cropping of rendered images

use image::imageops;
use image::RgbaImage;
use std::fs;
use std::path::Path;
use turngrid_core::Result;

/// Whether a pixel counts as visible content
///
/// Near-black fills and near-transparent fringes from the renderer's
/// transparent-background output are treated as empty unless the alpha is
/// clearly opaque.
fn is_content(pixel: &image::Rgba<u8>) -> bool {
    let [r, g, b, a] = pixel.0;
    let rgb = (r, g, b);
    (rgb != (0, 0, 0) && rgb != (1, 1, 1) && a > 3) || a > 30
}

/// Bounding box of an image's content pixels
///
/// Returns `(left, top, right, bottom)` as a half-open box, or `None` when
/// the image has no content at all.
pub fn content_bounds(image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut left = image.width();
    let mut top = image.height();
    let mut right = 0;
    let mut bottom = 0;
    let mut found = false;

    for (x, y, pixel) in image.enumerate_pixels() {
        if !is_content(pixel) {
            continue;
        }
        found = true;
        left = left.min(x);
        top = top.min(y);
        right = right.max(x + 1);
        bottom = bottom.max(y + 1);
    }

    found.then_some((left, top, right, bottom))
}

/// Crop an image to its content plus `padding` pixels on each side
///
/// The padding is clamped to the image bounds. Returns `None` when the image
/// has no content.
pub fn crop_to_content(image: &RgbaImage, padding: u32) -> Option<RgbaImage> {
    let (left, top, right, bottom) = content_bounds(image)?;
    let left = left.saturating_sub(padding);
    let top = top.saturating_sub(padding);
    let right = (right + padding).min(image.width());
    let bottom = (bottom + padding).min(image.height());

    Some(imageops::crop_imm(image, left, top, right - left, bottom - top).to_image())
}

/// Crop every PNG in `input` into `output`, returning the number written
///
/// Files without content are skipped; per-file failures are logged and the
/// batch continues.
pub fn crop_directory(input: &Path, output: &Path, padding: u32) -> Result<usize> {
    fs::create_dir_all(output)?;

    let mut written = 0;
    for entry in fs::read_dir(input)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("png") {
            continue;
        }

        match crop_file(&path, &output.join(entry.file_name()), padding) {
            Ok(true) => written += 1,
            Ok(false) => log::debug!("no content in {}, skipping", path.display()),
            Err(err) => log::error!("failed to crop {}: {err}", path.display()),
        }
    }
    Ok(written)
}

fn crop_file(input: &Path, output: &Path, padding: u32) -> Result<bool> {
    let image = image::open(input)?.to_rgba8();
    match crop_to_content(&image, padding) {
        Some(cropped) => {
            cropped.save(output)?;
            Ok(true)
        }
        None => Ok(false),
    }
}
