//! Canvas compositing

use crate::layout::compute_grid_layout;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use turngrid_core::{Error, Result};

/// Tunable parameters for a composite canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeSettings {
    /// Width of each grid cell in pixels
    pub cell_width: u32,
    /// Height of each grid cell in pixels
    pub cell_height: u32,
    /// Canvas background color, RGBA
    pub background: [u8; 4],
    /// Let images fill their cell's longer axis and spill past the shorter one
    pub allow_overflow: bool,
}

impl Default for CompositeSettings {
    fn default() -> Self {
        Self {
            cell_width: 1920,
            cell_height: 1080,
            background: [255, 255, 255, 255],
            allow_overflow: true,
        }
    }
}

/// Parse a background color from a name or `#rrggbb`/`#rrggbbaa` hex string
pub fn parse_color(value: &str) -> Result<[u8; 4]> {
    match value {
        "white" => return Ok([255, 255, 255, 255]),
        "black" => return Ok([0, 0, 0, 255]),
        "gray" | "grey" => return Ok([128, 128, 128, 255]),
        "transparent" => return Ok([0, 0, 0, 0]),
        _ => {}
    }

    let hex = value.strip_prefix('#').ok_or_else(|| {
        Error::InvalidConfiguration(format!("unknown background color: {value}"))
    })?;
    let parse_channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .ok_or_else(|| {
                Error::InvalidConfiguration(format!("invalid hex color: {value}"))
            })
    };
    match hex.len() {
        6 => Ok([
            parse_channel(0..2)?,
            parse_channel(2..4)?,
            parse_channel(4..6)?,
            255,
        ]),
        8 => Ok([
            parse_channel(0..2)?,
            parse_channel(2..4)?,
            parse_channel(4..6)?,
            parse_channel(6..8)?,
        ]),
        _ => Err(Error::InvalidConfiguration(format!(
            "invalid hex color: {value}"
        ))),
    }
}

/// Compute the uniformly scaled size of a source image inside a cell
///
/// With `allow_overflow` set, sources wider than tall fill the cell width and
/// others fill the cell height, spilling past the cell on the remaining axis.
/// Otherwise the source is letterboxed: scaled against the cell's aspect
/// ratio so it fits entirely inside, touching the cell on its limiting axis.
pub fn scaled_fit(src_width: u32, src_height: u32, settings: &CompositeSettings) -> (u32, u32) {
    let aspect = src_width as f64 / src_height as f64;
    let cell_w = settings.cell_width;
    let cell_h = settings.cell_height;

    let (new_width, new_height) = if settings.allow_overflow {
        if aspect > 1.0 {
            (cell_w, (cell_w as f64 / aspect) as u32)
        } else {
            ((cell_h as f64 * aspect) as u32, cell_h)
        }
    } else {
        let cell_aspect = cell_w as f64 / cell_h as f64;
        if aspect > cell_aspect {
            (cell_w, (cell_w as f64 / aspect) as u32)
        } else {
            ((cell_h as f64 * aspect) as u32, cell_h)
        }
    };

    (new_width.max(1), new_height.max(1))
}

/// Composite an ordered image sequence onto a single canvas
///
/// Images are consumed in the given order and assigned row-major to grid
/// cells; the compositor never re-sorts. Short rows are centered against the
/// longest row. Each image is Lanczos-resized to its [`scaled_fit`] size,
/// centered in its cell, and blended using its own alpha as a mask, so later
/// images can cover earlier ones in overflow zones. The finished canvas is
/// flattened to opaque RGB.
///
/// # Errors
/// `EmptyInput` for an empty sequence, `InvalidDimensions` for zero-sized
/// cells.
pub fn composite_images(images: &[RgbaImage], settings: &CompositeSettings) -> Result<RgbImage> {
    if settings.cell_width == 0 || settings.cell_height == 0 {
        return Err(Error::InvalidDimensions(format!(
            "cell size must be positive, got {}x{}",
            settings.cell_width, settings.cell_height
        )));
    }
    if images.is_empty() {
        return Err(Error::EmptyInput("no images to composite".to_string()));
    }

    let layout = compute_grid_layout(images.len())?;
    let cell_w = settings.cell_width as i64;
    let cell_h = settings.cell_height as i64;

    let canvas_width = settings.cell_width * layout.max_columns as u32;
    let canvas_height = settings.cell_height * layout.rows as u32;
    let mut canvas =
        RgbaImage::from_pixel(canvas_width, canvas_height, Rgba(settings.background));

    let mut index = 0;
    for (row, &row_len) in layout.per_row.iter().enumerate() {
        // Integer centering offset for rows shorter than the longest one
        let row_offset = (layout.max_columns - row_len) as i64 * cell_w / 2;

        for col in 0..row_len {
            let image = &images[index];
            index += 1;

            let (new_width, new_height) =
                scaled_fit(image.width(), image.height(), settings);
            let resized = imageops::resize(image, new_width, new_height, FilterType::Lanczos3);

            let cell_center_x = col as i64 * cell_w + row_offset + cell_w / 2;
            let cell_center_y = row as i64 * cell_h + cell_h / 2;
            let paste_x = cell_center_x - new_width as i64 / 2;
            let paste_y = cell_center_y - new_height as i64 / 2;

            imageops::overlay(&mut canvas, &resized, paste_x, paste_y);
        }
    }

    Ok(DynamicImage::ImageRgba8(canvas).to_rgb8())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(cell_width: u32, cell_height: u32, allow_overflow: bool) -> CompositeSettings {
        CompositeSettings {
            cell_width,
            cell_height,
            background: [255, 255, 255, 255],
            allow_overflow,
        }
    }

    fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(color))
    }

    #[test]
    fn test_letterbox_fit_stays_inside_cell() {
        let s = settings(1920, 1080, false);
        for (w, h) in [(800, 600), (600, 800), (1920, 1080), (100, 2000), (3000, 50)] {
            let (nw, nh) = scaled_fit(w, h, &s);
            assert!(nw <= s.cell_width, "{w}x{h} scaled to {nw}x{nh}");
            assert!(nh <= s.cell_height, "{w}x{h} scaled to {nw}x{nh}");
            assert!(
                nw == s.cell_width || nh == s.cell_height,
                "{w}x{h} should touch the cell on one axis, got {nw}x{nh}"
            );
        }
    }

    #[test]
    fn test_overflow_fit_fills_one_axis() {
        let s = settings(1920, 1080, true);
        for (w, h) in [(800, 600), (600, 800), (1920, 1080), (100, 2000), (3000, 50)] {
            let (nw, nh) = scaled_fit(w, h, &s);
            assert!(
                nw == s.cell_width || nh == s.cell_height,
                "{w}x{h} should fill one cell axis, got {nw}x{nh}"
            );
        }
    }

    #[test]
    fn test_overflow_fit_can_exceed_cell() {
        // A 4:3 source in a 16:9 cell fills the width and spills vertically.
        let s = settings(1920, 1080, true);
        let (nw, nh) = scaled_fit(800, 600, &s);
        assert_eq!(nw, 1920);
        assert_eq!(nh, 1440);
        assert!(nh > s.cell_height);
    }

    #[test]
    fn test_five_images_canvas_dimensions() {
        let images: Vec<_> = (0..5).map(|_| solid(800, 600, [255, 0, 0, 255])).collect();
        let canvas = composite_images(&images, &settings(800, 600, true)).unwrap();
        assert_eq!(canvas.width(), 2400);
        assert_eq!(canvas.height(), 1200);
    }

    #[test]
    fn test_three_images_single_row_dimensions() {
        let images: Vec<_> = (0..3).map(|_| solid(800, 600, [255, 0, 0, 255])).collect();
        let canvas = composite_images(&images, &settings(800, 600, true)).unwrap();
        assert_eq!(canvas.width(), 2400);
        assert_eq!(canvas.height(), 600);
    }

    #[test]
    fn test_short_bottom_row_is_centered() {
        // Five cell-sized red images: the bottom row of two starts half a
        // cell in, leaving background at its left edge.
        let images: Vec<_> = (0..5).map(|_| solid(800, 600, [255, 0, 0, 255])).collect();
        let canvas = composite_images(&images, &settings(800, 600, true)).unwrap();

        // Top-left cell is covered
        assert_eq!(canvas.get_pixel(5, 5).0, [255, 0, 0]);
        // Bottom row left margin shows the white background
        assert_eq!(canvas.get_pixel(5, 700).0, [255, 255, 255]);
        // Bottom row content starts at x = 400
        assert_eq!(canvas.get_pixel(450, 700).0, [255, 0, 0]);
    }

    #[test]
    fn test_transparent_source_leaves_background() {
        let images = vec![solid(100, 100, [0, 255, 0, 0])];
        let s = CompositeSettings {
            cell_width: 100,
            cell_height: 100,
            background: [10, 20, 30, 255],
            allow_overflow: false,
        };
        let canvas = composite_images(&images, &s).unwrap();
        assert_eq!(canvas.get_pixel(50, 50).0, [10, 20, 30]);
    }

    #[test]
    fn test_empty_input_and_bad_dimensions() {
        assert!(matches!(
            composite_images(&[], &settings(800, 600, true)),
            Err(turngrid_core::Error::EmptyInput(_))
        ));
        assert!(matches!(
            composite_images(&[solid(10, 10, [0, 0, 0, 255])], &settings(0, 600, true)),
            Err(turngrid_core::Error::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("white").unwrap(), [255, 255, 255, 255]);
        assert_eq!(parse_color("transparent").unwrap(), [0, 0, 0, 0]);
        assert_eq!(parse_color("#102030").unwrap(), [16, 32, 48, 255]);
        assert_eq!(parse_color("#10203040").unwrap(), [16, 32, 48, 64]);
        assert!(parse_color("mauve-ish").is_err());
        assert!(parse_color("#12").is_err());
    }
}
