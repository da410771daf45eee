//! Flat collection of images from nested render trees

use crate::scan::is_image_file;
use std::fs;
use std::path::Path;
use turngrid_core::Result;

/// Copy every image under `input` into the flat `output` directory
///
/// Each copied file is renamed with its relative directory path joined by
/// underscores (`chair/0/render_0.png` becomes `chair_0_render_0.png`), so
/// images from different runs never collide. Returns the number of files
/// copied; per-file copy failures are logged and the walk continues.
pub fn collect_images(input: &Path, output: &Path) -> Result<usize> {
    fs::create_dir_all(output)?;

    let mut copied = 0;
    let mut pending = vec![input.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                // The output directory may live inside the input tree
                if path != output {
                    pending.push(path);
                }
                continue;
            }
            let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            if !is_image_file(name) {
                continue;
            }

            let prefix = path
                .parent()
                .and_then(|p| p.strip_prefix(input).ok())
                .map(|rel| {
                    rel.components()
                        .map(|c| c.as_os_str().to_string_lossy().into_owned())
                        .collect::<Vec<_>>()
                        .join("_")
                })
                .unwrap_or_default();
            let dest_name = if prefix.is_empty() {
                name.to_string()
            } else {
                format!("{prefix}_{name}")
            };

            match fs::copy(&path, output.join(&dest_name)) {
                Ok(_) => copied += 1,
                Err(err) => log::error!("failed to copy {}: {err}", path.display()),
            }
        }
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn write_png(path: &Path) {
        RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 255]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn test_collect_prefixes_with_relative_path() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("renders");
        let nested = input.join("chair").join("0");
        std::fs::create_dir_all(&nested).unwrap();
        write_png(&nested.join("render_0.png"));
        write_png(&input.join("top.png"));
        std::fs::write(input.join("notes.txt"), b"ignored").unwrap();

        let output = tmp.path().join("gallery");
        let copied = collect_images(&input, &output).unwrap();
        assert_eq!(copied, 2);
        assert!(output.join("chair_0_render_0.png").exists());
        assert!(output.join("top.png").exists());
        assert!(!output.join("notes.txt").exists());
    }

    #[test]
    fn test_collect_skips_output_inside_input() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("renders");
        std::fs::create_dir_all(&input).unwrap();
        write_png(&input.join("a.png"));

        let output = input.join("gallery");
        let copied = collect_images(&input, &output).unwrap();
        assert_eq!(copied, 1);
        assert!(output.join("a.png").exists());
    }
}
