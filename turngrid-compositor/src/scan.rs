//! Render directory scanning and batch compositing

use crate::composite::{composite_images, CompositeSettings};
use std::fs;
use std::path::{Path, PathBuf};
use turngrid_core::Result;

/// Image file extensions the pipeline recognizes
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

const RENDER_PREFIX: &str = "render_";

/// Whether a filename has a recognized image extension
pub fn is_image_file(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}

/// Whether a filename is a render output (`render_<angle>.<ext>`)
pub fn is_render_file(name: &str) -> bool {
    name.starts_with(RENDER_PREFIX) && is_image_file(name)
}

/// Extract the rotation angle embedded in a render filename
///
/// The angle is the second underscore-separated token, stripped of its
/// extension: `render_72.png` yields 72.
pub fn render_angle(name: &str) -> Option<i64> {
    name.split('_').nth(1)?.split('.').next()?.parse().ok()
}

/// Whether a directory contains at least one render file
pub fn is_render_dir(path: &Path) -> bool {
    let Ok(entries) = fs::read_dir(path) else {
        return false;
    };
    entries.filter_map(|entry| entry.ok()).any(|entry| {
        entry.path().is_file()
            && entry
                .file_name()
                .to_str()
                .is_some_and(is_render_file)
    })
}

/// Find all render directories under `input`
///
/// Immediate subdirectories holding render files qualify directly. One level
/// deeper, only subdirectories named as a rotation index (all digits) or as a
/// simulation run (`_run_` prefix) are considered.
pub fn find_render_dirs(input: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();

    for entry in fs::read_dir(input)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        if is_render_dir(&path) {
            dirs.push(path);
            continue;
        }

        for sub in fs::read_dir(&path)? {
            let sub = sub?.path();
            let Some(name) = sub.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            let qualifies = (!name.is_empty() && name.chars().all(|c| c.is_ascii_digit()))
                || name.starts_with("_run_");
            if qualifies && is_render_dir(&sub) {
                dirs.push(sub);
            }
        }
    }

    // read_dir order is platform dependent
    dirs.sort();
    Ok(dirs)
}

/// List a directory's render files sorted by embedded rotation angle
///
/// Files whose angle cannot be parsed are skipped with a warning.
pub fn sorted_render_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        if !is_render_file(name) {
            continue;
        }
        match render_angle(name) {
            Some(angle) => files.push((angle, path)),
            None => log::warn!("skipping render file without an angle: {}", path.display()),
        }
    }
    files.sort();
    Ok(files.into_iter().map(|(_, path)| path).collect())
}

/// Output filename for a render directory's composite
///
/// Rotation directories (all digits) fold the index into the name, run
/// directories keep their `_run_` tag, anything else uses the directory name
/// alone.
pub fn composite_name(render_dir: &Path) -> String {
    let name = render_dir
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let parent = render_dir
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    if !name.is_empty() && name.chars().all(|c| c.is_ascii_digit()) {
        format!("{parent}_rotation_{name}_composite.png")
    } else if name.starts_with("_run_") {
        format!("{parent}_{name}_composite.png")
    } else {
        format!("{name}_composite.png")
    }
}

fn composite_render_dir(
    dir: &Path,
    output: &Path,
    settings: &CompositeSettings,
) -> Result<bool> {
    let files = sorted_render_files(dir)?;
    if files.is_empty() {
        log::debug!("no render files in {}, skipping", dir.display());
        return Ok(false);
    }

    let mut images = Vec::with_capacity(files.len());
    for path in &files {
        images.push(image::open(path)?.to_rgba8());
    }

    let canvas = composite_images(&images, settings)?;
    let name = composite_name(dir);
    canvas.save(output.join(&name))?;
    log::info!("created composite {name}");
    Ok(true)
}

/// Composite every render directory under `input` into `output`
///
/// Creates the output directory, writes one PNG per qualifying directory, and
/// returns the number written. Empty directories are skipped; a directory
/// that fails (unreadable or corrupt images, write errors) is logged and the
/// batch continues.
pub fn composite_directory_tree(
    input: &Path,
    output: &Path,
    settings: &CompositeSettings,
) -> Result<usize> {
    fs::create_dir_all(output)?;

    let mut written = 0;
    for dir in find_render_dirs(input)? {
        match composite_render_dir(&dir, output, settings) {
            Ok(true) => written += 1,
            Ok(false) => {}
            Err(err) => log::error!("failed to composite {}: {err}", dir.display()),
        }
    }
    Ok(written)
}
