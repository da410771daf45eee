//! Batch driver for turngrid render post-processing

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use turngrid_compositor::{
    collect_images, composite_directory_tree, crop_directory, parse_color, CompositeSettings,
};

#[derive(Parser)]
#[command(name = "turngrid", version, about = "Post-process turntable render batches")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Composite each render directory into a single grid image
    Composite {
        /// Directory tree containing render directories
        input: PathBuf,
        /// Directory to write composite PNGs into
        output: PathBuf,
        /// Width of each grid cell in pixels
        #[arg(long, default_value_t = 1920)]
        cell_width: u32,
        /// Height of each grid cell in pixels
        #[arg(long, default_value_t = 1080)]
        cell_height: u32,
        /// Background color (name or #rrggbb / #rrggbbaa)
        #[arg(long, default_value = "white")]
        background: String,
        /// Letterbox images inside their cells instead of filling one axis
        #[arg(long)]
        no_overflow: bool,
    },
    /// Crop images to their visible content
    Crop {
        /// Directory of PNGs to crop
        input: PathBuf,
        /// Directory to write cropped images into
        output: PathBuf,
        /// Extra pixels to keep around the content
        #[arg(long, default_value_t = 0)]
        padding: u32,
    },
    /// Collect nested render images into a single flat directory
    Collect {
        /// Root of the render tree
        input: PathBuf,
        /// Flat output directory
        output: PathBuf,
    },
    /// Collect nested render images, then crop the collected copies
    CropAndCollect {
        /// Root of the render tree
        input: PathBuf,
        /// Gallery output directory; cropped copies go to `<output>/cropped`
        output: PathBuf,
        /// Extra pixels to keep around the content
        #[arg(long, default_value_t = 0)]
        padding: u32,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Composite {
            input,
            output,
            cell_width,
            cell_height,
            background,
            no_overflow,
        } => {
            let settings = CompositeSettings {
                cell_width,
                cell_height,
                background: parse_color(&background)?,
                allow_overflow: !no_overflow,
            };
            let written = composite_directory_tree(&input, &output, &settings)
                .with_context(|| format!("compositing renders in {}", input.display()))?;
            log::info!("wrote {written} composites to {}", output.display());
        }
        Command::Crop {
            input,
            output,
            padding,
        } => {
            let written = crop_directory(&input, &output, padding)
                .with_context(|| format!("cropping images in {}", input.display()))?;
            log::info!("wrote {written} cropped images to {}", output.display());
        }
        Command::Collect { input, output } => {
            let copied = collect_images(&input, &output)
                .with_context(|| format!("collecting images from {}", input.display()))?;
            log::info!("collected {copied} images into {}", output.display());
        }
        Command::CropAndCollect {
            input,
            output,
            padding,
        } => {
            let copied = collect_images(&input, &output)
                .with_context(|| format!("collecting images from {}", input.display()))?;
            let cropped_dir = output.join("cropped");
            let written = crop_directory(&output, &cropped_dir, padding)
                .with_context(|| format!("cropping images in {}", output.display()))?;
            log::info!(
                "collected {copied} images, wrote {written} cropped copies to {}",
                cropped_dir.display()
            );
        }
    }
    Ok(())
}
