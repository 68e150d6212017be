//! Writing rendered images to disk.
//!
//! - `.ppm`: plain-text P3, one pixel per line, top scanline first
//! - `.png`: 8-bit RGB through the `image` crate
//!
//! Both apply the same gamma correction and clamping as [`color_to_rgb`].

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::renderer::{color_to_rgb, ImageBuffer};
use log::info;
use thiserror::Error;

/// Errors that can occur while saving an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

/// Write `image` as a P3 PPM.
pub fn write_ppm<W: Write>(writer: &mut W, image: &ImageBuffer) -> io::Result<()> {
    write!(writer, "P3\n{} {}\n255\n", image.width, image.height)?;

    for color in &image.pixels {
        let [r, g, b] = color_to_rgb(*color);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    Ok(())
}

/// Save `image`, picking the format from the file extension.
pub fn save_image(path: impl AsRef<Path>, image: &ImageBuffer) -> Result<(), OutputError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "ppm" => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_ppm(&mut writer, image)?;
            writer.flush()?;
        }
        "png" => {
            image::save_buffer_with_format(
                path,
                &image.to_rgb8(),
                image.width,
                image.height,
                image::ColorType::Rgb8,
                image::ImageFormat::Png,
            )?;
        }
        _ => return Err(OutputError::UnsupportedFormat(path.display().to_string())),
    }

    info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}
