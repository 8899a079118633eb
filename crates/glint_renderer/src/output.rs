//! Accumulated image storage and the PPM / PNG writers.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{RenderError, Result};
use glint_math::{Color, Interval};

/// Channel range before 8-bit quantization; keeps 1.0 from rounding to 256.
const INTENSITY: Interval = Interval::new(0.000, 0.999);

/// Gamma 2 transform. Non-positive input maps to zero.
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an averaged linear color to gamma-corrected 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let quantize = |linear: f64| (256.0 * INTENSITY.clamp(linear_to_gamma(linear))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Supported on-disk image encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain-text `P3` portable pixmap
    Ppm,
    Png,
}

impl OutputFormat {
    /// Pick the encoding from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "ppm" => Some(Self::Ppm),
            "png" => Some(Self::Png),
            _ => None,
        }
    }
}

/// Averaged linear pixel colors in raster order (rows top to bottom).
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Gamma-corrected RGB bytes, three per pixel.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|&c| color_to_rgb8(c)).collect()
    }

    /// Write the image as a plain-text PPM: a `P3` header, then one
    /// `r g b` line per pixel.
    pub fn write_ppm<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        write!(out, "P3\n{} {}\n255\n", self.width, self.height)?;
        for &color in &self.pixels {
            let [r, g, b] = color_to_rgb8(color);
            writeln!(out, "{} {} {}", r, g, b)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Save to `path`, choosing the encoding from the extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        match OutputFormat::from_path(path) {
            Some(OutputFormat::Ppm) => {
                let mut writer = BufWriter::new(File::create(path)?);
                self.write_ppm(&mut writer)
            }
            Some(OutputFormat::Png) => {
                image::save_buffer_with_format(
                    path,
                    &self.to_rgb8(),
                    self.width,
                    self.height,
                    image::ColorType::Rgb8,
                    image::ImageFormat::Png,
                )?;
                Ok(())
            }
            None => Err(RenderError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}
