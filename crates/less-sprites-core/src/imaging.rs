//! Boundary to the imaging capability.
//!
//! The pipeline only needs three things from an imaging backend: read a
//! file's pixel size, append a file onto a growing sheet, and encode the
//! sheet as PNG. Tests swap in a fake that records calls.

use std::path::Path;

use image::{ImageFormat, ImageReader, RgbaImage};
use tracing::trace;

use crate::compositing;
use crate::config::Direction;
use crate::error::{Result, SpriteError};
use crate::model::Size;

/// Reads pixel dimensions of an image file.
pub trait ImageSizeProbe: Send + Sync {
    fn probe(&self, path: &Path) -> Result<Size>;
}

/// Appends image files to a sheet, each after the previous one.
pub trait CanvasAppender {
    fn append(&mut self, path: &Path) -> Result<()>;
}

/// Writes a composed sheet to disk as PNG.
pub trait CanvasEncoder {
    fn encode(&self, dest: &Path) -> Result<()>;
}

/// A backend provides size probing and fresh canvases for one stacking direction.
pub trait ImagingBackend: ImageSizeProbe {
    type Canvas: CanvasAppender + CanvasEncoder;
    fn new_canvas(&self, direction: Direction) -> Self::Canvas;
}

/// Default backend on top of the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCrateBackend;

impl ImageSizeProbe for ImageCrateBackend {
    fn probe(&self, path: &Path) -> Result<Size> {
        // header only, no full decode
        let (w, h) = image::image_dimensions(path).map_err(|e| SpriteError::imaging(path, e))?;
        Ok(Size::new(w, h))
    }
}

impl ImagingBackend for ImageCrateBackend {
    type Canvas = SheetCanvas;
    fn new_canvas(&self, direction: Direction) -> SheetCanvas {
        SheetCanvas::new(direction)
    }
}

/// Decoded layers waiting to be stacked; composed on encode.
#[derive(Debug, Clone)]
pub struct SheetCanvas {
    direction: Direction,
    layers: Vec<RgbaImage>,
}

impl SheetCanvas {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            layers: Vec::new(),
        }
    }

    /// The sheet as it would be encoded now.
    pub fn compose(&self) -> RgbaImage {
        compositing::stack(&self.layers, self.direction)
    }
}

impl CanvasAppender for SheetCanvas {
    fn append(&mut self, path: &Path) -> Result<()> {
        let img = ImageReader::open(path)
            .map_err(|e| SpriteError::imaging(path, e))?
            .with_guessed_format()
            .map_err(|e| SpriteError::imaging(path, e))?
            .decode()
            .map_err(|e| SpriteError::imaging(path, e))?;
        let rgba = img.to_rgba8();
        trace!(?path, w = rgba.width(), h = rgba.height(), "appended layer");
        self.layers.push(rgba);
        Ok(())
    }
}

impl CanvasEncoder for SheetCanvas {
    fn encode(&self, dest: &Path) -> Result<()> {
        self.compose()
            .save_with_format(dest, ImageFormat::Png)
            .map_err(|e| SpriteError::from_encode(dest, e))
    }
}
