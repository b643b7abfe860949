use serde::Serialize;

use crate::config::Direction;

/// Pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
    /// Extent along the stacking axis.
    pub fn along(&self, direction: Direction) -> u32 {
        match direction {
            Direction::Right => self.width,
            Direction::Down => self.height,
        }
    }
    /// Extent across the stacking axis.
    pub fn across(&self, direction: Direction) -> u32 {
        match direction {
            Direction::Right => self.height,
            Direction::Down => self.width,
        }
    }
}

/// One resolved source image, in processing order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to the source directory (`/`-separated); the stylesheet key.
    pub name: String,
    pub size: Size,
}

/// A source file's position within the sheet, as emitted in the stylesheet.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Placement {
    pub name: String,
    /// Background offset; never positive.
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// Summary of a composed sheet.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SheetStats {
    pub num_frames: usize,
    pub width: u32,
    pub height: u32,
    pub direction: Direction,
}

impl SheetStats {
    /// Sheet geometry implied by `files` stacked along `direction`.
    pub fn from_files(files: &[SourceFile], direction: Direction) -> Self {
        let sizes: Vec<Size> = files.iter().map(|f| f.size).collect();
        let (width, height) = crate::compositing::sheet_dimensions(&sizes, direction);
        Self {
            num_frames: files.len(),
            width,
            height,
            direction,
        }
    }

    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Frames: {}, Sheet: {}x{} px, Direction: {}",
            self.num_frames, self.width, self.height, self.direction
        )
    }
}
