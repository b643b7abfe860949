use image::{Rgba, RgbaImage};

use crate::config::Direction;
use crate::model::Size;

/// Copy all of `src` into `canvas` with its top-left at (dx, dy).
/// Pixels falling outside the canvas are dropped.
pub fn blit_rgba(src: &RgbaImage, canvas: &mut RgbaImage, dx: u32, dy: u32) {
    let (cw, ch) = canvas.dimensions();
    let (sw, sh) = src.dimensions();
    for yy in 0..sh {
        let ty = dy.saturating_add(yy);
        if ty >= ch {
            break;
        }
        for xx in 0..sw {
            let tx = dx.saturating_add(xx);
            if tx >= cw {
                break;
            }
            canvas.put_pixel(tx, ty, *src.get_pixel(xx, yy));
        }
    }
}

/// Sheet size for `sizes` stacked along `direction`: the sum along the axis,
/// the maximum across it.
pub fn sheet_dimensions(sizes: &[Size], direction: Direction) -> (u32, u32) {
    let along: u32 = sizes
        .iter()
        .fold(0u32, |acc, s| acc.saturating_add(s.along(direction)));
    let across = sizes.iter().map(|s| s.across(direction)).max().unwrap_or(0);
    match direction {
        Direction::Right => (along, across),
        Direction::Down => (across, along),
    }
}

/// Stack `layers` in order onto a transparent canvas. Narrower layers are
/// aligned to the top (rightward) or left (downward) edge.
pub fn stack(layers: &[RgbaImage], direction: Direction) -> RgbaImage {
    let sizes: Vec<Size> = layers
        .iter()
        .map(|l| Size::new(l.width(), l.height()))
        .collect();
    let (w, h) = sheet_dimensions(&sizes, direction);
    let mut canvas = RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 0]));
    let mut cursor = 0u32;
    for (layer, size) in layers.iter().zip(&sizes) {
        match direction {
            Direction::Right => blit_rgba(layer, &mut canvas, cursor, 0),
            Direction::Down => blit_rgba(layer, &mut canvas, 0, cursor),
        }
        cursor = cursor.saturating_add(size.along(direction));
    }
    canvas
}
