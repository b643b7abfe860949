use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde_json::{Value, json};

use crate::config::Direction;
use crate::error::{Result, SpriteError};
use crate::model::{Placement, SheetStats, SourceFile};
use crate::paths;

/// Running background offsets for `files` in order. The first file sits at
/// (0, 0); each following one is shifted by the sizes of those before it.
pub fn compute_placements(files: &[SourceFile], direction: Direction) -> Vec<Placement> {
    let mut x: i64 = 0;
    let mut y: i64 = 0;
    let mut out = Vec::with_capacity(files.len());
    for f in files {
        out.push(Placement {
            name: f.name.clone(),
            x,
            y,
            width: f.size.width,
            height: f.size.height,
        });
        match direction {
            Direction::Right => x -= i64::from(f.size.width),
            Direction::Down => y -= i64::from(f.size.height),
        }
    }
    out
}

/// Url of the sheet as referenced from the stylesheet: `img_path`, then the
/// sheet's directory relative to `source_dir`, then the sheet file name.
pub fn sheet_url(source_dir: &Path, sprite_path: &Path, img_path: &str) -> String {
    let sheet_dir = sprite_path.parent().unwrap_or(sprite_path);
    let rel = paths::relative_path(source_dir, sheet_dir);
    let file_name = sprite_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    paths::url_join(&[img_path, &rel, &file_name])
}

/// LESS mixins: one `.sprite-pos("<name>")` per placement, then the shared
/// `.sprite(@img)` mixin pointing at the sheet.
pub fn to_less(placements: &[Placement], sheet_url: &str) -> String {
    let mut s = String::new();
    for p in placements {
        let _ = write!(
            s,
            ".sprite-pos(\"{}\") {{\n\tbackground-position: {}px {}px;\n}}\n",
            p.name, p.x, p.y
        );
    }
    let _ = write!(
        s,
        ".sprite(@img) {{\n\tbackground-image: url(\"{sheet_url}\");\n\t.sprite-pos(@img);\n}}\n"
    );
    s
}

/// Layout as JSON: `{ sheet, frames: [{ name, x, y, w, h }], meta }`.
pub fn to_json(placements: &[Placement], sheet_url: &str, stats: &SheetStats) -> Value {
    let frames: Vec<Value> = placements
        .iter()
        .map(|p| json!({"name": p.name, "x": p.x, "y": p.y, "w": p.width, "h": p.height}))
        .collect();
    json!({
        "sheet": sheet_url,
        "frames": frames,
        "meta": {
            "app": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "size": {"w": stats.width, "h": stats.height},
            "direction": stats.direction,
        },
    })
}

/// Writes stylesheet text as UTF-8.
pub fn write_stylesheet(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|source| SpriteError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}
