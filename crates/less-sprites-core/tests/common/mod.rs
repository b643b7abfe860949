#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use image::{Rgba, RgbaImage};
use less_sprites_core::prelude::*;

/// Backend with fixed sizes keyed by file name; records append order.
#[derive(Default, Clone)]
pub struct FakeBackend {
    pub sizes: HashMap<String, Size>,
    /// Sleep before answering a probe for this file.
    pub probe_delays: HashMap<String, Duration>,
    pub appended: Arc<Mutex<Vec<PathBuf>>>,
    pub fail_probe: Option<String>,
    pub fail_append: Option<String>,
}

impl FakeBackend {
    pub fn with_sizes(sizes: &[(&str, u32, u32)]) -> Self {
        Self {
            sizes: sizes
                .iter()
                .map(|(n, w, h)| (n.to_string(), Size::new(*w, *h)))
                .collect(),
            ..Default::default()
        }
    }

    pub fn appended_names(&self) -> Vec<String> {
        self.appended
            .lock()
            .unwrap()
            .iter()
            .map(|p| file_name(p))
            .collect()
    }
}

fn file_name(p: &Path) -> String {
    p.file_name().unwrap().to_string_lossy().into_owned()
}

impl ImageSizeProbe for FakeBackend {
    fn probe(&self, path: &Path) -> less_sprites_core::Result<Size> {
        let name = file_name(path);
        if let Some(delay) = self.probe_delays.get(&name) {
            thread::sleep(*delay);
        }
        if self.fail_probe.as_deref() == Some(name.as_str()) {
            return Err(SpriteError::Imaging {
                path: path.to_path_buf(),
                message: "corrupt header".into(),
            });
        }
        self.sizes
            .get(&name)
            .copied()
            .ok_or_else(|| SpriteError::Imaging {
                path: path.to_path_buf(),
                message: "unknown image".into(),
            })
    }
}

pub struct FakeCanvas {
    pub direction: Direction,
    log: Arc<Mutex<Vec<PathBuf>>>,
    fail_append: Option<String>,
}

impl CanvasAppender for FakeCanvas {
    fn append(&mut self, path: &Path) -> less_sprites_core::Result<()> {
        if self.fail_append.as_deref() == Some(file_name(path).as_str()) {
            return Err(SpriteError::Imaging {
                path: path.to_path_buf(),
                message: "decode failed".into(),
            });
        }
        self.log.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

impl CanvasEncoder for FakeCanvas {
    fn encode(&self, dest: &Path) -> less_sprites_core::Result<()> {
        fs::write(dest, b"fake png").map_err(|source| SpriteError::OutputWrite {
            path: dest.to_path_buf(),
            source,
        })
    }
}

impl ImagingBackend for FakeBackend {
    type Canvas = FakeCanvas;
    fn new_canvas(&self, direction: Direction) -> FakeCanvas {
        FakeCanvas {
            direction,
            log: self.appended.clone(),
            fail_append: self.fail_append.clone(),
        }
    }
}

/// Creates an empty file at `dir/rel`, with parent directories.
pub fn touch(dir: &Path, rel: &str) -> PathBuf {
    let p = dir.join(rel);
    fs::create_dir_all(p.parent().unwrap()).unwrap();
    fs::write(&p, b"").unwrap();
    p
}

/// Writes a solid-colour PNG at `dir/rel`.
pub fn write_png(dir: &Path, rel: &str, w: u32, h: u32, c: [u8; 4]) -> PathBuf {
    let p = dir.join(rel);
    fs::create_dir_all(p.parent().unwrap()).unwrap();
    RgbaImage::from_pixel(w, h, Rgba(c)).save(&p).unwrap();
    p
}

/// Writes a spec file and returns its path.
pub fn write_spec(dir: &Path, name: &str, json: &str) -> PathBuf {
    let p = dir.join(name);
    fs::write(&p, json).unwrap();
    p
}

/// Number of `.sprite-pos(` rules and `.sprite(@img)` mixins in a stylesheet.
pub fn count_rules(less: &str) -> (usize, usize) {
    (
        less.matches(".sprite-pos(\"").count(),
        less.matches(".sprite(@img) {").count(),
    )
}
