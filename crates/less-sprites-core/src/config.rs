use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, SpriteError};
use crate::paths;

/// Axis along which source images are stacked.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Each image goes below the previous one; offsets vary in `y`.
    #[default]
    Down,
    /// Each image goes right of the previous one; offsets vary in `x`.
    Right,
}

impl Direction {
    /// `"right"` selects horizontal stacking; anything else, or nothing, stacks downward.
    pub fn from_spec(value: Option<&str>) -> Self {
        value.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for Direction {
    type Err = ();
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "right" => Ok(Self::Right),
            "down" => Ok(Self::Down),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Down => f.write_str("down"),
            Direction::Right => f.write_str("right"),
        }
    }
}

/// Sprite spec as written in the JSON file. Every field is optional; see
/// [`SpriteConfig`] for the resolved form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpriteSpec {
    /// Source directory, relative to the spec file.
    pub dir: Option<String>,
    /// Output sheet path.
    pub sprite: Option<String>,
    /// Output stylesheet path.
    pub less: Option<String>,
    /// Prefix for the sheet url inside the stylesheet. Never touched on disk.
    pub img_path: Option<String>,
    /// Explicit ordered list of files relative to `dir`; disables scanning.
    pub files: Option<Vec<String>>,
    /// Only the string `"right"` stacks horizontally; any other JSON value stacks downward.
    pub direction: Option<Value>,
    /// Recurse into subdirectories when scanning. Any truthy JSON value enables it.
    pub scan_dirs: Option<Value>,
}

impl SpriteSpec {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

/// Fully resolved run configuration. Paths are absolute and normalized.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SpriteConfig {
    /// Spec file this configuration was loaded from, if any.
    pub spec_path: Option<PathBuf>,
    pub source_dir: PathBuf,
    pub sprite_path: PathBuf,
    pub style_path: PathBuf,
    pub img_path: String,
    pub files: Option<Vec<String>>,
    pub direction: Direction,
    pub scan_dirs: bool,
    /// Probe sizes on the rayon pool when the `parallel` feature is on.
    pub parallel: bool,
}

impl SpriteConfig {
    /// Reads and resolves the JSON spec at `spec_path`.
    pub fn load(spec_path: &Path) -> Result<Self> {
        if !spec_path.is_file() {
            return Err(SpriteError::invalid_spec(
                spec_path,
                "spec file does not exist",
            ));
        }
        let abs =
            paths::absolutize(spec_path).map_err(|e| SpriteError::invalid_spec(spec_path, e))?;
        let text = fs::read_to_string(&abs).map_err(|e| SpriteError::invalid_spec(&abs, e))?;
        let spec =
            SpriteSpec::from_json(&text).map_err(|e| SpriteError::invalid_spec(&abs, e))?;
        Ok(Self::from_spec(spec, &abs))
    }

    /// Applies defaults to `spec`. `spec_path` must be absolute; every relative
    /// path in the spec is taken relative to its directory.
    pub fn from_spec(spec: SpriteSpec, spec_path: &Path) -> Self {
        let spec_dir = spec_path.parent().unwrap_or_else(|| Path::new("/"));
        let stem = spec_stem(spec_path);

        let dir = non_empty(spec.dir).unwrap_or_else(|| ".".into());
        let sprite = non_empty(spec.sprite).unwrap_or_else(|| format!("{stem}.png"));
        let less = non_empty(spec.less).unwrap_or_else(|| format!("{stem}.less"));

        let cfg = Self {
            spec_path: Some(spec_path.to_path_buf()),
            source_dir: paths::resolve_against(spec_dir, Path::new(&dir)),
            sprite_path: paths::resolve_against(spec_dir, Path::new(&sprite)),
            style_path: paths::resolve_against(spec_dir, Path::new(&less)),
            img_path: spec.img_path.unwrap_or_default(),
            files: spec.files,
            direction: Direction::from_spec(spec.direction.as_ref().and_then(Value::as_str)),
            scan_dirs: spec.scan_dirs.as_ref().is_some_and(is_truthy),
            parallel: false,
        };
        debug!(
            source_dir = ?cfg.source_dir,
            sprite = ?cfg.sprite_path,
            less = ?cfg.style_path,
            direction = %cfg.direction,
            "resolved spec"
        );
        cfg
    }

    /// Checks the invariants downstream stages rely on.
    pub fn validate(&self) -> Result<()> {
        let origin = self.spec_path.clone().unwrap_or_else(|| self.source_dir.clone());
        for (what, p) in [
            ("source dir", &self.source_dir),
            ("sprite path", &self.sprite_path),
            ("stylesheet path", &self.style_path),
        ] {
            if !p.is_absolute() {
                return Err(SpriteError::invalid_spec(
                    &origin,
                    format!("{what} {} is not absolute", p.display()),
                ));
            }
        }
        if self.sprite_path.file_name().is_none() {
            return Err(SpriteError::invalid_spec(
                &origin,
                format!("sprite path {} has no file name", self.sprite_path.display()),
            ));
        }
        Ok(())
    }

    /// Create a fluent builder rooted at `source_dir`.
    pub fn builder(source_dir: impl AsRef<Path>) -> SpriteConfigBuilder {
        SpriteConfigBuilder::new(source_dir)
    }
}

/// `<name>` for `<name>.json`; other extensions are kept as part of the name.
fn spec_stem(spec_path: &Path) -> String {
    let name = spec_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sprite".into());
    match name.strip_suffix(".json") {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => name,
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

/// JavaScript-style truthiness: `null`, `false`, `0` and `""` are false.
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Builder for `SpriteConfig` for ergonomic construction.
///
/// Relative output paths are resolved against the source directory.
#[derive(Debug, Clone)]
pub struct SpriteConfigBuilder {
    cfg: SpriteConfig,
}

impl SpriteConfigBuilder {
    pub fn new(source_dir: impl AsRef<Path>) -> Self {
        let source_dir = paths::absolutize(source_dir.as_ref())
            .unwrap_or_else(|_| paths::normalize(source_dir.as_ref()));
        Self {
            cfg: SpriteConfig {
                spec_path: None,
                sprite_path: source_dir.join("sprite.png"),
                style_path: source_dir.join("sprite.less"),
                source_dir,
                img_path: String::new(),
                files: None,
                direction: Direction::Down,
                scan_dirs: false,
                parallel: false,
            },
        }
    }
    pub fn sprite_path(mut self, p: impl AsRef<Path>) -> Self {
        self.cfg.sprite_path = paths::resolve_against(&self.cfg.source_dir, p.as_ref());
        self
    }
    pub fn style_path(mut self, p: impl AsRef<Path>) -> Self {
        self.cfg.style_path = paths::resolve_against(&self.cfg.source_dir, p.as_ref());
        self
    }
    pub fn img_path(mut self, v: impl Into<String>) -> Self {
        self.cfg.img_path = v.into();
        self
    }
    pub fn files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cfg.files = Some(files.into_iter().map(Into::into).collect());
        self
    }
    pub fn direction(mut self, v: Direction) -> Self {
        self.cfg.direction = v;
        self
    }
    pub fn scan_dirs(mut self, v: bool) -> Self {
        self.cfg.scan_dirs = v;
        self
    }
    pub fn parallel(mut self, v: bool) -> Self {
        self.cfg.parallel = v;
        self
    }
    pub fn build(self) -> SpriteConfig {
        self.cfg
    }
}
