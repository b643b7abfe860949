//! Core library for building CSS sprite sheets.
//!
//! - Spec: a JSON file (`dir`, `files`, `sprite`, `less`, `imgPath`, `direction`, `scanDirs`)
//!   resolved into an immutable [`SpriteConfig`]
//! - Pipeline: resolve sources, probe sizes, stack them into one sheet, render LESS rules
//! - Imaging sits behind [`ImagingBackend`]; [`ImageCrateBackend`] is the default
//!
//! Quick example:
//! ```ignore
//! use less_sprites_core::{ImageCrateBackend, SpriteConfig, run};
//! # fn main() -> anyhow::Result<()> {
//! let cfg = SpriteConfig::load("icons/sprites.json".as_ref())?;
//! let out = run(&cfg, &ImageCrateBackend)?;
//! println!("{}", out.stats.summary());
//! # Ok(()) }
//! ```

pub mod compositing;
pub mod config;
pub mod error;
pub mod export;
pub mod imaging;
pub mod model;
pub mod paths;
pub mod pipeline;
pub mod resolve;

pub use config::*;
pub use error::*;
pub use export::*;
pub use imaging::*;
pub use model::*;
pub use pipeline::*;
pub use resolve::*;

/// Convenience prelude for common types and functions.
/// Importing `less_sprites_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{Direction, SpriteConfig, SpriteConfigBuilder, SpriteSpec};
    pub use crate::error::SpriteError;
    pub use crate::imaging::{
        CanvasAppender, CanvasEncoder, ImageCrateBackend, ImageSizeProbe, ImagingBackend,
        SheetCanvas,
    };
    pub use crate::model::{Placement, SheetStats, Size, SourceFile};
    pub use crate::{SpriteOutput, build_sprite, build_sprite_with_progress, run, write_sprite};
}
