use std::path::PathBuf;

use tracing::{debug, info, instrument};

use crate::config::SpriteConfig;
use crate::error::{Result, SpriteError};
use crate::export;
use crate::imaging::{CanvasAppender, CanvasEncoder, ImageSizeProbe, ImagingBackend};
use crate::model::{Placement, SheetStats, SourceFile, Size};
use crate::paths;
use crate::resolve;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Everything a run produces before anything is written.
pub struct SpriteOutput<C> {
    /// Source files in processing order.
    pub files: Vec<SourceFile>,
    pub placements: Vec<Placement>,
    /// Sheet url embedded in the stylesheet.
    pub sheet_url: String,
    /// LESS text for `style_path`.
    pub stylesheet: String,
    pub stats: SheetStats,
    /// Composed sheet, still in memory.
    pub canvas: C,
}

/// Resolves, probes and composes the sheet described by `cfg`, and renders
/// the stylesheet. Nothing is written to disk.
pub fn build_sprite<B: ImagingBackend>(
    cfg: &SpriteConfig,
    backend: &B,
) -> Result<SpriteOutput<B::Canvas>> {
    build_sprite_with_progress(cfg, backend, |_| {})
}

/// [`build_sprite`], calling `on_append` after each file lands on the canvas.
#[instrument(skip_all)]
pub fn build_sprite_with_progress<B, F>(
    cfg: &SpriteConfig,
    backend: &B,
    on_append: F,
) -> Result<SpriteOutput<B::Canvas>>
where
    B: ImagingBackend,
    F: FnMut(&SourceFile),
{
    cfg.validate()?;
    let names = resolve::resolve_sources(cfg)?;
    let (files, canvas) = process_all(cfg, &names, backend, on_append)?;

    let placements = export::compute_placements(&files, cfg.direction);
    let sheet_url = export::sheet_url(&cfg.source_dir, &cfg.sprite_path, &cfg.img_path);
    let stylesheet = export::to_less(&placements, &sheet_url);
    let stats = SheetStats::from_files(&files, cfg.direction);
    info!(
        frames = stats.num_frames,
        width = stats.width,
        height = stats.height,
        "sheet composed"
    );
    Ok(SpriteOutput {
        files,
        placements,
        sheet_url,
        stylesheet,
        stats,
        canvas,
    })
}

/// Probes every source and appends it to a fresh canvas.
///
/// Probes may run in parallel; results are kept by input index and appends
/// always follow input order, so offsets never depend on completion order.
#[instrument(skip_all, fields(count = names.len()))]
pub fn process_all<B, F>(
    cfg: &SpriteConfig,
    names: &[String],
    backend: &B,
    mut on_append: F,
) -> Result<(Vec<SourceFile>, B::Canvas)>
where
    B: ImagingBackend,
    F: FnMut(&SourceFile),
{
    let abs: Vec<PathBuf> = names
        .iter()
        .map(|n| paths::normalize(&cfg.source_dir.join(n)))
        .collect();
    if let Some(missing) = abs.iter().find(|p| !p.exists()) {
        return Err(SpriteError::MissingSourceFile {
            path: missing.clone(),
        });
    }

    let sizes = probe_all(backend, &abs, cfg.parallel)?;

    let mut canvas = backend.new_canvas(cfg.direction);
    let mut files = Vec::with_capacity(names.len());
    for ((name, path), size) in names.iter().zip(&abs).zip(sizes) {
        canvas.append(path)?;
        debug!(%name, w = size.width, h = size.height, "appended");
        let file = SourceFile {
            name: name.clone(),
            size,
        };
        on_append(&file);
        files.push(file);
    }
    Ok((files, canvas))
}

fn probe_all<P: ImageSizeProbe>(
    probe: &P,
    paths: &[PathBuf],
    parallel: bool,
) -> Result<Vec<Size>> {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return paths.par_iter().map(|p| probe.probe(p)).collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;
    paths.iter().map(|p| probe.probe(p)).collect()
}

/// Encodes the sheet to `cfg.sprite_path`, then writes the stylesheet to
/// `cfg.style_path`.
#[instrument(skip_all)]
pub fn write_sprite<C: CanvasEncoder>(cfg: &SpriteConfig, out: &SpriteOutput<C>) -> Result<()> {
    out.canvas.encode(&cfg.sprite_path)?;
    info!(path = ?cfg.sprite_path, "wrote sheet");
    export::write_stylesheet(&cfg.style_path, &out.stylesheet)?;
    info!(path = ?cfg.style_path, rules = out.placements.len(), "wrote stylesheet");
    Ok(())
}

/// Builds and writes the sprite in one go.
pub fn run<B: ImagingBackend>(cfg: &SpriteConfig, backend: &B) -> Result<SpriteOutput<B::Canvas>> {
    let out = build_sprite(cfg, backend)?;
    write_sprite(cfg, &out)?;
    Ok(out)
}
