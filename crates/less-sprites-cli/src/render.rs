//! Handlebars rendering for stylesheet formats other than the built-in LESS.

use anyhow::Context;
use handlebars::Handlebars;
use less_sprites_core::{Placement, SheetStats};
use serde::Serialize;

#[derive(Serialize)]
pub struct TemplateSprite {
    name: String,
    /// `name` without extension, reduced to `[A-Za-z0-9_-]`.
    selector: String,
    x: i64,
    y: i64,
    width: u32,
    height: u32,
}

#[derive(Serialize)]
pub struct TemplateContext {
    sheet: String,
    sprites: Vec<TemplateSprite>,
    meta: serde_json::Value,
}

pub fn build_template_context(
    placements: &[Placement],
    sheet_url: &str,
    stats: &SheetStats,
) -> TemplateContext {
    let sprites = placements
        .iter()
        .map(|p| TemplateSprite {
            name: p.name.clone(),
            selector: css_selector(&p.name),
            x: p.x,
            y: p.y,
            width: p.width,
            height: p.height,
        })
        .collect();
    let meta = serde_json::json!({
        "app": "less-sprites",
        "version": env!("CARGO_PKG_VERSION"),
        "size": {"w": stats.width, "h": stats.height},
        "direction": stats.direction,
    });
    TemplateContext {
        sheet: sheet_url.to_string(),
        sprites,
        meta,
    }
}

/// Built-in template for `format`; `None` means the core LESS writer.
pub fn builtin_template(format: &str) -> anyhow::Result<Option<&'static str>> {
    match format.to_ascii_lowercase().as_str() {
        "less" => Ok(None),
        "css" => Ok(Some(include_str!("templates/css.hbs"))),
        other => anyhow::bail!("unknown stylesheet format: {}", other),
    }
}

pub fn render(template: &str, ctx: &TemplateContext) -> anyhow::Result<String> {
    let mut reg = Handlebars::new();
    reg.set_strict_mode(true);
    // stylesheets, not HTML
    reg.register_escape_fn(handlebars::no_escape);
    reg.register_template_string("tpl", template)
        .context("parse stylesheet template")?;
    let rendered = reg.render("tpl", ctx).context("render stylesheet template")?;
    Ok(rendered)
}

fn css_selector(name: &str) -> String {
    let stem = match name.rfind('.') {
        Some(i) if i > 0 => &name[..i],
        _ => name,
    };
    stem.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}
