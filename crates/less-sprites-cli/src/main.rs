use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use less_sprites_core::{
    ImageCrateBackend, SpriteConfig, SpriteError, build_sprite_with_progress, to_json,
    write_sprite,
};
use tracing::info;

mod render;

#[derive(Parser, Debug)]
#[command(
    name = "less-sprites",
    about = "Stack PNG files into a sprite sheet and emit LESS background-position rules",
    version,
    author
)]
struct Cli {
    /// JSON sprite spec (dir, files, sprite, less, imgPath, direction, scanDirs)
    #[arg(help_heading = "Input/Output")]
    spec: Option<PathBuf>,

    // Export
    /// Stylesheet format: less | css
    #[arg(long, default_value = "less", value_parser = ["less", "css"], help_heading = "Export")]
    format: String,
    /// External stylesheet template (handlebars); overrides --format
    #[arg(long, help_heading = "Export")]
    template: Option<PathBuf>,
    /// Print the sprite layout as JSON
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_layout: bool,
    /// Print the resolved configuration and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Export")]
    print_config_format: String,
    /// Dry run: compose the sheet and stylesheet but do not write files
    #[arg(long, default_value_t = false, help_heading = "Export")]
    dry_run: bool,

    /// Probe image sizes in parallel (requires core feature `parallel`)
    #[arg(long, default_value_t = false, help_heading = "Performance")]
    parallel: bool,

    /// Show progress bars (disable with --progress false or --quiet)
    #[arg(long, default_value_t = true, action = ArgAction::Set, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(short, long, default_value_t = false, help_heading = "Logging/UX")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);

    let Some(spec) = cli.spec.as_deref() else {
        return match print_usage(&mut io::stdout().lock()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("Error: print usage: {err}");
                ExitCode::FAILURE
            }
        };
    };

    match run_sprite(&cli, spec) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run_sprite(cli: &Cli, spec: &Path) -> anyhow::Result<()> {
    let mut cfg =
        SpriteConfig::load(spec).with_context(|| format!("load spec {}", spec.display()))?;
    cfg.parallel = cli.parallel;

    if cli.print_config {
        match cli.print_config_format.as_str() {
            "yaml" => println!("{}", serde_yaml::to_string(&cfg)?),
            _ => println!("{}", serde_json::to_string_pretty(&cfg)?),
        }
        return Ok(());
    }

    // resolve the template before any image work so a bad one fails fast
    let template: Option<String> = match &cli.template {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("read template {}", path.display()))?,
        ),
        None => render::builtin_template(&cli.format)?.map(str::to_string),
    };

    let bar = if cli.progress && !cli.quiet {
        let b = ProgressBar::new_spinner();
        b.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} composing {pos} [{elapsed_precise}] {wide_msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        Some(b)
    } else {
        None
    };
    let built = build_sprite_with_progress(&cfg, &ImageCrateBackend, |f| {
        if let Some(b) = &bar {
            b.set_message(f.name.clone());
            b.inc(1);
        }
    });
    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    let mut out = built?;
    info!("{}", out.stats.summary());

    if let Some(tpl) = &template {
        let ctx = render::build_template_context(&out.placements, &out.sheet_url, &out.stats);
        out.stylesheet = render::render(tpl, &ctx)?;
    }

    if cli.print_layout {
        let layout = to_json(&out.placements, &out.sheet_url, &out.stats);
        println!("{}", serde_json::to_string_pretty(&layout)?);
    }

    if cli.dry_run {
        info!(
            sprite = ?cfg.sprite_path,
            less = ?cfg.style_path,
            "dry run, nothing written"
        );
        return Ok(());
    }

    write_sprite(&cfg, &out)?;
    Ok(())
}

fn print_usage(out: &mut impl Write) -> io::Result<()> {
    Cli::command().write_help(out)?;
    writeln!(out)?;
    out.flush()
}

/// Exit code of the first `SpriteError` in the chain; 1 for anything else.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|e| e.downcast_ref::<SpriteError>())
        .map(SpriteError::exit_code)
        .unwrap_or(1)
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
