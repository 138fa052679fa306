mod demo;
mod scene;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use ombre_engine::logging::{LoggingConfig, init_logging};
use ombre_engine::{ProcessingMode, RenderConfig, Renderer};

use scene::{Job, Scene};

const USAGE: &str = "usage: ombre-studio [SCENE.json] [OUT_DIR]

Renders every gradient in SCENE.json (or the built-in demo set when no
scene is given) to OUT_DIR/<name>.png. OUT_DIR defaults to `out`.";

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(Invocation { scene, out_dir }) = parse_args(&args).inspect_err(|_| eprintln!("{USAGE}"))? else {
        println!("{USAGE}");
        return Ok(());
    };

    let jobs = match scene {
        Some(path) => load_jobs(&path)?,
        None => demo::jobs(None),
    };

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;

    let renderer = Renderer::with_config(
        RenderConfig::default()
            .with_default_scale(2.0)
            .with_mode(ProcessingMode::Parallel),
    );

    let mut written = 0usize;
    for job in &jobs {
        if write_job(&renderer, job, &out_dir)? {
            written += 1;
        }
    }
    log::info!("wrote {written} of {} gradient(s) to {}", jobs.len(), out_dir.display());
    Ok(())
}

/// Parsed command line.
#[derive(Debug, PartialEq)]
struct Invocation {
    scene: Option<PathBuf>,
    out_dir: PathBuf,
}

/// Returns `Ok(None)` when help was requested.
fn parse_args(args: &[String]) -> Result<Option<Invocation>> {
    if args.iter().any(|a| a == "-h" || a == "--help") {
        return Ok(None);
    }
    let (scene, out_dir) = match args {
        [] => (None, "out"),
        [scene] => (Some(scene), "out"),
        [scene, out] => (Some(scene), out.as_str()),
        [_, _, extra, ..] => bail!("unexpected argument `{extra}`"),
    };
    Ok(Some(Invocation {
        scene: scene.map(PathBuf::from),
        out_dir: PathBuf::from(out_dir),
    }))
}

fn load_jobs(path: &Path) -> Result<Vec<Job>> {
    Scene::load(path)?.jobs()
}

/// Renders one job and writes it as PNG. Returns `false` when there was no image.
fn write_job(renderer: &Renderer, job: &Job, out_dir: &Path) -> Result<bool> {
    let Some(mut pixmap) = renderer
        .render(&job.descriptor, job.viewport, job.scale)
        .with_context(|| format!("failed to render `{}`", job.name))?
    else {
        log::warn!("`{}` produced no image ({}x{}); skipped", job.name, job.viewport.width, job.viewport.height);
        return Ok(false);
    };

    if let Some(background) = job.background {
        pixmap.composite_over(background);
    }

    let image = image::RgbaImage::from_raw(pixmap.width(), pixmap.height(), pixmap.to_top_down_straight_bytes())
        .context("pixel buffer does not match image dimensions")?;

    let path = out_dir.join(format!("{}.png", job.name));
    image
        .save_with_format(&path, image::ImageFormat::Png)
        .with_context(|| format!("failed to write {}", path.display()))?;

    log::info!("{} -> {} ({}x{})", job.name, path.display(), pixmap.width(), pixmap.height());
    Ok(true)
}
