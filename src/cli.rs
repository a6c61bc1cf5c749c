use std::{
    io::{self, BufWriter},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use glyphray::{
    Camera, RenderSettings,
    demo::{Demo, Preset},
    geometry::ScreenSize,
    render_frame,
};

/// How long to wait for a key press between frames
const FRAME_DELAY: Duration = Duration::from_millis(10);

const DEFAULT_IMAGE_SIZE: (u32, u32) = (640, 480);

#[derive(Copy, Clone, Debug, ValueEnum)]
enum SceneArg {
    Gallery,
    TwoSpheres,
    Pillars,
}

impl From<SceneArg> for Preset {
    fn from(value: SceneArg) -> Self {
        match value {
            SceneArg::Gallery => Preset::Gallery,
            SceneArg::TwoSpheres => Preset::TwoSpheres,
            SceneArg::Pillars => Preset::Pillars,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "glyphray")]
#[command(about = "Ray traces reflective shapes into the terminal", long_about = None)]
struct Cli {
    /// Scene to render
    #[arg(short, long, value_enum, default_value_t = SceneArg::Gallery)]
    scene: SceneArg,

    /// Width in characters (or pixels with --output), defaults to the terminal width
    #[arg(long)]
    width: Option<u32>,

    /// Height in characters (or pixels with --output), defaults to the terminal height
    #[arg(long)]
    height: Option<u32>,

    /// Width to height ratio of one character cell, 1 for images
    #[arg(long)]
    pixel_aspect: Option<f32>,

    /// Maximum number of reflections per ray
    #[arg(short, long, default_value_t = RenderSettings::default().max_bounces)]
    bounces: u32,

    /// Intensity shown as the brightest glyph
    #[arg(long, default_value_t = RenderSettings::default().max_intensity)]
    max_intensity: f32,

    /// Horizontal field of view in degrees
    #[arg(long, default_value_t = 90.0)]
    fov: f32,

    /// Stop after this many frames
    #[arg(short, long)]
    frames: Option<u64>,

    /// Render a single frame into a grayscale image instead of animating in the terminal
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    anyhow::ensure!(
        cli.max_intensity > 0.0,
        "Max intensity must be positive, got {}",
        cli.max_intensity
    );
    let settings = RenderSettings {
        max_bounces: cli.bounces,
        max_intensity: cli.max_intensity,
    };
    let mut demo = Preset::from(cli.scene)
        .build()
        .context("Building the scene")?;

    match &cli.output {
        Some(path) => render_image(&cli, &demo, &settings, path),
        None => animate(&cli, &mut demo, &settings),
    }
}

fn render_image(
    cli: &Cli,
    demo: &Demo,
    settings: &RenderSettings,
    path: &Path,
) -> anyhow::Result<()> {
    let resolution = ScreenSize::new(
        cli.width.unwrap_or(DEFAULT_IMAGE_SIZE.0),
        cli.height.unwrap_or(DEFAULT_IMAGE_SIZE.1),
    );
    let camera = demo.camera(resolution, cli.pixel_aspect.unwrap_or(1.0), cli.fov)?;

    let frame = render_frame(&demo.scene, &camera, &demo.light, settings);
    frame
        .to_image(settings.max_intensity)
        .save(path)
        .with_context(|| format!("Saving image to {}", path.display()))?;

    log::info!("Saved {}x{} image to {}", resolution.x, resolution.y, path.display());
    Ok(())
}

fn animate(cli: &Cli, demo: &mut Demo, settings: &RenderSettings) -> anyhow::Result<()> {
    let (columns, rows) = terminal::size().context("Querying terminal size")?;
    let resolution = ScreenSize::new(
        cli.width.unwrap_or(columns.into()),
        cli.height.unwrap_or(rows.into()),
    );
    let mut camera = demo.camera(resolution, cli.pixel_aspect.unwrap_or(0.5), cli.fov)?;

    let _guard = TerminalGuard::new()?;
    let mut out = BufWriter::new(io::stdout());

    let mut frame_count = 0u64;
    while cli.frames.is_none_or(|limit| frame_count < limit) {
        draw_frame(&mut out, demo, &camera, settings)?;
        frame_count += 1;

        demo.motion.advance(&mut camera)?;
        if quit_requested()? {
            break;
        }
    }

    log::debug!("Finished after {frame_count} frames");
    Ok(())
}

fn draw_frame(
    out: &mut impl io::Write,
    demo: &Demo,
    camera: &Camera,
    settings: &RenderSettings,
) -> anyhow::Result<()> {
    let frame = render_frame(&demo.scene, camera, &demo.light, settings);
    for (row, glyphs) in frame.glyph_rows(settings.max_intensity).enumerate() {
        let row = u16::try_from(row)?;
        queue!(out, cursor::MoveTo(0, row), Print(glyphs))?;
    }
    out.flush()?;
    Ok(())
}

fn quit_requested() -> anyhow::Result<bool> {
    while event::poll(FRAME_DELAY)? {
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(true);
                }
                _ => {}
            }
        }
    }
    Ok(false)
}

/// Switches the terminal to raw mode on an alternate screen, restores it when dropped.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Nothing sensible to do if restoring fails
        let _ = execute!(io::stdout(), cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
