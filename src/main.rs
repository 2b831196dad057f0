//! `storyboard`: headless driver for the canvas engine.
//!
//! Loads a document JSON, runs engine operations against it and prints the
//! result as JSON. `present` walks the presentation path in real time, driving
//! camera transitions from a tokio timer.


use std::path::PathBuf;
use std::time::{Duration, Instant};

use canvas::camera::Rect;
use canvas::config::EngineConfig;
use canvas::engine::{Action, EditorSession};
use canvas::error::EngineError;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no frame with id {0}")]
    UnknownFrame(Uuid),
    #[error("presentation path is empty")]
    EmptyPath,
}

#[derive(Parser, Debug)]
#[command(name = "storyboard", about = "Spatial presentation canvas, headless")]
struct Cli {
    /// Viewport width in screen pixels.
    #[arg(long, env = "STORYBOARD_VIEWPORT_WIDTH", default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in screen pixels.
    #[arg(long, env = "STORYBOARD_VIEWPORT_HEIGHT", default_value_t = 720.0)]
    height: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize a document: frame count, path order, bounds.
    Inspect(DocArgs),
    /// Print the scene description for the document.
    Scene(SceneArgs),
    /// Print the minimap projection for the document.
    Minimap(DocArgs),
    /// Walk the presentation path in real time.
    Present(PresentArgs),
}

#[derive(Args, Debug)]
struct DocArgs {
    /// Document JSON file.
    document: PathBuf,
}

#[derive(Args, Debug)]
struct SceneArgs {
    #[command(flatten)]
    doc: DocArgs,

    /// Fit the camera to this frame before projecting.
    #[arg(long)]
    frame: Option<Uuid>,

    /// Project as seen in presentation mode.
    #[arg(long, default_value_t = false)]
    presenting: bool,
}

#[derive(Args, Debug)]
struct PresentArgs {
    #[command(flatten)]
    doc: DocArgs,

    /// Time to hold each frame after its transition lands.
    #[arg(long, default_value_t = 1500)]
    dwell_ms: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    frames: usize,
    elements: usize,
    bounds: Option<Rect>,
    current_frame_id: Option<Uuid>,
    path: Vec<PathEntry>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PathEntry {
    number: usize,
    frame_id: Uuid,
    title: String,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = EngineConfig::from_env()?;

    match cli.command {
        Command::Inspect(args) => {
            let session = open(&args, config, cli.width, cli.height)?;
            print_json(&summarize(&session))
        }
        Command::Scene(args) => run_scene(&args, config, cli.width, cli.height),
        Command::Minimap(args) => {
            let session = open(&args, config, cli.width, cli.height)?;
            print_json(&session.minimap())
        }
        Command::Present(args) => run_present(&args, config, cli.width, cli.height).await,
    }
}

/// Load a document into a fresh session sized to the viewport.
fn open(args: &DocArgs, config: EngineConfig, width: f64, height: f64) -> Result<EditorSession, CliError> {
    let json = std::fs::read_to_string(&args.document)
        .map_err(|source| CliError::Read { path: args.document.display().to_string(), source })?;
    let mut session = EditorSession::new(config);
    session.set_viewport(width, height);
    session.load_json(&json)?;
    Ok(session)
}

fn summarize(session: &EditorSession) -> Summary {
    let store = session.store();
    let path = session
        .path()
        .ids()
        .iter()
        .enumerate()
        .filter_map(|(i, id)| {
            store.get(id).map(|f| PathEntry { number: i + 1, frame_id: *id, title: f.title.clone() })
        })
        .collect();
    Summary {
        frames: store.len(),
        elements: store.frames().iter().map(|f| f.elements.len()).sum(),
        bounds: store.bounds(),
        current_frame_id: session.current_frame_id(),
        path,
    }
}

fn run_scene(args: &SceneArgs, config: EngineConfig, width: f64, height: f64) -> Result<(), CliError> {
    let mut session = open(&args.doc, config, width, height)?;
    if args.presenting && !session.start_presentation() {
        return Err(CliError::EmptyPath);
    }
    if let Some(id) = args.frame
        && !session.go_to_frame(&id)
    {
        return Err(CliError::UnknownFrame(id));
    }
    settle(&mut session);
    print_json(&session.render())
}

/// Run any transition in flight to completion on a simulated clock.
fn settle(session: &mut EditorSession) {
    let mut now = session.clock_ms();
    while let Some((handle, delay)) = session.scheduler_mut().pop() {
        now += delay;
        session.tick(handle, now);
    }
}

async fn run_present(args: &PresentArgs, config: EngineConfig, width: f64, height: f64) -> Result<(), CliError> {
    let mut session = open(&args.doc, config, width, height)?;
    let started = Instant::now();
    let dwell = Duration::from_millis(args.dwell_ms);

    session.set_clock(elapsed_ms(started));
    if !session.start_presentation() {
        return Err(CliError::EmptyPath);
    }
    loop {
        play(&mut session, started).await;
        let cam = session.camera();
        info!(
            frame = ?session.current_frame_id(),
            number = session.current_path_index().map(|i| i + 1),
            zoom = cam.zoom,
            "showing frame"
        );
        tokio::time::sleep(dwell).await;

        let before = session.current_frame_id();
        session.set_clock(elapsed_ms(started));
        if session.go_to_next_frame() == before {
            break;
        }
    }

    session.set_clock(elapsed_ms(started));
    session.stop_presentation();
    play(&mut session, started).await;
    info!(frames = session.path().len(), "presentation finished");
    Ok(())
}

/// Deliver scheduler ticks on real time until the transition in flight ends.
async fn play(session: &mut EditorSession, started: Instant) {
    while let Some((handle, delay)) = session.scheduler_mut().pop() {
        tokio::time::sleep(Duration::try_from_secs_f64(delay / 1000.0).unwrap_or_default()).await;
        for action in session.tick(handle, elapsed_ms(started)) {
            if let Action::AnimationFinished(cam) = action {
                debug!(zoom = cam.zoom, pan_x = cam.pan_x, pan_y = cam.pan_y, "transition landed");
            }
        }
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
