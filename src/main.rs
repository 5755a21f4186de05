// Demo driver: a still image or the webcam is the base frame, a JSON metrics
// file stands in for the analysis engine, and the HUD is drawn on top.
// ESC or closing the window quits.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use face_hud::camera::{CameraCapture, FrameSampler};
use face_hud::{DisplaySink, Drawer, Error, FrameBuffer, Headless, HudConfig, Scene, Visualizer};

#[derive(Parser, Debug)]
#[command(name = "face-hud", about = "Draw facial metrics over a still image or a live camera feed")]
struct Args {
    /// Still image used as the frame for every iteration
    #[arg(long, conflicts_with = "camera")]
    image: Option<PathBuf>,
    /// Camera index to capture from (default when no image is given)
    #[arg(long)]
    camera: Option<u32>,
    /// JSON file with the faces, occupants and objects to draw
    #[arg(long)]
    metrics: Option<PathBuf>,
    /// RGBA watermark stamped into the top-right corner
    #[arg(long)]
    logo: Option<PathBuf>,
    /// Save the last composed frame as PNG
    #[arg(long)]
    output: Option<PathBuf>,
    /// Render without opening a window
    #[arg(long)]
    headless: bool,
    /// TOML file with HUD settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Frames per second to process from the camera; 0 keeps every frame
    #[arg(long, default_value_t = 0)]
    rate: u32,
    /// Stop after this many processed frames
    #[arg(long)]
    frames: Option<u64>,
    /// Draw each face's tracking id (overrides the config file)
    #[arg(long)]
    face_id: bool,
    /// Hide facial landmarks (overrides the config file)
    #[arg(long)]
    no_points: bool,
    /// Milliseconds to wait after each presented frame (overrides the config file)
    #[arg(long)]
    wait_ms: Option<u64>,
    #[arg(long, default_value_t = 640)]
    width: u32,
    #[arg(long, default_value_t = 480)]
    height: u32,
}

/// Where base frames come from.
enum Source {
    Still(FrameBuffer),
    Camera {
        cam: CameraCapture,
        sampler: FrameSampler,
        started: Instant,
    },
}

impl Source {
    fn dimensions(&self) -> (usize, usize) {
        match self {
            Source::Still(frame) => (frame.width, frame.height),
            Source::Camera { cam, .. } => {
                let (w, h) = cam.resolution();
                (w as usize, h as usize)
            }
        }
    }

    /// Next frame to draw on. Camera frames the sampler rejects are dropped.
    fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        match self {
            Source::Still(frame) => Ok(frame.clone()),
            Source::Camera { cam, sampler, started } => loop {
                let frame = cam.next_frame()?;
                if sampler.should_process(started.elapsed().as_millis() as u64) {
                    return Ok(frame);
                }
            },
        }
    }
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut config = HudConfig::load(args.config.as_deref())?;
    config.draw_face_id |= args.face_id;
    config.draw_points &= !args.no_points;
    if let Some(wait_ms) = args.wait_ms {
        config.wait_ms = wait_ms;
    }

    let scene = match &args.metrics {
        Some(path) => Scene::load(path)?,
        None => Scene::default(),
    };
    if scene.is_empty() {
        info!("no subjects to draw, showing frames only");
    }

    let logo = match &args.logo {
        Some(path) => Some(image::open(path)?.to_rgba8()),
        None => None,
    };

    let mut source = match &args.image {
        Some(path) => {
            info!(path = %path.display(), "using still image");
            Source::Still(FrameBuffer::from_rgb_image(&image::open(path)?.to_rgb8()))
        }
        None => {
            let index = args.camera.unwrap_or(0);
            info!(index, "opening camera");
            Source::Camera {
                cam: CameraCapture::new(index, args.width, args.height)?,
                sampler: FrameSampler::new(args.rate),
                started: Instant::now(),
            }
        }
    };

    let (w, h) = source.dimensions();
    let mut sink: Box<dyn DisplaySink> = if args.headless {
        Box::new(Headless::default())
    } else {
        Box::new(Drawer::new(&config.window_title, w, h)?)
    };

    // a still image in headless mode only needs drawing once
    let limit = args.frames.or(match (&source, args.headless) {
        (Source::Still(_), true) => Some(1),
        _ => None,
    });

    let mut vis = Visualizer::new(&config, logo);
    let interval = Duration::from_millis(config.wait_ms);
    let mut processed: u64 = 0;
    info!(width = w, height = h, "rendering");

    while sink.is_open() && limit.is_none_or(|n| processed < n) {
        vis.update_image(source.next_frame()?);
        if let Err(e) = vis.draw_scene(&scene, config.draw_face_id, config.draw_points) {
            warn!(error = %e, frame = processed, "metrics not drawn");
        }
        if let Err(e) = vis.show_image(sink.as_mut(), interval) {
            warn!(error = %e, frame = processed, "display update failed");
        }
        processed += 1;
    }

    if let Some(path) = &args.output {
        vis.image_data().to_rgb_image().save(path)?;
        info!(path = %path.display(), "saved last frame");
    }
    info!(frames = processed, "done");
    Ok(())
}
