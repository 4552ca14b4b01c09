// What you SEE when painting:
// • A white canvas window opens with a blue frame where the picture will land.
// • The red crosshair sweeps the rows, leaving black strokes behind it.
// • Hold ESC (or close the window) to stop mid-picture. ESC again to quit.

use clap::{Parser, Subcommand};
use log::info;
use mask_painter::canvas::{Canvas, Region};
use mask_painter::config::PainterConfig;
use mask_painter::mask::{fit_within, load_image};
use mask_painter::{
    compile_to_vec, drag, paint, DragOptions, Error, FocusCheck, LogDevice, Mask, Point,
    ReplaySettings, SystemClock,
};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(version, about = "Redraw a thresholded picture as pointer strokes")]
struct Cli {
    /// Config file (defaults to the per-user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Write the effective configuration back to the config file
    #[arg(long, global = true)]
    write_config: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Threshold a picture and draw it stroke by stroke
    Paint {
        image: PathBuf,
        /// Luminance cutoff; darker pixels are drawn
        #[arg(short, long)]
        threshold: Option<u8>,
        /// Log the pointer calls instead of opening the canvas
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the press/release list for a picture
    Events {
        image: PathBuf,
        #[arg(short, long)]
        threshold: Option<u8>,
    },
    /// Drag the pointer in a straight line with the button held
    Drag {
        #[arg(allow_negative_numbers = true)]
        x1: i32,
        #[arg(allow_negative_numbers = true)]
        y1: i32,
        #[arg(allow_negative_numbers = true)]
        x2: i32,
        #[arg(allow_negative_numbers = true)]
        y2: i32,
        /// Pixels per step along the walked axis (0-100)
        #[arg(short, long, default_value_t = 5, allow_negative_numbers = true)]
        interval: i32,
        /// Milliseconds to wait after every step
        #[arg(short, long, default_value_t = 1)]
        lag: u64,
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(PainterConfig::default_path);
    let mut cfg = PainterConfig::load(&config_path)?;
    info!("Configuration loaded from {}", config_path.display());

    match cli.command {
        Command::Paint { image, threshold, dry_run } => {
            if let Some(t) = threshold {
                cfg.threshold = t;
            }
            let mask = load_mask(&image, &cfg)?;
            if dry_run {
                paint_dry(&mask, &cfg)?;
            } else {
                paint_on_canvas(&mask, &cfg)?;
            }
        }
        Command::Events { image, threshold } => {
            if let Some(t) = threshold {
                cfg.threshold = t;
            }
            let mask = load_mask(&image, &cfg)?;
            for event in compile_to_vec(&mask) {
                println!("{event}");
            }
        }
        Command::Drag { x1, y1, x2, y2, interval, lag, dry_run } => {
            let opts = DragOptions { interval, lag_ms: lag, max_steps: cfg.max_drag_steps };
            let (from, to) = (Point::new(x1, y1), Point::new(x2, y2));
            if dry_run {
                let mut device = LogDevice::default();
                let path = drag(&mut device, &mut SystemClock, from, to, &opts)?;
                info!("dragged through {} points", path.len());
            } else {
                let mut canvas = Canvas::new("mask-painter drag", cfg.canvas_width, cfg.canvas_height)?;
                drag(&mut canvas, &mut SystemClock, from, to, &opts)?;
                canvas.set_status("DONE - ESC TO CLOSE");
                canvas.wait_for_close()?;
            }
        }
    }

    if cli.write_config {
        cfg.save(&config_path)?;
        info!("Configuration written to {}", config_path.display());
    }
    Ok(())
}

fn load_mask(path: &Path, cfg: &PainterConfig) -> Result<Mask, Error> {
    let image = fit_within(load_image(path)?, cfg.max_width, cfg.max_height);
    let mask = Mask::from_image(&image, cfg.threshold);
    info!(
        "{}: {}x{} mask at threshold {}",
        path.display(),
        mask.width(),
        mask.height(),
        cfg.threshold
    );
    Ok(mask)
}

/// Same scan as a real paint, no window and no waiting.
fn paint_dry(mask: &Mask, cfg: &PainterConfig) -> Result<(), Error> {
    let settings = ReplaySettings {
        gesture_delay_ms: 0,
        settle_delay_ms: 0,
        ..ReplaySettings::from_config(cfg)
    };
    let mut device = LogDevice::default();
    let report = paint(mask, &mut device, &mut || true, &mut SystemClock, &settings)?;
    info!("dry run: {} presses, {} releases", report.presses, report.releases);
    Ok(())
}

fn paint_on_canvas(mask: &Mask, cfg: &PainterConfig) -> Result<(), Error> {
    let settings = ReplaySettings::from_config(cfg);
    let canvas = RefCell::new(Canvas::new("mask-painter", cfg.canvas_width, cfg.canvas_height)?);
    {
        let mut c = canvas.borrow_mut();
        c.set_region(Region {
            origin: settings.origin,
            width: i32::try_from(mask.width()).unwrap_or(i32::MAX).saturating_mul(settings.pixel_size),
            height: i32::try_from(mask.height()).unwrap_or(i32::MAX).saturating_mul(settings.pixel_size),
        });
        c.set_status("PAINTING - HOLD ESC TO STOP");
        c.present()?;
    }

    let report = paint(
        mask,
        &mut &canvas,
        &mut || canvas.borrow_mut().is_focused(),
        &mut SystemClock,
        &settings,
    )?;

    let mut canvas = canvas.into_inner();
    if report.outcome.is_cancelled() {
        // let go of ESC before waiting on it again
        while canvas.is_open() && canvas.esc_pressed() {
            canvas.present()?;
        }
        canvas.set_status("STOPPED - ESC TO CLOSE");
    } else {
        canvas.set_status("DONE - ESC TO CLOSE");
    }
    canvas.wait_for_close()
}
