//! Plays a compiled mask onto a pointer device: maps mask cells to device
//! pixels and paces every press/release so the target app can keep up.

use crate::config::PainterConfig;
use crate::device::{Clock, FocusCheck, PointerDevice};
use crate::error::{Error, Result};
use crate::mask::Mask;
use crate::stroke::{compile, CompileOutcome};
use crate::types::{GestureEvent, Point};
use log::{info, warn};
use std::cell::Cell;

/// Placement and pacing for one replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySettings {
    /// Device position of mask cell (0,0).
    pub origin: Point,
    /// Device pixels per mask cell along each axis.
    pub pixel_size: i32,
    /// Wait before every press/release.
    pub gesture_delay_ms: u64,
    /// Wait once before the first pixel is looked at.
    pub settle_delay_ms: u64,
}

impl ReplaySettings {
    pub fn from_config(cfg: &PainterConfig) -> Self {
        Self {
            origin: Point::new(cfg.start_x, cfg.start_y),
            pixel_size: cfg.pixel_size,
            gesture_delay_ms: cfg.gesture_delay_ms,
            settle_delay_ms: cfg.settle_delay_ms,
        }
    }

    /// Mask cell -> device pixel, or None if it falls outside `i32`.
    pub fn to_device(&self, p: Point) -> Option<Point> {
        let x = self.pixel_size.checked_mul(p.x)?.checked_add(self.origin.x)?;
        let y = self.pixel_size.checked_mul(p.y)?.checked_add(self.origin.y)?;
        Some(Point::new(x, y))
    }

    /// Reject placements whose far corner (the row-end release column and
    /// the last row) cannot be expressed in device coordinates.
    fn check_fits(&self, mask: &Mask) -> Result<()> {
        if self.pixel_size <= 0 {
            return Err(Error::InvalidArgument(format!(
                "pixel size must be positive, got {}",
                self.pixel_size
            )));
        }
        let corner = i32::try_from(mask.width())
            .ok()
            .zip(i32::try_from(mask.height()).ok())
            .and_then(|(w, h)| self.to_device(Point::new(w, h)));
        if corner.is_none() {
            return Err(Error::InvalidArgument(format!(
                "{}x{} mask at {} scale {} overflows device coordinates",
                mask.width(),
                mask.height(),
                self.origin,
                self.pixel_size
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintReport {
    pub presses: usize,
    pub releases: usize,
    pub outcome: CompileOutcome,
}

/// Compile `mask` and forward every gesture to `device`.
///
/// Focus loss ends the replay early and is reported in the outcome. A device
/// error also ends it, and is returned.
pub fn paint<D, F, C>(
    mask: &Mask,
    device: &mut D,
    focus: &mut F,
    clock: &mut C,
    settings: &ReplaySettings,
) -> Result<PaintReport>
where
    D: PointerDevice + ?Sized,
    F: FocusCheck + ?Sized,
    C: Clock + ?Sized,
{
    settings.check_fits(mask)?;
    if mask.is_blank() {
        info!("mask has no ink, nothing will be drawn");
    }

    info!(
        "painting {}x{} mask ({} strokes) at {} scale {}",
        mask.width(),
        mask.height(),
        mask.stroke_count(),
        settings.origin,
        settings.pixel_size
    );
    clock.sleep(settings.settle_delay_ms);

    let broken = Cell::new(false);
    let mut failure: Option<Error> = None;
    let (mut presses, mut releases) = (0, 0);

    let outcome = compile(
        mask,
        &mut || !broken.get() && focus.is_focused(),
        |event| {
            if broken.get() {
                return;
            }
            clock.sleep(settings.gesture_delay_ms);
            // every cell is within the corner checked above
            let Some(at) = settings.to_device(event.point()) else {
                failure = Some(Error::InvalidArgument(format!("{event} overflows device coordinates")));
                broken.set(true);
                return;
            };
            let sent = match event {
                GestureEvent::Press(_) => device.press(at).map(|()| presses += 1),
                GestureEvent::Release(_) => device.release(at).map(|()| releases += 1),
            };
            if let Err(e) = sent {
                failure = Some(e);
                broken.set(true);
            }
        },
    );

    if let Some(e) = failure {
        warn!("painting aborted after {presses} strokes: {e}");
        return Err(e);
    }
    match outcome {
        CompileOutcome::Completed => info!("painting finished: {presses} strokes"),
        CompileOutcome::Cancelled { at } => {
            info!("painting cancelled at mask cell {at} after {presses} strokes")
        }
    }
    Ok(PaintReport { presses, releases, outcome })
}
