//! Raster-to-gesture compilation.
//!
//! Walks a [`Mask`] row by row, left to right, and turns every horizontal ink
//! run into one press/release pair. The pen state survives across pixels of a
//! row but is always lifted at the end of the row.

use crate::device::FocusCheck;
use crate::mask::Mask;
use crate::types::{GestureEvent, Point};
use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pen {
    Up,
    Down,
}

/// How a compile pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileOutcome {
    /// Every pixel was visited.
    Completed,
    /// Focus was lost right before visiting `at`; nothing at or after it was emitted.
    Cancelled { at: Point },
}

impl CompileOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CompileOutcome::Cancelled { .. })
    }
}

/// Scan `mask` and hand each gesture to `emit` in encounter order.
///
/// `focus` is polled once before every pixel. When it reports `false` the scan
/// stops on the spot, even with the pen down; no closing release is sent.
pub fn compile(
    mask: &Mask,
    focus: &mut impl FocusCheck,
    mut emit: impl FnMut(GestureEvent),
) -> CompileOutcome {
    let (w, h) = (mask.width(), mask.height());
    let mut pen = Pen::Up;

    for y in 0..h {
        for x in 0..w {
            if !focus.is_focused() {
                let at = Point::new(x as i32, y as i32);
                info!("compile: focus lost at {at}, stopping");
                return CompileOutcome::Cancelled { at };
            }

            match (mask.ink(x, y), pen) {
                (true, Pen::Up) => {
                    emit(GestureEvent::Press(Point::new(x as i32, y as i32)));
                    pen = Pen::Down;
                }
                (false, Pen::Down) => {
                    // close the run on its last ink column
                    emit(GestureEvent::Release(Point::new(x as i32 - 1, y as i32)));
                    pen = Pen::Up;
                }
                _ => {}
            }
        }

        // Row end with the pen down: release one column past the edge.
        if pen == Pen::Down {
            emit(GestureEvent::Release(Point::new(w as i32, y as i32)));
            pen = Pen::Up;
        }
        debug!("compile: row {y} done");
    }

    CompileOutcome::Completed
}

/// Full event list for `mask`, ignoring focus.
pub fn compile_to_vec(mask: &Mask) -> Vec<GestureEvent> {
    let mut events = Vec::with_capacity(mask.stroke_count() * 2);
    compile(mask, &mut || true, |e| events.push(e));
    events
}
