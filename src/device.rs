//! Collaborator seams: the pointer that receives gestures, the focus probe
//! that can cancel a scan, and the clock that paces everything.

use crate::error::Result;
use crate::types::Point;
use log::{debug, info};
use std::thread;
use std::time::Duration;

/// Something that can hold a button down and move around.
///
/// All three calls work in one consistent coordinate space; mapping mask
/// cells onto it is the caller's business.
pub trait PointerDevice {
    /// Move to `p` and push the button down.
    fn press(&mut self, p: Point) -> Result<()>;
    /// Move to `p` and let the button go.
    fn release(&mut self, p: Point) -> Result<()>;
    /// Move to `p` without touching the button.
    fn move_to(&mut self, p: Point) -> Result<()>;
}

impl<D: PointerDevice + ?Sized> PointerDevice for &mut D {
    fn press(&mut self, p: Point) -> Result<()> {
        (**self).press(p)
    }
    fn release(&mut self, p: Point) -> Result<()> {
        (**self).release(p)
    }
    fn move_to(&mut self, p: Point) -> Result<()> {
        (**self).move_to(p)
    }
}

/// Whether the target surface still receives input.
pub trait FocusCheck {
    fn is_focused(&mut self) -> bool;
}

impl<F: FnMut() -> bool> FocusCheck for F {
    fn is_focused(&mut self) -> bool {
        self()
    }
}

/// Blocking delay source.
pub trait Clock {
    fn sleep(&mut self, millis: u64);
}

/// Real wall-clock sleeps on the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&mut self, millis: u64) {
        if millis > 0 {
            thread::sleep(Duration::from_millis(millis));
        }
    }
}

/// Dry-run pointer: logs every call and counts them, never fails.
#[derive(Debug, Default)]
pub struct LogDevice {
    pub presses: usize,
    pub releases: usize,
    pub moves: usize,
}

impl PointerDevice for LogDevice {
    fn press(&mut self, p: Point) -> Result<()> {
        self.presses += 1;
        info!("press   {p}");
        Ok(())
    }

    fn release(&mut self, p: Point) -> Result<()> {
        self.releases += 1;
        info!("release {p}");
        Ok(())
    }

    fn move_to(&mut self, p: Point) -> Result<()> {
        self.moves += 1;
        debug!("move    {p}");
        Ok(())
    }
}
