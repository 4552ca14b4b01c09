// Core types shared by the compiler, the drag helper and the canvas.

use std::fmt;

/// Software pixel buffer the preview canvas draws into.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the canvas is on screen (pixels)
    pub height: usize,     // how tall the canvas is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A buffer of `width * height` pixels all set to `color`.
    pub fn filled(width: usize, height: usize, color: u32) -> Self {
        Self { width, height, pixels: vec![color; width * height] }
    }

    /// Color at (x,y), or None outside the buffer.
    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }
}

/// Integer position in whatever space the receiver works in
/// (mask cells for the compiler, device pixels for a pointer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One pen instruction in mask coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    Press(Point),
    Release(Point),
}

impl GestureEvent {
    pub fn point(&self) -> Point {
        match *self {
            GestureEvent::Press(p) | GestureEvent::Release(p) => p,
        }
    }

    pub fn is_press(&self) -> bool {
        matches!(self, GestureEvent::Press(_))
    }
}

impl fmt::Display for GestureEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureEvent::Press(p) => write!(f, "press {} {}", p.x, p.y),
            GestureEvent::Release(p) => write!(f, "release {} {}", p.x, p.y),
        }
    }
}

/// Maximal `[start, end)` stretch of ink cells inside one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub y: usize,
    pub start: usize,
    pub end: usize,
}
