// Preview drawing surface: a window that behaves like a paint program.
// Visual effects provided here:
// 1) A white sheet that the replayed pen draws black strokes onto.
// 2) A frame around the region the mask will land in.
// 3) A crosshair that follows the pen, with a ring while the button is down.
// 4) A tiny 5x7 bitmap font for the status line.

use crate::device::{FocusCheck, PointerDevice};
use crate::error::{Error, Result};
use crate::types::{FrameBuffer, Point};
use log::{debug, warn};
use minifb::{Key, Window, WindowOptions};
use std::cell::RefCell;
use std::time::{Duration, Instant};

pub const PAPER: u32 = 0x00_FF_FF_FF;
pub const INK: u32 = 0x00_00_00_00;
const FRAME_COLOR: u32 = 0x00_33_99_FF;
const CURSOR_COLOR: u32 = 0x00_FF_33_33;
const HUD_COLOR: u32 = 0x00_20_20_20;
const PRESENT_EVERY: Duration = Duration::from_millis(16);

/// Outline rectangle in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub origin: Point,
    pub width: i32,
    pub height: i32,
}

/* ---------- Sheet: the pen model, no window attached ---------- */

/// The paper plus the pen that draws on it.
/// Press dabs one pixel; any motion with the button down leaves a 1-px line.
pub struct Sheet {
    pub paper: FrameBuffer,
    cursor: Point,
    down: bool,
}

impl Sheet {
    pub fn new(width: usize, height: usize) -> Self {
        Self { paper: FrameBuffer::filled(width, height, PAPER), cursor: Point::default(), down: false }
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn pen_down(&self) -> bool {
        self.down
    }

    fn travel(&mut self, to: Point) {
        if self.down {
            draw_line(&mut self.paper, self.cursor.x, self.cursor.y, to.x, to.y, INK);
        }
        self.cursor = to;
    }
}

impl PointerDevice for Sheet {
    fn press(&mut self, p: Point) -> Result<()> {
        self.travel(p);
        self.down = true;
        put_pixel(&mut self.paper, p.x, p.y, INK);
        Ok(())
    }

    fn release(&mut self, p: Point) -> Result<()> {
        self.travel(p);
        self.down = false;
        Ok(())
    }

    fn move_to(&mut self, p: Point) -> Result<()> {
        self.travel(p);
        Ok(())
    }
}

/* ---------- Canvas: the sheet shown in a window ---------- */

pub struct Canvas {
    window: Window,       // the on-screen window you see
    sheet: Sheet,         // what has been drawn so far
    screen: FrameBuffer,  // sheet + overlays, rebuilt on each present
    region: Option<Region>,
    status: String,
    last_present: Instant,
}

impl Canvas {
    /// Open a window of the given size.
    /// Visual: a new blank white window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self {
            window,
            sheet: Sheet::new(width, height),
            screen: FrameBuffer::filled(width, height, PAPER),
            region: None,
            status: String::new(),
            last_present: Instant::now(),
        })
    }

    /// Frame the area the picture is expected to occupy.
    pub fn set_region(&mut self, region: Region) {
        self.region = Some(region);
    }

    /// Replace the HUD line. Only the glyphs in `glyph5x7` show up.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down.
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Push sheet + overlays to the screen.
    /// Visual: the window immediately shows everything drawn so far.
    pub fn present(&mut self) -> Result<()> {
        self.screen.pixels.copy_from_slice(&self.sheet.paper.pixels);

        if let Some(r) = self.region {
            draw_rect(&mut self.screen, r.origin.x - 1, r.origin.y - 1, r.width + 2, r.height + 2, FRAME_COLOR);
        }
        let c = self.sheet.cursor();
        draw_crosshair(&mut self.screen, c.x, c.y, 8, CURSOR_COLOR);
        if self.sheet.pen_down() {
            draw_circle(&mut self.screen, c.x, c.y, 5, CURSOR_COLOR);
        }
        draw_text_5x7(&mut self.screen, 8, 8, &self.status, HUD_COLOR);

        self.window
            .update_with_buffer(&self.screen.pixels, self.screen.width, self.screen.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        self.last_present = Instant::now();
        Ok(())
    }

    /// Present only if the last frame is older than one refresh.
    fn present_if_due(&mut self) -> Result<()> {
        if self.last_present.elapsed() >= PRESENT_EVERY {
            self.present()?;
        }
        Ok(())
    }

    /// Keep showing the result until the user closes the window or hits ESC.
    pub fn wait_for_close(&mut self) -> Result<()> {
        debug!("canvas: waiting for the window to close");
        while self.is_open() && !self.esc_pressed() {
            self.present()?;
        }
        Ok(())
    }
}

impl PointerDevice for Canvas {
    fn press(&mut self, p: Point) -> Result<()> {
        self.sheet.press(p)?;
        self.present_if_due()
    }

    fn release(&mut self, p: Point) -> Result<()> {
        self.sheet.release(p)?;
        self.present_if_due()
    }

    fn move_to(&mut self, p: Point) -> Result<()> {
        self.sheet.move_to(p)?;
        self.present_if_due()
    }
}

impl FocusCheck for Canvas {
    /// Focus is gone once the window closes or ESC is held.
    /// Presenting here also pumps window events while nothing is being drawn.
    fn is_focused(&mut self) -> bool {
        if let Err(e) = self.present_if_due() {
            warn!("canvas: {e}");
            return false;
        }
        self.is_open() && !self.esc_pressed()
    }
}

// The replay needs the canvas as pointer and as focus probe at the same time.
impl PointerDevice for &RefCell<Canvas> {
    fn press(&mut self, p: Point) -> Result<()> {
        self.borrow_mut().press(p)
    }

    fn release(&mut self, p: Point) -> Result<()> {
        self.borrow_mut().release(p)
    }

    fn move_to(&mut self, p: Point) -> Result<()> {
        self.borrow_mut().move_to(p)
    }
}

/* ---------- Software drawing: pixels, lines, shapes, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
/// Visual: a straight 1-pixel line, the same thing a paint program's pencil leaves.
fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0, x1, y1) = (x0, y0, x1, y1);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Outline of a `w` x `h` rectangle with its top-left at (x,y).
pub fn draw_rect(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, color: u32) {
    if w <= 0 || h <= 0 {
        return;
    }
    let (x1, y1) = (x + w - 1, y + h - 1);
    draw_line(fb, x, y, x1, y, color);
    draw_line(fb, x, y1, x1, y1, color);
    draw_line(fb, x, y, x, y1, color);
    draw_line(fb, x1, y, x1, y1, color);
}

/// Midpoint circle outline of radius `r` around (cx,cy).
pub fn draw_circle(fb: &mut FrameBuffer, cx: i32, cy: i32, r: i32, color: u32) {
    let (mut x, mut y) = (r, 0);
    let mut err = 1 - r;
    while x >= y {
        for (dx, dy) in [(x, y), (y, x), (-y, x), (-x, y), (-x, -y), (-y, -x), (y, -x), (x, -y)] {
            put_pixel(fb, cx + dx, cy + dy, color);
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Draw a small crosshair centered at (cx,cy).
/// Visual: a "+" shape (with a tiny gap at the center) follows the pen.
pub fn draw_crosshair(fb: &mut FrameBuffer, cx: i32, cy: i32, size: i32, color: u32) {
    draw_line(fb, cx - size, cy, cx - 2, cy, color);
    draw_line(fb, cx + 2, cy, cx + size, cy, color);
    draw_line(fb, cx, cy - size, cx, cy - 2, color);
    draw_line(fb, cx, cy + 2, cx, cy + size, color);
}

/* ---------- 5x7 bitmap font (digits, A-Z, a little punctuation) ---------- */

/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '>' => g!(0b01000,0b00100,0b00010,0b00001,0b00010,0b00100,0b01000),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y).
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx as i32, y + ry as i32, color);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs, 1 pixel apart.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}
