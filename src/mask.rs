// Binary ink mask built from a picture and a luminance cutoff.
// Visual expectation: every cell that is `true` is a pixel the pen will cover;
// everything else stays the color of the paper.
use crate::error::{Error, Result};
use crate::types::Run;
use image::imageops::FilterType;
use image::DynamicImage;
use std::path::Path;

/// Immutable 2-D grid of ink cells, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: usize,
    height: usize,
    ink: Vec<bool>, // length = width * height
}

impl Mask {
    /// Wrap a row-major cell vector. Fails if the length does not match.
    pub fn new(width: usize, height: usize, ink: Vec<bool>) -> Result<Self> {
        if ink.len() != width * height {
            return Err(Error::InvalidArgument(format!(
                "mask: expected {} cells for {width}x{height}, got {}",
                width * height,
                ink.len()
            )));
        }
        Ok(Self { width, height, ink })
    }

    /// Build a mask by asking `f(x, y)` about every cell.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut ink = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                ink.push(f(x, y));
            }
        }
        Self { width, height, ink }
    }

    /// Threshold a picture: luminance strictly below `threshold` becomes ink.
    /// Visual: dark areas of the source are what ends up drawn.
    pub fn from_image(image: &DynamicImage, threshold: u8) -> Self {
        let gray = image.to_luma8();
        let (w, h) = gray.dimensions();
        Self::from_fn(w as usize, h as usize, |x, y| {
            gray.get_pixel(x as u32, y as u32)[0] < threshold
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Ink at (x,y). Callers stay inside `0..width`, `0..height`.
    #[inline]
    pub fn ink(&self, x: usize, y: usize) -> bool {
        self.ink[y * self.width + x]
    }

    pub fn is_blank(&self) -> bool {
        !self.ink.iter().any(|&c| c)
    }

    /// Maximal ink runs of row `y`, left to right.
    pub fn runs(&self, y: usize) -> Vec<Run> {
        let mut out = Vec::new();
        let mut start = None;
        for x in 0..self.width {
            match (self.ink(x, y), start) {
                (true, None) => start = Some(x),
                (false, Some(s)) => {
                    out.push(Run { y, start: s, end: x });
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            out.push(Run { y, start: s, end: self.width });
        }
        out
    }

    /// Number of press/release pairs a full compile of this mask produces.
    pub fn stroke_count(&self) -> usize {
        (0..self.height).map(|y| self.runs(y).len()).sum()
    }
}

/// Open and decode a picture from disk.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|e| Error::ImageLoad(format!("{}: {e}", path.display())))
}

/// Shrink `image` so it fits inside `max_width` x `max_height`, keeping the
/// aspect ratio. Never enlarges; a zero bound disables fitting.
pub fn fit_within(image: DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    if max_width == 0 || max_height == 0 {
        return image;
    }
    if image.width() <= max_width && image.height() <= max_height {
        return image;
    }
    image.resize(max_width, max_height, FilterType::Triangle)
}
