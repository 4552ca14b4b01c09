pub mod canvas;
pub mod config;
pub mod device;
pub mod drag;
pub mod error;
pub mod mask;
pub mod replay;
pub mod stroke;
pub mod types;

pub use crate::device::{Clock, FocusCheck, LogDevice, PointerDevice, SystemClock};
pub use crate::drag::{drag, DragOptions};
pub use crate::error::{Error, Result};
pub use crate::mask::Mask;
pub use crate::replay::{paint, PaintReport, ReplaySettings};
pub use crate::stroke::{compile, compile_to_vec, CompileOutcome};
pub use crate::types::{GestureEvent, Point, Run};
