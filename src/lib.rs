#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod command;
pub mod error;
pub mod export;
pub mod palette;
pub mod renderer;
pub mod stroke;
pub mod swatch;

pub use app::PaintApp;
pub use canvas::{Canvas, CaptureState, PointerEvent};
pub use command::CanvasCommand;
pub use error::{ExportError, ExportResult};
pub use export::{ExportOutcome, SavePathPicker};
pub use palette::Palette;
pub use stroke::{Stroke, StrokeStyle};
pub use swatch::{Swatch, SwatchKind};
