#![warn(clippy::all, rust_2018_idioms)]

pub mod canvas;
pub mod classify;
pub mod config;
pub mod error;
pub mod input;
pub mod path;
pub mod raster;
pub mod renderer;
pub mod shell;
pub mod style;
pub mod texture;

pub use canvas::StrokeCanvas;
pub use classify::{AssetStore, BundledAssets, Classifier};
pub use config::{CanvasConfig, CanvasMode, ShellConfig, ShellMessages};
pub use error::{AssetError, ClassifyError, ConfigError};
pub use input::{TouchEvent, TouchPhase, TouchTracker};
pub use path::StrokePath;
pub use raster::RasterSurface;
pub use renderer::CanvasPainter;
pub use shell::Shell;
pub use style::{LineCap, LineJoin, StrokeStyle};
pub use texture::RasterTextures;
