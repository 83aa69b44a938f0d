#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod file_handler;
pub mod geometry;
pub mod input;
pub mod panels;
pub mod service;
pub mod style;
pub mod surface;
pub mod task;
pub mod tool;

pub use app::{InkFlowApp, View};
pub use config::AppConfig;
pub use error::{ConfigError, ExportError, PhotoError, ServiceError};
pub use input::{ContactSource, GestureRouter, HeldContacts, InputEvent, InputLocation, SurfaceArea};
pub use service::{CalligraphyService, EncodedImage, UnconfiguredService};
pub use surface::{DrawingSurface, GestureState};
pub use tool::{InkColor, StrokeWidth};
