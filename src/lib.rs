#![warn(clippy::all, rust_2018_idioms)]

pub mod command;
pub mod context;
pub mod drawing;
pub mod error;
pub mod overlay;
pub mod persistence;
pub mod settings;
pub mod shape;
pub mod surface;
pub mod tools;
pub mod transform;

pub use command::{DrawingOperation, OperationStack};
pub use context::ToolOperationContext;
pub use drawing::Drawing;
pub use error::EngineError;
pub use overlay::{EditingOverlay, OverlayRegion};
pub use settings::{ToolSettings, UserSettings};
pub use shape::Shape;
pub use surface::RenderSurface;
pub use tools::Tool;
pub use transform::ShapeTransform;
