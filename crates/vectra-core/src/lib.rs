pub mod bounds;
pub mod canvas;
pub mod config;
pub mod id;
pub mod model;

pub use bounds::Bounds;
pub use canvas::{CanvasSize, Viewport};
pub use config::{EngineConfig, SnapConfig};
pub use id::ElementId;
pub use model::*;

// Re-export kurbo primitives so downstream crates agree on one version.
pub use kurbo::{Point, Rect, Vec2};
