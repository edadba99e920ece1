pub mod hit;
pub mod input;
pub mod resize;
pub mod session;
pub mod shortcuts;
pub mod snap;
pub mod tools;

pub use hit::{hit_handle, hit_test, hit_test_rect, selection_bounds};
pub use input::{InputEvent, Modifiers};
pub use resize::{Geometry, Handle, ResizeSession, compute_resize};
pub use session::{EditContext, Gesture, InteractionSession, TransformOutcome, nudge};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use snap::{SnapGuide, SnapRequest, SnapResult, detect_snap};
pub use tools::{SelectTool, ToolEffect};
