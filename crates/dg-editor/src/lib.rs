pub mod editor;
pub mod input;
pub mod tools;

pub use editor::{LayoutMutation, PlacementEditor};
pub use input::InputEvent;
pub use tools::{DragState, MoveTool};
