//! Move tool: the drag-to-move state machine for placed plants.
//!
//! ```text
//!            pointer-down on a plant
//!   Idle ──────────────────────────────▶ Dragging { target, offset }
//!    ▲                                      │  pointer-move → MoveEntry
//!    └──────────────────────────────────────┘
//!            pointer-up (anywhere)
//! ```
//!
//! The tool owns only the drag state. It turns input events into
//! `LayoutMutation`s which the editor applies; it never touches the
//! layout directly, so the lifecycle can be driven without a canvas.

use crate::editor::LayoutMutation;
use crate::input::InputEvent;
use dg_core::{PlacementId, Point, Vec2};

/// Where the pointer-drag lifecycle currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Plant being moved.
        target: PlacementId,
        /// Plant position minus pointer position at grab time. Keeps the
        /// grabbed point under the pointer for the whole drag.
        offset: Vec2,
    },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// The plant being dragged, if any.
    pub fn target(&self) -> Option<PlacementId> {
        match self {
            Self::Dragging { target, .. } => Some(*target),
            Self::Idle => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct MoveTool {
    state: DragState,
}

impl MoveTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Start dragging `target`, currently at `entry_position`, grabbed at
    /// `pointer`.
    pub fn begin(&mut self, target: PlacementId, entry_position: Point, pointer: Point) {
        self.state = DragState::Dragging {
            target,
            offset: entry_position - pointer,
        };
        log::debug!("drag start {target}");
    }

    /// Drop back to Idle without any further mutation.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Handle an input event. `hit` is the plant under the pointer (and its
    /// current position) as found by hit testing.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        hit: Option<(PlacementId, Point)>,
    ) -> Vec<LayoutMutation> {
        match event {
            InputEvent::PointerDown { .. } => {
                match hit {
                    Some((id, position)) => self.begin(id, position, event.position()),
                    None => self.state = DragState::Idle,
                }
                // Press alone doesn't mutate
                vec![]
            }
            InputEvent::PointerMove { .. } => match self.state {
                DragState::Dragging { target, offset } => vec![LayoutMutation::MoveEntry {
                    id: target,
                    to: event.position() + offset,
                }],
                DragState::Idle => vec![],
            },
            InputEvent::PointerUp { .. } => {
                if let Some(target) = self.state.target() {
                    log::debug!("drag end {target}");
                }
                self.state = DragState::Idle;
                vec![]
            }
        }
    }
}
