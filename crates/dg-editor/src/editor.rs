//! Placement editor: owns the layout and applies every change to it.
//!
//! All canvas interaction funnels through `LayoutMutation`s:
//!
//! - **Catalog drops** build a `Place` mutation with a fresh placement id.
//! - **Pointer input** goes through the `MoveTool`, which emits `MoveEntry`
//!   while a drag is active.
//! - **Buttons** (resize, remove, clear) call the editor directly.
//!
//! Persistence goes through a `KeyValueStore` the host supplies, so the
//! same editor runs against browser storage, a JSON file, or memory.

use crate::input::InputEvent;
use crate::tools::{DragState, MoveTool};
use dg_core::{
    CanvasSize, Clock, KeyValueStore, Layout, PlacedPlant, PlacementId, PlantRecord, Point,
    StoreError, erase_layout, load_layout, save_layout,
};
use dg_render::{ExportArtifact, ExportError, ExportFormat, export_layout, hit_test};

/// A single change to the layout.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutMutation {
    Place(Box<PlacedPlant>),
    MoveEntry { id: PlacementId, to: Point },
    Resize { id: PlacementId, delta: f64 },
    Remove { id: PlacementId },
    Clear,
}

pub struct PlacementEditor<S> {
    layout: Layout,
    store: S,
    tool: MoveTool,
    canvas: CanvasSize,
    clock: Box<dyn Clock>,
}

impl<S: KeyValueStore> PlacementEditor<S> {
    /// Create an editor with an empty layout. Call `load` to pick up a
    /// previously saved garden.
    pub fn new(store: S, clock: impl Clock + 'static) -> Self {
        Self {
            layout: Layout::new(),
            store,
            tool: MoveTool::new(),
            canvas: CanvasSize::default(),
            clock: Box::new(clock),
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn drag_state(&self) -> DragState {
        self.tool.state()
    }

    pub fn canvas_size(&self) -> CanvasSize {
        self.canvas
    }

    /// Track the live canvas extent; export maps positions against it.
    pub fn set_canvas_size(&mut self, canvas: CanvasSize) {
        self.canvas = canvas;
    }

    /// Entries in paint order: insertion order, with the active drag
    /// target moved last so it draws on top.
    pub fn render_order(&self) -> Vec<&PlacedPlant> {
        let target = self.tool.state().target();
        let mut order: Vec<&PlacedPlant> = self
            .layout
            .iter()
            .filter(|entry| Some(entry.id) != target)
            .collect();
        if let Some(active) = target.and_then(|id| self.layout.get(id)) {
            order.push(active);
        }
        order
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    /// Apply a mutation. Returns `true` if the layout changed.
    pub fn apply(&mut self, mutation: LayoutMutation) -> bool {
        match mutation {
            LayoutMutation::Place(entry) => self.layout.push(*entry),
            LayoutMutation::MoveEntry { id, to } => match self.layout.get_mut(id) {
                Some(entry) => {
                    entry.position = to;
                    true
                }
                None => false,
            },
            LayoutMutation::Resize { id, delta } => match self.layout.get_mut(id) {
                Some(entry) => {
                    let before = entry.scale;
                    entry.rescale(delta) != before
                }
                None => false,
            },
            LayoutMutation::Remove { id } => {
                if self.tool.state().target() == Some(id) {
                    self.tool.cancel();
                }
                self.layout.remove(id).is_some()
            }
            LayoutMutation::Clear => {
                self.tool.cancel();
                let changed = !self.layout.is_empty();
                self.layout.clear();
                changed
            }
        }
    }

    /// Drop `plant` onto the canvas at `drop`. The new entry gets a fresh
    /// placement id and the default scale.
    pub fn place_from_catalog(&mut self, plant: PlantRecord, drop: Point) -> PlacedPlant {
        let id = self.fresh_id();
        let entry = PlacedPlant::new(plant, id, drop);
        log::debug!("placed {} as {id}", entry.plant.display_name());
        self.apply(LayoutMutation::Place(Box::new(entry.clone())));
        entry
    }

    /// Make `id` the active drag target, grabbed at `pointer`.
    /// Unknown ids leave the editor Idle. Returns whether a drag started.
    pub fn begin_drag(&mut self, id: PlacementId, pointer: Point) -> bool {
        match self.layout.get(id) {
            Some(entry) => {
                self.tool.begin(id, entry.position, pointer);
                true
            }
            None => {
                log::debug!("begin_drag: no plant {id}");
                self.tool.cancel();
                false
            }
        }
    }

    /// Add `delta` to an entry's scale, clamped. `None` if the entry is
    /// not in the layout.
    pub fn resize(&mut self, id: PlacementId, delta: f64) -> Option<f64> {
        self.apply(LayoutMutation::Resize { id, delta });
        self.layout.get(id).map(|entry| entry.scale)
    }

    /// Delete an entry. No-op if it is not in the layout.
    pub fn remove(&mut self, id: PlacementId) -> bool {
        self.apply(LayoutMutation::Remove { id })
    }

    /// Empty the layout and erase the saved copy.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.apply(LayoutMutation::Clear);
        erase_layout(&mut self.store)
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Route an input event through the move tool and apply what it emits.
    pub fn handle_input(&mut self, event: InputEvent) {
        let hit = match event {
            InputEvent::PointerDown { .. } => hit_test(&self.layout, event.position())
                .and_then(|id| self.layout.get(id).map(|entry| (id, entry.position))),
            _ => None,
        };
        for mutation in self.tool.handle(&event, hit) {
            self.apply(mutation);
        }
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.handle_input(InputEvent::from_pointer_down(x, y));
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.handle_input(InputEvent::from_pointer_move(x, y));
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) {
        self.handle_input(InputEvent::from_pointer_up(x, y));
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// Write the whole layout to the store.
    pub fn save(&mut self) -> Result<(), StoreError> {
        save_layout(&mut self.store, &self.layout)
    }

    /// Replace the layout with the saved one. Missing or malformed data
    /// loads as an empty layout. Returns the number of entries loaded.
    pub fn load(&mut self) -> usize {
        self.tool.cancel();
        self.layout = load_layout(&self.store);
        self.layout.len()
    }

    // ─── Export ──────────────────────────────────────────────────────────

    /// Render the current layout. The file name is stamped with the
    /// editor's clock.
    pub fn export(
        &self,
        format: ExportFormat,
        date_label: &str,
    ) -> Result<ExportArtifact, ExportError> {
        export_layout(
            &self.layout,
            self.canvas,
            format,
            date_label,
            self.clock.now_ms(),
        )
    }

    fn fresh_id(&self) -> PlacementId {
        loop {
            let id = PlacementId::generate(self.clock.now_ms());
            if !self.layout.contains(id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dg_core::{FixedClock, MemoryStore, RESIZE_STEP};

    fn editor() -> PlacementEditor<MemoryStore> {
        PlacementEditor::new(MemoryStore::new(), FixedClock(1_700_000_000_000))
    }

    fn rose() -> PlantRecord {
        PlantRecord::new(1, "Rose", "Rosa rubiginosa", "Rosaceae")
    }

    #[test]
    fn placed_entries_get_default_scale() {
        let mut ed = editor();
        let entry = ed.place_from_catalog(rose(), Point::new(40.0, 50.0));
        assert_eq!(entry.scale, 1.0);
        assert!(entry.id.as_str().starts_with("garden-1700000000000-"));
        assert_eq!(ed.layout().len(), 1);
    }

    #[test]
    fn resize_unknown_entry_is_none() {
        let mut ed = editor();
        assert_eq!(ed.resize(PlacementId::intern("garden-missing"), RESIZE_STEP), None);
    }

    #[test]
    fn removing_drag_target_resets_state() {
        let mut ed = editor();
        let entry = ed.place_from_catalog(rose(), Point::new(100.0, 100.0));
        assert!(ed.begin_drag(entry.id, Point::new(100.0, 100.0)));
        assert!(ed.remove(entry.id));
        assert_eq!(ed.drag_state(), DragState::Idle);
        assert!(!ed.remove(entry.id));
    }

    #[test]
    fn begin_drag_on_unknown_stays_idle() {
        let mut ed = editor();
        assert!(!ed.begin_drag(PlacementId::intern("garden-ghost"), Point::ZERO));
        assert_eq!(ed.drag_state(), DragState::Idle);
    }

    #[test]
    fn drag_target_renders_last() {
        let mut ed = editor();
        let a = ed.place_from_catalog(rose(), Point::new(100.0, 100.0));
        let b = ed.place_from_catalog(rose(), Point::new(300.0, 100.0));

        let ids: Vec<_> = ed.render_order().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);

        ed.pointer_down(100.0, 100.0);
        let ids: Vec<_> = ed.render_order().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[test]
    fn export_uses_canvas_and_clock() {
        let mut ed = editor();
        ed.place_from_catalog(rose(), Point::new(10.0, 10.0));
        ed.set_canvas_size(CanvasSize::new(0.0, 300.0));
        assert!(matches!(
            ed.export(ExportFormat::Png, ""),
            Err(ExportError::EmptyCanvas { .. })
        ));

        ed.set_canvas_size(CanvasSize::default());
        let artifact = ed.export(ExportFormat::Png, "").unwrap();
        assert_eq!(artifact.file_name, "dream-garden-1700000000000.png");
    }
}
