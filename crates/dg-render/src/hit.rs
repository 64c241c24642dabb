//! Hit testing: canvas point → placed plant lookup.
//!
//! Walks the layout in reverse insertion order (last painted = topmost)
//! and returns the first plant whose footprint contains the point.

use dg_core::{Layout, PlacedPlant, PlacementId};
use kurbo::{Point, Rect, Size};

/// Side of a plant card's square footprint at scale 1.0, in canvas pixels.
pub const PLANT_FOOTPRINT: f64 = 72.0;

/// Footprint of a placed plant: a square centred on its position, scaled
/// by its scale factor.
pub fn footprint(entry: &PlacedPlant) -> Rect {
    let side = PLANT_FOOTPRINT * entry.scale;
    Rect::from_center_size(entry.position, Size::new(side, side))
}

/// Find the topmost plant at `point`.
/// Returns `None` if the point is over empty canvas.
pub fn hit_test(layout: &Layout, point: Point) -> Option<PlacementId> {
    layout
        .entries()
        .iter()
        .rev()
        .find(|entry| footprint(entry).contains(point))
        .map(|entry| entry.id)
}
