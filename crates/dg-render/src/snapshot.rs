//! Export snapshot: a fixed-size, titled picture of the layout.
//!
//! The live canvas can be any size, so each plant's position is mapped
//! proportionally into the snapshot's garden area:
//!
//! ```text
//! area_x = area.x0 + (x / canvas.width)  * area.width
//! area_y = area.y0 + (y / canvas.height) * area.height
//! ```
//!
//! Plants outside the live canvas stay outside the area; nothing is
//! clipped or clamped.

use crate::error::ExportError;
use crate::icon::PlantIcon;
use dg_core::{CanvasSize, Layout};
use kurbo::{Point, Rect, Size};

/// Snapshot width in CSS pixels (before density scaling).
pub const SNAPSHOT_WIDTH: f64 = 800.0;
/// Snapshot height in CSS pixels (before density scaling).
pub const SNAPSHOT_HEIGHT: f64 = 600.0;
/// Inner padding of the snapshot container.
pub const SNAPSHOT_PADDING: f64 = 20.0;
/// Height of the garden area below the title block.
pub const AREA_HEIGHT: f64 = 480.0;
/// Snapshot heading.
pub const SNAPSHOT_TITLE: &str = "My Dream Garden";

/// Font sizes.
pub const TITLE_SIZE: f64 = 28.0;
pub const DATE_SIZE: f64 = 14.0;
pub const ICON_SIZE: f64 = 32.0;
pub const LABEL_SIZE: f64 = 12.0;

/// Card padding around icon and label.
pub const CARD_PADDING: f64 = 12.0;
/// Gap between icon and label.
pub const CARD_GAP: f64 = 4.0;
/// Rough advance of one bold 12px label character.
const LABEL_CHAR_WIDTH: f64 = 7.0;

/// One plant card in the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneItem {
    pub icon: PlantIcon,
    pub label: String,
    /// Card centre in snapshot coordinates.
    pub center: Point,
    pub scale: f64,
}

impl SceneItem {
    /// Unscaled card size: wide enough for the icon or the label.
    pub fn card_size(&self) -> Size {
        let label_width = self.label.chars().count() as f64 * LABEL_CHAR_WIDTH;
        let content_width = label_width.max(ICON_SIZE);
        let content_height = ICON_SIZE + CARD_GAP + LABEL_SIZE * 1.25;
        Size::new(
            content_width + CARD_PADDING * 2.0,
            content_height + CARD_PADDING * 2.0,
        )
    }
}

/// Everything the SVG writer needs, already positioned.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportScene {
    pub title: String,
    pub date_label: String,
    pub size: Size,
    /// Garden area in snapshot coordinates.
    pub area: Rect,
    pub items: Vec<SceneItem>,
}

impl ExportScene {
    /// Lay out the snapshot for `layout` as seen on a canvas of `canvas`.
    pub fn build(
        layout: &Layout,
        canvas: CanvasSize,
        date_label: &str,
    ) -> Result<Self, ExportError> {
        if canvas.is_empty() {
            return Err(ExportError::EmptyCanvas {
                width: canvas.width,
                height: canvas.height,
            });
        }

        let area = snapshot_area();
        let items = layout
            .iter()
            .map(|entry| SceneItem {
                icon: PlantIcon::for_plant(&entry.plant),
                label: entry.plant.common_name.clone(),
                center: Point::new(
                    area.x0 + entry.position.x / canvas.width * area.width(),
                    area.y0 + entry.position.y / canvas.height * area.height(),
                ),
                scale: entry.scale,
            })
            .collect();

        Ok(Self {
            title: SNAPSHOT_TITLE.to_string(),
            date_label: date_label.to_string(),
            size: Size::new(SNAPSHOT_WIDTH, SNAPSHOT_HEIGHT),
            area,
            items,
        })
    }

    /// Baseline of the title text.
    pub fn title_baseline(&self) -> f64 {
        SNAPSHOT_PADDING + TITLE_SIZE
    }

    /// Baseline of the date line.
    pub fn date_baseline(&self) -> f64 {
        self.title_baseline() + 10.0 + DATE_SIZE + 4.0
    }
}

/// Garden area: full inner width, bottom-aligned inside the padding.
fn snapshot_area() -> Rect {
    let y1 = SNAPSHOT_HEIGHT - SNAPSHOT_PADDING;
    Rect::new(
        SNAPSHOT_PADDING,
        y1 - AREA_HEIGHT,
        SNAPSHOT_WIDTH - SNAPSHOT_PADDING,
        y1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dg_core::{PlacedPlant, PlacementId, PlantRecord};
    use pretty_assertions::assert_eq;

    fn layout_with(x: f64, y: f64, scale_delta: f64) -> Layout {
        let mut entry = PlacedPlant::new(
            PlantRecord::new(2, "Sunflower", "Helianthus annuus", "Asteraceae"),
            PlacementId::intern("garden-snap-1"),
            Point::new(x, y),
        );
        entry.rescale(scale_delta);
        let mut layout = Layout::new();
        layout.push(entry);
        layout
    }

    #[test]
    fn positions_map_proportionally() {
        let layout = layout_with(400.0, 200.0, 0.0);
        let scene = ExportScene::build(&layout, CanvasSize::new(800.0, 400.0), "1/2/2026").unwrap();
        assert_eq!(scene.area, Rect::new(20.0, 100.0, 780.0, 580.0));
        let item = &scene.items[0];
        assert_eq!(item.center, Point::new(400.0, 340.0));
        assert!(matches!(item.icon, PlantIcon::Bloom { .. }));
        assert_eq!(item.label, "Sunflower");
        assert_eq!(item.scale, 1.0);
    }

    #[test]
    fn origin_maps_to_area_corner_and_scale_carries() {
        let layout = layout_with(0.0, 0.0, 0.4);
        let scene = ExportScene::build(&layout, CanvasSize::new(1000.0, 500.0), "").unwrap();
        assert_eq!(scene.items[0].center, Point::new(20.0, 100.0));
        assert!((scene.items[0].scale - 1.4).abs() < 1e-9);
    }

    #[test]
    fn empty_canvas_is_an_error() {
        let layout = layout_with(10.0, 10.0, 0.0);
        let err = ExportScene::build(&layout, CanvasSize::new(0.0, 400.0), "").unwrap_err();
        assert!(matches!(err, ExportError::EmptyCanvas { .. }));
    }

    #[test]
    fn card_fits_long_labels() {
        let item = SceneItem {
            icon: PlantIcon::Sprout,
            label: "Begonia × semperflorens".to_string(),
            center: Point::ZERO,
            scale: 1.0,
        };
        assert!(item.card_size().width > ICON_SIZE + CARD_PADDING * 2.0);
    }
}
