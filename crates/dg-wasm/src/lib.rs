//! WASM bridge for DreamGarden: exposes the placement editor, catalog and
//! exporter to the browser design page.
//!
//! Compiled via `wasm-pack build --target web`. The page keeps rendering
//! in the DOM; everything stateful lives in `GardenCanvas`.

mod host;

use dg_core::catalog::search;
use dg_core::{
    CanvasSize, CatalogResponse, FetchError, PlacementId, PlantRecord, Point, RESIZE_STEP,
    WeatherReport, effective_catalog, plant_glyph,
};
use dg_editor::PlacementEditor;
use dg_render::{ExportArtifact, ExportFormat, footprint};
use host::{HostClock, LocalStore};
use wasm_bindgen::prelude::*;

/// The main WASM-facing garden controller.
///
/// Owns the editor (layout, drag state, storage) and the catalog the page
/// picks plants from.
#[wasm_bindgen]
pub struct GardenCanvas {
    editor: PlacementEditor<LocalStore>,
    catalog: Vec<PlantRecord>,
}

#[wasm_bindgen]
impl GardenCanvas {
    /// Create a controller for a canvas of the given size and restore the
    /// saved garden, if any.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        host::install_console();

        let mut editor = PlacementEditor::new(LocalStore::open(), HostClock);
        editor.set_canvas_size(CanvasSize::new(width, height));
        let restored = editor.load();
        if restored > 0 {
            log::info!("restored garden with {restored} plants");
        }

        Self {
            editor,
            catalog: Vec::new(),
        }
    }

    /// Track the live canvas size; exports map positions against it.
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.editor.set_canvas_size(CanvasSize::new(width, height));
    }

    // ─── Catalog ─────────────────────────────────────────────────────────

    /// Load the body of a `/api/plants` response. A body that doesn't parse
    /// counts as a failed fetch. Returns the number of plants available.
    pub fn ingest_catalog(&mut self, body: &str) -> usize {
        let result = serde_json::from_str::<CatalogResponse>(body)
            .map_err(|e| FetchError::InvalidPayload(e.to_string()));
        self.catalog = effective_catalog(result);
        self.catalog.len()
    }

    /// The catalog request itself failed; switch to the demo plants.
    pub fn catalog_unavailable(&mut self, reason: &str) -> usize {
        self.catalog = effective_catalog(Err(FetchError::Network(reason.to_string())));
        self.catalog.len()
    }

    /// Catalog entries matching `term` (all of them up to the search limit
    /// when empty), as a JSON array with a glyph per plant.
    pub fn catalog_json(&self, term: &str) -> String {
        let plants: Vec<serde_json::Value> = search(&self.catalog, term)
            .into_iter()
            .map(|plant| {
                serde_json::json!({
                    "id": plant.id,
                    "name": plant.display_name(),
                    "scientificName": plant.scientific_name,
                    "family": plant.family,
                    "glyph": plant_glyph(&plant.common_name),
                })
            })
            .collect();
        serde_json::Value::Array(plants).to_string()
    }

    // ─── Editing ─────────────────────────────────────────────────────────

    /// Drop catalog plant `plant_id` at (x, y). Returns the new placement
    /// id, or `undefined` if the plant is not in the catalog.
    pub fn place(&mut self, plant_id: i64, x: f64, y: f64) -> Option<String> {
        let plant = self.catalog.iter().find(|p| p.id == plant_id)?.clone();
        let entry = self.editor.place_from_catalog(plant, Point::new(x, y));
        Some(entry.id.as_str().to_string())
    }

    /// Adjust a plant's scale by `delta`. Returns the new scale.
    pub fn resize(&mut self, id: &str, delta: f64) -> Option<f64> {
        self.editor.resize(PlacementId::intern(id), delta)
    }

    /// One `+` click.
    pub fn grow(&mut self, id: &str) -> Option<f64> {
        self.resize(id, RESIZE_STEP)
    }

    /// One `-` click.
    pub fn shrink(&mut self, id: &str) -> Option<f64> {
        self.resize(id, -RESIZE_STEP)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.editor.remove(PlacementId::intern(id))
    }

    /// Remove every plant and the saved design.
    pub fn clear(&mut self) -> Result<(), JsValue> {
        self.editor
            .clear()
            .map_err(|e| JsValue::from_str(&format!("Error clearing garden: {e}")))
    }

    pub fn save(&mut self) -> Result<(), JsValue> {
        self.editor
            .save()
            .map_err(|e| JsValue::from_str(&format!("Error saving garden: {e}")))
    }

    /// Reload the saved design. Returns the number of plants restored.
    pub fn load(&mut self) -> usize {
        self.editor.load()
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Returns true if a drag started.
    pub fn handle_pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.editor.pointer_down(x, y);
        self.editor.drag_state().is_dragging()
    }

    /// Returns true if a plant moved.
    pub fn handle_pointer_move(&mut self, x: f64, y: f64) -> bool {
        let dragging = self.editor.drag_state().is_dragging();
        self.editor.pointer_move(x, y);
        dragging
    }

    pub fn handle_pointer_up(&mut self, x: f64, y: f64) {
        self.editor.pointer_up(x, y);
    }

    /// Placement id of the plant being dragged, if any.
    pub fn drag_target(&self) -> Option<String> {
        self.editor
            .drag_state()
            .target()
            .map(|id| id.as_str().to_string())
    }

    // ─── Views ───────────────────────────────────────────────────────────

    /// The saved-layout blob for the current garden.
    pub fn layout_json(&self) -> String {
        self.editor.layout().to_json().unwrap_or_else(|e| {
            log::error!("layout serialization failed: {e}");
            "[]".to_string()
        })
    }

    /// Entries in paint order with their glyph and hit footprint, for the
    /// page to draw.
    pub fn render_json(&self) -> String {
        let target = self.editor.drag_state().target();
        let items: Vec<serde_json::Value> = self
            .editor
            .render_order()
            .into_iter()
            .map(|entry| {
                let rect = footprint(entry);
                serde_json::json!({
                    "id": entry.id.as_str(),
                    "name": entry.plant.display_name(),
                    "glyph": plant_glyph(&entry.plant.common_name),
                    "x": entry.position.x,
                    "y": entry.position.y,
                    "scale": entry.scale,
                    "bounds": [rect.x0, rect.y0, rect.width(), rect.height()],
                    "dragging": Some(entry.id) == target,
                })
            })
            .collect();
        serde_json::Value::Array(items).to_string()
    }

    /// False when designs only live for this page load.
    pub fn is_persistent(&self) -> bool {
        self.editor.store().is_persistent()
    }

    pub fn plant_count(&self) -> usize {
        self.editor.layout().len()
    }

    // ─── Export ──────────────────────────────────────────────────────────

    /// 2× PNG snapshot. `date_label` is printed under the title.
    pub fn export_png(&self, date_label: &str) -> Result<ExportedFile, JsValue> {
        self.export(ExportFormat::Png, date_label)
    }

    /// A4 landscape PDF with the snapshot and a plant count.
    pub fn export_pdf(&self, date_label: &str) -> Result<ExportedFile, JsValue> {
        self.export(ExportFormat::Pdf, date_label)
    }
}

impl GardenCanvas {
    fn export(&self, format: ExportFormat, date_label: &str) -> Result<ExportedFile, JsValue> {
        self.editor
            .export(format, date_label)
            .map(ExportedFile::from)
            .map_err(|e| {
                log::error!("export failed: {e}");
                JsValue::from_str(&format!("Error exporting garden: {e}"))
            })
    }
}

/// A finished export for the page to download.
#[wasm_bindgen]
pub struct ExportedFile {
    artifact: ExportArtifact,
}

#[wasm_bindgen]
impl ExportedFile {
    pub fn file_name(&self) -> String {
        self.artifact.file_name.clone()
    }

    pub fn mime_type(&self) -> String {
        self.artifact.mime_type.to_string()
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.artifact.bytes.clone()
    }
}

impl From<ExportArtifact> for ExportedFile {
    fn from(artifact: ExportArtifact) -> Self {
        Self { artifact }
    }
}

// ─── Standalone functions (no canvas needed) ─────────────────────────────

/// Gardening tip for the body of a `/api/weather` response. A missing or
/// unreadable body gives the "check your local weather" tip.
#[wasm_bindgen]
pub fn weather_tip(body: Option<String>) -> String {
    let report = body.and_then(|b| serde_json::from_str::<WeatherReport>(&b).ok());
    dg_core::weather_tip(report.as_ref()).to_string()
}

/// Headline such as `London - 18°C`, or empty when unavailable.
#[wasm_bindgen]
pub fn weather_headline(body: &str) -> String {
    serde_json::from_str::<WeatherReport>(body)
        .map(|report| report.headline())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dg_core::weather::{TIP_HUMID, TIP_NO_WEATHER};
    use pretty_assertions::assert_eq;

    const CATALOG: &str = r#"{
        "plants": [
            {"id": 7, "common_name": "Petunia", "scientific_name": null, "family": "Solanaceae"},
            {"id": 9, "common_name": "Mint", "scientific_name": "Mentha", "family": null}
        ],
        "meta": {"total": 2},
        "source": "trefle"
    }"#;

    #[test]
    fn live_catalog_is_used() {
        let mut canvas = GardenCanvas::new(800.0, 400.0);
        assert_eq!(canvas.ingest_catalog(CATALOG), 2);
        let listed: serde_json::Value = serde_json::from_str(&canvas.catalog_json("mint")).unwrap();
        assert_eq!(listed[0]["name"], "Mint");
    }

    #[test]
    fn broken_catalog_falls_back_to_demo_plants() {
        let mut canvas = GardenCanvas::new(800.0, 400.0);
        assert_eq!(canvas.ingest_catalog("<html>502</html>"), 3);
        assert_eq!(canvas.catalog_unavailable("offline"), 3);
    }

    #[test]
    fn place_drag_and_export() {
        let mut canvas = GardenCanvas::new(800.0, 400.0);
        canvas.ingest_catalog(CATALOG);

        let id = canvas.place(7, 200.0, 150.0).unwrap();
        assert_eq!(canvas.place(12345, 0.0, 0.0), None);
        assert_eq!(canvas.plant_count(), 1);

        assert!(canvas.handle_pointer_down(200.0, 150.0));
        assert_eq!(canvas.drag_target(), Some(id.clone()));
        assert!(canvas.handle_pointer_move(260.0, 170.0));
        canvas.handle_pointer_up(260.0, 170.0);
        assert_eq!(canvas.drag_target(), None);

        let rendered: serde_json::Value = serde_json::from_str(&canvas.render_json()).unwrap();
        assert_eq!(rendered[0]["id"], id.as_str());
        assert_eq!(rendered[0]["x"], 260.0);

        let grown = canvas.grow(&id).unwrap();
        assert!((grown - 1.2).abs() < 1e-9);

        let file = canvas.export_png("6/10/2024").unwrap();
        assert_eq!(file.mime_type(), "image/png");
        assert!(file.file_name().starts_with("dream-garden-"));
        assert!(!file.bytes().is_empty());

        assert!(canvas.remove(&id));
        assert_eq!(canvas.layout_json(), "[]");
    }

    #[test]
    fn tips_from_weather_bodies() {
        assert_eq!(weather_tip(None), TIP_NO_WEATHER);
        assert_eq!(weather_tip(Some("not json".into())), TIP_NO_WEATHER);
        let humid = r#"{"name":"Lagos","main":{"temp":15,"humidity":85}}"#;
        assert_eq!(weather_tip(Some(humid.into())), TIP_HUMID);
        assert_eq!(weather_headline(humid), "Lagos - 15°C");
    }
}
