//! Rendering for DreamGarden layouts: pointer hit testing and the export
//! pipeline (snapshot scene → SVG → 2× raster → PNG or PDF).

pub mod document;
pub mod error;
pub mod export;
pub mod hit;
pub mod icon;
pub mod raster;
pub mod snapshot;
pub mod svg;
pub mod theme;

pub use error::ExportError;
pub use export::{ExportArtifact, ExportFormat, export_layout, write_artifact};
pub use hit::{PLANT_FOOTPRINT, footprint, hit_test};
pub use icon::PlantIcon;
pub use snapshot::ExportScene;
