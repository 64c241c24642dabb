pub mod catalog;
pub mod error;
pub mod id;
pub mod model;
pub mod store;
pub mod weather;

pub use catalog::{CatalogResponse, CatalogSource, effective_catalog, plant_glyph};
pub use error::{FetchError, StoreError};
pub use id::{Clock, FixedClock, PlacementId, SystemClock};
pub use model::*;
pub use store::{
    FileStore, KeyValueStore, LAYOUT_KEY, MemoryStore, erase_layout, load_layout, replace_file,
    save_layout,
};
pub use weather::{WeatherReport, weather_tip};

// Re-export kurbo geometry so downstream crates don't need a direct dependency
pub use kurbo::{Point, Rect, Vec2};
