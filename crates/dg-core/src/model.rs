//! Core data model for garden layouts.
//!
//! A `Layout` is an ordered list of `PlacedPlant`s. Each placed plant is a
//! copy of a catalog `PlantRecord` plus a placement ID, a canvas position
//! and a scale factor. Insertion order is the paint order; there is no
//! z-index beyond "last interacted is on top" while dragging.

use crate::id::PlacementId;
use kurbo::Point;
use serde::{Deserialize, Deserializer, Serialize};
use smallvec::SmallVec;

// ─── Scale bounds ────────────────────────────────────────────────────────

/// Smallest allowed scale factor.
pub const MIN_SCALE: f64 = 0.5;
/// Largest allowed scale factor.
pub const MAX_SCALE: f64 = 3.0;
/// Scale of a freshly dropped plant.
pub const DEFAULT_SCALE: f64 = 1.0;
/// Step used by the grow / shrink controls.
pub const RESIZE_STEP: f64 = 0.2;

/// Clamp a scale factor into `[MIN_SCALE, MAX_SCALE]`.
/// NaN collapses to the default scale.
pub fn clamp_scale(scale: f64) -> f64 {
    if scale.is_nan() {
        return DEFAULT_SCALE;
    }
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// Decode `null` (or an absent field, with `#[serde(default)]`) as the
/// type's default. Upstream catalog data is sparse.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn clamped_scale<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let raw = Option::<f64>::deserialize(deserializer)?.unwrap_or(DEFAULT_SCALE);
    Ok(clamp_scale(raw))
}

fn default_scale() -> f64 {
    DEFAULT_SCALE
}

// ─── Plant records ───────────────────────────────────────────────────────

/// A plant species as supplied by the catalog. Immutable once received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub common_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub scientific_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub family: String,
    /// Life-cycle tags such as `Annual` or `Perennial`.
    #[serde(deserialize_with = "null_as_default")]
    pub duration: SmallVec<[String; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flower_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foliage_color: Option<String>,
}

impl PlantRecord {
    pub fn new(id: i64, common_name: &str, scientific_name: &str, family: &str) -> Self {
        Self {
            id,
            common_name: common_name.to_string(),
            scientific_name: scientific_name.to_string(),
            family: family.to_string(),
            ..Default::default()
        }
    }

    /// Display name, with the catalog's placeholder for unnamed species.
    pub fn display_name(&self) -> &str {
        if self.common_name.is_empty() {
            "Unknown Plant"
        } else {
            &self.common_name
        }
    }
}

// ─── Placed plants ───────────────────────────────────────────────────────

/// A catalog plant dropped onto the canvas.
///
/// Wire shape matches the stored layout blob: the plant fields flattened,
/// plus `position`, `gardenId` and `size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedPlant {
    #[serde(flatten)]
    pub plant: PlantRecord,
    #[serde(rename = "gardenId")]
    pub id: PlacementId,
    /// Centre of the plant in canvas pixels. Not clamped to canvas bounds.
    pub position: Point,
    /// Scale factor, always within `[MIN_SCALE, MAX_SCALE]`.
    #[serde(
        rename = "size",
        default = "default_scale",
        deserialize_with = "clamped_scale"
    )]
    pub scale: f64,
}

impl PlacedPlant {
    pub fn new(plant: PlantRecord, id: PlacementId, position: Point) -> Self {
        Self {
            plant,
            id,
            position,
            scale: DEFAULT_SCALE,
        }
    }

    /// Add `delta` to the scale, clamping to the allowed range.
    /// Returns the new scale.
    pub fn rescale(&mut self, delta: f64) -> f64 {
        self.scale = clamp_scale(self.scale + delta);
        self.scale
    }
}

// ─── Canvas ──────────────────────────────────────────────────────────────

/// Extent of the live design canvas in pixels.
///
/// Export maps positions proportionally from this extent into the
/// snapshot's garden area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(800.0, 400.0)
    }
}

// ─── Layout ──────────────────────────────────────────────────────────────

/// The ordered set of plant placements on the canvas.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Layout {
    entries: Vec<PlacedPlant>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a layout from entries, dropping any whose ID repeats an
    /// earlier one.
    pub fn from_entries(entries: Vec<PlacedPlant>) -> Self {
        let mut layout = Self::new();
        for entry in entries {
            if layout.contains(entry.id) {
                log::warn!("dropping duplicate placement {}", entry.id);
                continue;
            }
            layout.entries.push(entry);
        }
        layout
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlacedPlant> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[PlacedPlant] {
        &self.entries
    }

    pub fn contains(&self, id: PlacementId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn get(&self, id: PlacementId) -> Option<&PlacedPlant> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: PlacementId) -> Option<&mut PlacedPlant> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    /// Append an entry. Returns `false` (and leaves the layout untouched)
    /// if its ID is already present.
    pub fn push(&mut self, entry: PlacedPlant) -> bool {
        if self.contains(entry.id) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Remove an entry by ID, returning it if it was present.
    pub fn remove(&mut self, id: PlacementId) -> Option<PlacedPlant> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(idx))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Serialize the whole layout as the stored JSON blob.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Parse a stored blob. Anything that is not an array of placed
    /// plants is an error; duplicate IDs are dropped.
    pub fn from_json(blob: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(blob)
    }
}

impl<'de> Deserialize<'de> for Layout {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<PlacedPlant>::deserialize(deserializer).map(Self::from_entries)
    }
}

impl<'a> IntoIterator for &'a Layout {
    type Item = &'a PlacedPlant;
    type IntoIter = std::slice::Iter<'a, PlacedPlant>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
