//! Plant catalog: response envelope, fallback records, search, and glyphs.
//!
//! There are two fallback sets. The proxy route answers with the full
//! 15-record set when its upstream fails; the client falls back to the
//! 3-record demo set when it cannot reach the proxy at all.

use crate::error::FetchError;
use crate::model::{PlantRecord, null_as_default};
use serde::{Deserialize, Serialize};
use smallvec::smallvec;

/// Maximum number of entries shown by a catalog search.
pub const SEARCH_LIMIT: usize = 20;

/// Placeholder image used by every fallback record.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=100&width=100";

/// Where a catalog response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    /// Fetched from the upstream plant API.
    #[default]
    #[serde(alias = "trefle")]
    Live,
    /// Fixed fallback records.
    Fallback,
}

/// Paging metadata forwarded from the upstream API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// Envelope returned by the `/api/plants` route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub plants: Vec<PlantRecord>,
    #[serde(deserialize_with = "null_as_default")]
    pub meta: CatalogMeta,
    pub source: CatalogSource,
}

impl CatalogResponse {
    pub fn live(plants: Vec<PlantRecord>, meta: CatalogMeta) -> Self {
        Self {
            plants,
            meta,
            source: CatalogSource::Live,
        }
    }

    /// The proxy's answer when the upstream is unavailable.
    pub fn fallback() -> Self {
        let plants = fallback_plants();
        Self {
            meta: CatalogMeta {
                total: Some(plants.len() as u64),
            },
            plants,
            source: CatalogSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == CatalogSource::Fallback
    }
}

/// Resolve the plant list a client should show for a catalog fetch.
///
/// A failed fetch never surfaces: the demo set takes its place.
pub fn effective_catalog(result: Result<CatalogResponse, FetchError>) -> Vec<PlantRecord> {
    match result {
        Ok(response) => {
            if response.is_fallback() {
                log::info!("using demo plants - API unavailable");
            }
            response.plants
        }
        Err(err) => {
            log::warn!("catalog fetch failed, using demo plants: {err}");
            demo_plants()
        }
    }
}

/// Case-insensitive substring search over common and scientific names.
/// An empty term matches everything. At most `SEARCH_LIMIT` results.
pub fn search<'a>(plants: &'a [PlantRecord], term: &str) -> Vec<&'a PlantRecord> {
    let needle = term.to_lowercase();
    plants
        .iter()
        .filter(|p| {
            p.common_name.to_lowercase().contains(&needle)
                || p.scientific_name.to_lowercase().contains(&needle)
        })
        .take(SEARCH_LIMIT)
        .collect()
}

/// Icon for a plant name. First matching keyword wins; unknown names get
/// a seedling.
pub fn plant_glyph(name: &str) -> &'static str {
    const GLYPHS: &[(&str, &str)] = &[
        ("rose", "🌹"),
        ("sunflower", "🌻"),
        ("lavender", "💜"),
        ("tulip", "🌷"),
        ("marigold", "🟡"),
        ("daisy", "🌼"),
        ("petunia", "🌺"),
        ("geranium", "🌸"),
        ("pansy", "💐"),
        ("begonia", "🌺"),
        ("impatiens", "🌸"),
        ("zinnia", "🌻"),
        ("cosmos", "🌸"),
        ("snapdragon", "🌺"),
        ("alyssum", "🤍"),
    ];
    let name = name.to_lowercase();
    GLYPHS
        .iter()
        .find(|(key, _)| name.contains(key))
        .map(|(_, glyph)| *glyph)
        .unwrap_or("🌱")
}

// ─── Fallback data ───────────────────────────────────────────────────────

fn record(
    id: i64,
    common_name: &str,
    scientific_name: &str,
    family: &str,
    duration: &str,
    colors: Option<(&str, &str)>,
) -> PlantRecord {
    PlantRecord {
        id,
        common_name: common_name.to_string(),
        scientific_name: scientific_name.to_string(),
        image_url: PLACEHOLDER_IMAGE.to_string(),
        family: family.to_string(),
        duration: smallvec![duration.to_string()],
        flower_color: colors.map(|(flower, _)| flower.to_string()),
        foliage_color: colors.map(|(_, foliage)| foliage.to_string()),
    }
}

/// The proxy route's 15 fallback records.
#[rustfmt::skip]
pub fn fallback_plants() -> Vec<PlantRecord> {
    vec![
        record(1, "Rose", "Rosa rubiginosa", "Rosaceae", "Perennial", Some(("Red", "Green"))),
        record(
            2, "Sunflower", "Helianthus annuus", "Asteraceae", "Annual",
            Some(("Yellow", "Green")),
        ),
        record(
            3, "Lavender", "Lavandula angustifolia", "Lamiaceae", "Perennial",
            Some(("Purple", "Gray-Green")),
        ),
        record(
            4, "Tulip", "Tulipa gesneriana", "Liliaceae", "Perennial",
            Some(("Various", "Green")),
        ),
        record(5, "Marigold", "Tagetes patula", "Asteraceae", "Annual", Some(("Orange", "Green"))),
        record(6, "Daisy", "Bellis perennis", "Asteraceae", "Perennial", Some(("White", "Green"))),
        record(
            7, "Petunia", "Petunia × atkinsiana", "Solanaceae", "Annual",
            Some(("Purple", "Green")),
        ),
        record(
            8, "Geranium", "Pelargonium × hortorum", "Geraniaceae", "Perennial",
            Some(("Red", "Green")),
        ),
        record(
            9, "Pansy", "Viola × wittrockiana", "Violaceae", "Annual",
            Some(("Purple", "Green")),
        ),
        record(
            10, "Begonia", "Begonia × semperflorens-cultorum", "Begoniaceae", "Annual",
            Some(("Pink", "Green")),
        ),
        record(
            11, "Impatiens", "Impatiens walleriana", "Balsaminaceae", "Annual",
            Some(("Various", "Green")),
        ),
        record(12, "Zinnia", "Zinnia elegans", "Asteraceae", "Annual", Some(("Various", "Green"))),
        record(13, "Cosmos", "Cosmos bipinnatus", "Asteraceae", "Annual", Some(("Pink", "Green"))),
        record(
            14, "Snapdragon", "Antirrhinum majus", "Plantaginaceae", "Annual",
            Some(("Various", "Green")),
        ),
        record(
            15, "Sweet Alyssum", "Lobularia maritima", "Brassicaceae", "Annual",
            Some(("White", "Green")),
        ),
    ]
}

/// The client's 3 demo records, used when the proxy is unreachable.
pub fn demo_plants() -> Vec<PlantRecord> {
    vec![
        record(1, "Rose", "Rosa rubiginosa", "Rosaceae", "Perennial", None),
        record(2, "Sunflower", "Helianthus annuus", "Asteraceae", "Annual", None),
        record(3, "Lavender", "Lavandula angustifolia", "Lamiaceae", "Perennial", None),
    ]
}
