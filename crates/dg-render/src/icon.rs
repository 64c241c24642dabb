//! Vector plant icons for the export snapshot.
//!
//! The page shows emoji, but rasterizers cannot count on a color emoji
//! font, so exports draw a small flower (or a sprout) from SVG shapes.

use dg_core::PlantRecord;
use std::f64::consts::TAU;
use std::fmt::Write;

const STEM: &str = "#16a34a";
const LEAF: &str = "#22c55e";
const HEART: &str = "#fbbf24";
const DARK_HEART: &str = "#92400e";
/// Outline for petals that would vanish on the white card.
const PALE_OUTLINE: &str = "#d1d5db";

const PETALS: usize = 5;
const PETAL_RADIUS: f64 = 5.5;
const PETAL_ORBIT: f64 = 6.0;

/// What the snapshot draws for one plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlantIcon {
    Bloom {
        petals: &'static str,
        heart: &'static str,
    },
    Sprout,
}

impl PlantIcon {
    /// Bloom colored by the record's flower color, else by a known name.
    /// Plants with neither get a sprout.
    pub fn for_plant(plant: &PlantRecord) -> Self {
        let petals = plant
            .flower_color
            .as_deref()
            .and_then(named_color)
            .or_else(|| color_for_name(&plant.common_name));
        match petals {
            Some(petals) => Self::Bloom {
                petals,
                heart: if petals == YELLOW { DARK_HEART } else { HEART },
            },
            None => Self::Sprout,
        }
    }

    /// Append the icon centred on (`cx`, `cy`), fitting a 32px box.
    pub fn write_svg(&self, out: &mut String, cx: f64, cy: f64) {
        let _ = writeln!(
            out,
            "  <path d=\"M{cx} {} L{cx} {}\" stroke=\"{STEM}\" stroke-width=\"3\" stroke-linecap=\"round\"/>",
            cy + 16.0,
            cy - 2.0
        );
        match *self {
            Self::Bloom { petals, heart } => {
                write_leaf(out, cx + 5.0, cy + 10.0, -30.0);
                let stroke = if petals == WHITE {
                    format!(" stroke=\"{PALE_OUTLINE}\" stroke-width=\"1\"")
                } else {
                    String::new()
                };
                let head_y = cy - 5.0;
                for i in 0..PETALS {
                    let angle = TAU * i as f64 / PETALS as f64 - TAU / 4.0;
                    let _ = writeln!(
                        out,
                        "  <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{PETAL_RADIUS}\" fill=\"{petals}\"{stroke}/>",
                        cx + PETAL_ORBIT * angle.cos(),
                        head_y + PETAL_ORBIT * angle.sin()
                    );
                }
                let _ = writeln!(
                    out,
                    "  <circle cx=\"{cx}\" cy=\"{head_y}\" r=\"4\" fill=\"{heart}\"/>"
                );
            }
            Self::Sprout => {
                write_leaf(out, cx - 6.0, cy - 2.0, 30.0);
                write_leaf(out, cx + 6.0, cy - 6.0, -30.0);
            }
        }
    }
}

fn write_leaf(out: &mut String, x: f64, y: f64, angle: f64) {
    let _ = writeln!(
        out,
        "  <ellipse cx=\"{x}\" cy=\"{y}\" rx=\"7\" ry=\"3.5\" transform=\"rotate({angle} {x} {y})\" fill=\"{LEAF}\"/>"
    );
}

const RED: &str = "#dc2626";
const YELLOW: &str = "#facc15";
const PURPLE: &str = "#9333ea";
const ORANGE: &str = "#f97316";
const PINK: &str = "#ec4899";
const WHITE: &str = "#ffffff";
const BLUE: &str = "#3b82f6";

/// Hex for a catalog flower color. "Various" and unknown words give None.
fn named_color(color: &str) -> Option<&'static str> {
    match color.trim().to_lowercase().as_str() {
        "red" => Some(RED),
        "yellow" => Some(YELLOW),
        "purple" | "violet" => Some(PURPLE),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "blue" => Some(BLUE),
        _ => None,
    }
}

fn color_for_name(name: &str) -> Option<&'static str> {
    const COLORS: &[(&str, &str)] = &[
        ("rose", RED),
        ("sunflower", YELLOW),
        ("lavender", PURPLE),
        ("tulip", RED),
        ("marigold", ORANGE),
        ("daisy", WHITE),
        ("petunia", PURPLE),
        ("geranium", RED),
        ("pansy", PURPLE),
        ("begonia", PINK),
        ("impatiens", PINK),
        ("zinnia", ORANGE),
        ("cosmos", PINK),
        ("snapdragon", RED),
        ("alyssum", WHITE),
    ];
    let name = name.to_lowercase();
    COLORS
        .iter()
        .find(|(key, _)| name.contains(key))
        .map(|(_, color)| *color)
}
