//! SVG writer for the export snapshot.
//!
//! The SVG is the single source both outputs are rasterized from, so what
//! the PNG shows and what the PDF embeds are always the same picture.

use crate::snapshot::{
    CARD_GAP, CARD_PADDING, DATE_SIZE, ExportScene, ICON_SIZE, LABEL_SIZE, SceneItem, TITLE_SIZE,
};
use crate::theme::ExportTheme;
use std::fmt::Write;

/// Escape text content and attribute values.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the snapshot as a standalone SVG document.
pub fn render_svg(scene: &ExportScene, theme: &ExportTheme) -> String {
    let w = scene.size.width;
    let h = scene.size.height;
    let mut svg = String::new();

    // `write!` into a String cannot fail.
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
    );
    let _ = writeln!(
        svg,
        "<style>\n  text {{ font-family: {}; }}\n</style>",
        theme.font_family
    );

    // Container
    let _ = writeln!(
        svg,
        "<rect x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" rx=\"8\" fill=\"{}\"/>",
        theme.container_bg
    );

    // Title + date
    let _ = writeln!(
        svg,
        "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"{TITLE_SIZE}\" font-weight=\"bold\" fill=\"{}\">{}</text>",
        w / 2.0,
        scene.title_baseline(),
        theme.title,
        escape_xml(&scene.title)
    );
    if !scene.date_label.is_empty() {
        let _ = writeln!(
            svg,
            "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"{DATE_SIZE}\" fill=\"{}\">{}</text>",
            w / 2.0,
            scene.date_baseline(),
            theme.date,
            escape_xml(&scene.date_label)
        );
    }

    // Garden area
    let area = scene.area;
    let _ = writeln!(
        svg,
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"8\" fill=\"{}\" stroke=\"{}\" stroke-width=\"2\" stroke-dasharray=\"6 4\"/>",
        area.x0,
        area.y0,
        area.width(),
        area.height(),
        theme.area_bg,
        theme.area_border
    );

    for item in &scene.items {
        render_item(&mut svg, item, theme);
    }

    svg.push_str("</svg>\n");
    svg
}

fn render_item(out: &mut String, item: &SceneItem, theme: &ExportTheme) {
    let card = item.card_size();
    let (cw, ch) = (card.width, card.height);
    let left = -cw / 2.0;
    let top = -ch / 2.0;

    let _ = writeln!(
        out,
        "<g transform=\"translate({}, {}) scale({})\">",
        item.center.x, item.center.y, item.scale
    );
    // Drop shadow, then the card itself
    let _ = writeln!(
        out,
        "  <rect x=\"{left}\" y=\"{}\" width=\"{cw}\" height=\"{ch}\" rx=\"8\" fill=\"{}\" fill-opacity=\"0.1\"/>",
        top + 4.0,
        theme.card_shadow
    );
    let _ = writeln!(
        out,
        "  <rect x=\"{left}\" y=\"{top}\" width=\"{cw}\" height=\"{ch}\" rx=\"8\" fill=\"{}\" stroke=\"{}\" stroke-width=\"2\"/>",
        theme.card_bg, theme.card_border
    );

    item.icon.write_svg(out, 0.0, top + CARD_PADDING + ICON_SIZE / 2.0);
    let label_baseline = top + CARD_PADDING + ICON_SIZE + CARD_GAP + LABEL_SIZE;
    let _ = writeln!(
        out,
        "  <text x=\"0\" y=\"{label_baseline}\" text-anchor=\"middle\" font-size=\"{LABEL_SIZE}\" font-weight=\"bold\" fill=\"{}\">{}</text>",
        theme.label,
        escape_xml(&item.label)
    );
    out.push_str("</g>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use dg_core::{CanvasSize, Layout, PlacedPlant, PlacementId, PlantRecord, Point};

    fn scene(names: &[&str]) -> ExportScene {
        let mut layout = Layout::new();
        for (i, name) in names.iter().enumerate() {
            layout.push(PlacedPlant::new(
                PlantRecord::new(i as i64, name, "", ""),
                PlacementId::intern(&format!("garden-svg-{i}")),
                Point::new(100.0 + 50.0 * i as f64, 100.0),
            ));
        }
        ExportScene::build(&layout, CanvasSize::default(), "3/14/2026").unwrap()
    }

    #[test]
    fn emits_title_date_and_one_group_per_plant() {
        let svg = render_svg(&scene(&["Rose", "Tulip"]), &ExportTheme::garden());
        assert!(svg.starts_with("<svg xmlns="));
        assert!(svg.contains(">My Dream Garden</text>"));
        assert!(svg.contains(">3/14/2026</text>"));
        assert_eq!(svg.matches("<g transform=").count(), 2);
        // Roses and tulips both bloom red; no emoji reach the rasterizer.
        assert_eq!(svg.matches("fill=\"#dc2626\"").count(), 10);
        assert!(!svg.contains("🌹"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn labels_are_escaped() {
        let svg = render_svg(&scene(&["Sweet <Alyssum> & co"]), &ExportTheme::garden());
        assert!(svg.contains("Sweet &lt;Alyssum&gt; &amp; co"));
        assert!(!svg.contains("<Alyssum>"));
    }

    #[test]
    fn empty_layout_still_has_frame() {
        let svg = render_svg(&scene(&[]), &ExportTheme::garden());
        assert_eq!(svg.matches("<g transform=").count(), 0);
        assert!(svg.contains("stroke-dasharray"));
    }
}
