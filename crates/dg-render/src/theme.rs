//! Fixed palette of the exported snapshot.

/// Colors used when drawing the export snapshot.
pub struct ExportTheme {
    pub container_bg: &'static str,
    pub title: &'static str,
    pub date: &'static str,
    pub area_bg: &'static str,
    pub area_border: &'static str,
    pub card_bg: &'static str,
    pub card_border: &'static str,
    pub card_shadow: &'static str,
    pub label: &'static str,
    pub font_family: &'static str,
}

impl ExportTheme {
    /// The light green theme of the garden planner.
    pub const fn garden() -> Self {
        Self {
            container_bg: "#dcfce7",
            title: "#166534",
            date: "#374151",
            area_bg: "#f0fdf4",
            area_border: "#86efac",
            card_bg: "#ffffff",
            card_border: "#86efac",
            card_shadow: "#000000",
            label: "#1f2937",
            font_family: "'DejaVu Sans', sans-serif",
        }
    }
}

impl Default for ExportTheme {
    fn default() -> Self {
        Self::garden()
    }
}
