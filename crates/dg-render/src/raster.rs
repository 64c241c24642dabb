//! SVG → raster via resvg.
//!
//! Text is set in DejaVu Sans, compiled into the binary, so exports look
//! the same on hosts without system fonts and in WASM.

use crate::error::ExportError;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg;
use std::sync::{Arc, LazyLock};

/// Pixel density of exported rasters (device pixels per CSS pixel).
pub const EXPORT_DENSITY: f32 = 2.0;

/// Family name of the bundled export font.
pub const EXPORT_FONT_FAMILY: &str = "DejaVu Sans";

const SANS_REGULAR: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");
const SANS_BOLD: &[u8] = include_bytes!("../assets/fonts/DejaVuSans-Bold.ttf");

static FONTS: LazyLock<Arc<usvg::fontdb::Database>> = LazyLock::new(|| {
    let mut db = usvg::fontdb::Database::new();
    db.load_font_data(SANS_REGULAR.to_vec());
    db.load_font_data(SANS_BOLD.to_vec());
    db.set_sans_serif_family(EXPORT_FONT_FAMILY);
    log::debug!("loaded {} font faces for export", db.len());
    Arc::new(db)
});

/// A rendered, opaque RGBA raster.
pub struct RasterImage {
    pixmap: Pixmap,
}

impl RasterImage {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Encode as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, ExportError> {
        self.pixmap
            .encode_png()
            .map_err(|e| ExportError::Png(e.to_string()))
    }

    /// Packed 8-bit RGB samples, row-major, alpha dropped.
    pub fn rgb_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixmap.pixels().len() * 3);
        for px in self.pixmap.pixels() {
            let c = px.demultiply();
            out.extend_from_slice(&[c.red(), c.green(), c.blue()]);
        }
        out
    }

    /// RGBA of the pixel at (x, y), if inside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }
}

/// Parse `svg` and render it at `density`× its intrinsic size.
pub fn rasterize(svg: &str, density: f32) -> Result<RasterImage, ExportError> {
    let mut options = usvg::Options::default();
    options.fontdb = FONTS.clone();

    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| ExportError::Svg(e.to_string()))?;
    let size = tree.size();
    let width = (size.width() * density).round() as u32;
    let height = (size.height() * density).round() as u32;

    let mut pixmap = Pixmap::new(width, height).ok_or(ExportError::Raster { width, height })?;
    resvg::render(
        &tree,
        Transform::from_scale(density, density),
        &mut pixmap.as_mut(),
    );
    log::debug!("rasterized snapshot at {width}x{height}");
    Ok(RasterImage { pixmap })
}
