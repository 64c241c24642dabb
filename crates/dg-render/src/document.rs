//! Paginated export: the snapshot raster on an A4 landscape page with a
//! plant-count caption and a footer tag.

use crate::error::ExportError;
use crate::raster::RasterImage;
use printpdf::{
    BuiltinFont, Color, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm,
    PdfDocument, Px, Rgb,
};

pub const PAGE_WIDTH_MM: f32 = 297.0;
pub const PAGE_HEIGHT_MM: f32 = 210.0;
pub const IMAGE_WIDTH_MM: f32 = 250.0;
pub const IMAGE_HEIGHT_MM: f32 = 180.0;
/// Distance from the top edge to the image.
pub const IMAGE_TOP_MM: f32 = 10.0;
/// Left margin of caption and footer.
pub const TEXT_LEFT_MM: f32 = 20.0;
/// Caption and footer positions, measured from the top edge.
pub const CAPTION_TOP_MM: f32 = 198.0;
pub const FOOTER_TOP_MM: f32 = 203.0;
pub const TEXT_SIZE_PT: f32 = 10.0;
pub const FOOTER_TAG: &str = "Created with DreamGarden";

const DOCUMENT_TITLE: &str = "My Dream Garden";
const MM_PER_INCH: f32 = 25.4;

/// Caption line under the image.
pub fn caption(plant_count: usize) -> String {
    format!("Number of plants: {plant_count}")
}

/// Build the document for `raster` and return the encoded bytes.
pub fn render_document(raster: &RasterImage, plant_count: usize) -> Result<Vec<u8>, ExportError> {
    let (doc, page, layer) = PdfDocument::new(
        DOCUMENT_TITLE,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    // The info dictionary is never compressed, so the count stays readable.
    let doc = doc.with_subject(caption(plant_count));
    let layer = doc.get_page(page).get_layer(layer);

    // PDF space starts bottom-left; everything above is measured from the top.
    let from_top = |mm: f32| Mm(PAGE_HEIGHT_MM - mm);

    // Pick the DPI that makes the raster exactly IMAGE_WIDTH_MM wide, then
    // stretch vertically to IMAGE_HEIGHT_MM.
    let dpi = raster.width() as f32 * MM_PER_INCH / IMAGE_WIDTH_MM;
    let natural_height_mm = raster.height() as f32 * MM_PER_INCH / dpi;

    let image = Image::from(ImageXObject {
        width: Px(raster.width() as usize),
        height: Px(raster.height() as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: raster.rgb_bytes(),
        image_filter: None,
        smask: None,
        clipping_bbox: None,
    });
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm((PAGE_WIDTH_MM - IMAGE_WIDTH_MM) / 2.0)),
            translate_y: Some(from_top(IMAGE_TOP_MM + IMAGE_HEIGHT_MM)),
            scale_y: Some(IMAGE_HEIGHT_MM / natural_height_mm),
            dpi: Some(dpi),
            ..Default::default()
        },
    );

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Document(e.to_string()))?;
    layer.set_fill_color(Color::Rgb(Rgb::new(
        107.0 / 255.0,
        114.0 / 255.0,
        128.0 / 255.0,
        None,
    )));
    layer.use_text(
        caption(plant_count),
        TEXT_SIZE_PT,
        Mm(TEXT_LEFT_MM),
        from_top(CAPTION_TOP_MM),
        &font,
    );
    layer.use_text(
        FOOTER_TAG,
        TEXT_SIZE_PT,
        Mm(TEXT_LEFT_MM),
        from_top(FOOTER_TOP_MM),
        &font,
    );

    doc.save_to_bytes()
        .map_err(|e| ExportError::Document(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::rasterize;

    #[test]
    fn caption_text() {
        assert_eq!(caption(0), "Number of plants: 0");
        assert_eq!(caption(12), "Number of plants: 12");
    }

    #[test]
    fn text_stays_on_the_page() {
        assert!(IMAGE_TOP_MM + IMAGE_HEIGHT_MM < CAPTION_TOP_MM);
        assert!(FOOTER_TOP_MM < PAGE_HEIGHT_MM);
    }

    #[test]
    fn document_is_a_pdf() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="30">
            <rect width="40" height="30" fill="#f0fdf4"/></svg>"##;
        let raster = rasterize(svg, 2.0).unwrap();
        let bytes = render_document(&raster, 3).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
