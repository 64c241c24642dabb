//! Integration tests: full export pipeline (layout → PNG / PDF files).

use dg_core::catalog::fallback_plants;
use dg_core::{CanvasSize, Layout, PlacedPlant, PlacementId, PlantRecord, Point};
use dg_render::raster::{RasterImage, rasterize};
use dg_render::svg::render_svg;
use dg_render::theme::ExportTheme;
use dg_render::{ExportError, ExportFormat, ExportScene, export_layout, write_artifact};
use std::ops::Range;
use std::path::PathBuf;

const TIMESTAMP: u64 = 1_718_000_000_000;

fn garden(n: usize) -> Layout {
    let mut layout = Layout::new();
    for (i, plant) in fallback_plants().into_iter().cycle().take(n).enumerate() {
        let mut entry = PlacedPlant::new(
            plant,
            PlacementId::generate(TIMESTAMP),
            Point::new(60.0 + 90.0 * (i % 8) as f64, 60.0 + 120.0 * (i / 8) as f64),
        );
        entry.rescale(0.2 * (i % 4) as f64);
        layout.push(entry);
    }
    layout
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dg-render-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Width and height from a PNG's IHDR chunk.
fn png_dimensions(png: &[u8]) -> (u32, u32) {
    let w = u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
    let h = u32::from_be_bytes([png[20], png[21], png[22], png[23]]);
    (w, h)
}

/// Pixels in the given box matching `pred`.
fn count_pixels(
    raster: &RasterImage,
    xs: Range<u32>,
    ys: Range<u32>,
    pred: impl Fn([u8; 4]) -> bool,
) -> usize {
    xs.flat_map(|x| ys.clone().map(move |y| (x, y)))
        .filter_map(|(x, y)| raster.pixel(x, y))
        .filter(|&px| pred(px))
        .count()
}

fn near(px: [u8; 4], rgb: [u8; 3], tolerance: u8) -> bool {
    px[..3]
        .iter()
        .zip(rgb)
        .all(|(&a, b)| a.abs_diff(b) <= tolerance)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

// ─── Raster ─────────────────────────────────────────────────────────────

#[test]
fn snapshot_shows_title_icon_and_label() {
    let mut layout = Layout::new();
    layout.push(PlacedPlant::new(
        PlantRecord::new(1, "Rose", "Rosa rubiginosa", "Rosaceae"),
        PlacementId::intern("garden-pixels-1"),
        Point::new(400.0, 200.0),
    ));
    let scene = ExportScene::build(&layout, CanvasSize::new(800.0, 400.0), "6/10/2024").unwrap();
    let raster = rasterize(&render_svg(&scene, &ExportTheme::garden()), 1.0).unwrap();
    assert_eq!((raster.width(), raster.height()), (800, 600));

    // Title: baseline 48, 28px bold, centred.
    let title = count_pixels(&raster, 200..600, 22..52, |px| {
        near(px, [0x16, 0x65, 0x34], 40)
    });
    assert!(title > 200, "title band has {title} title-colored pixels");

    // The rose card is centred at (400, 340); its icon fills x 384..416,
    // y 314..347 and the label sits on baseline 362.5.
    let petals = count_pixels(&raster, 384..416, 314..347, |px| {
        near(px, [0xdc, 0x26, 0x26], 40)
    });
    assert!(petals > 50, "icon box has {petals} petal pixels");
    let label = count_pixels(&raster, 376..424, 350..365, |[r, g, b, _]| {
        r < 120 && g < 120 && b < 120
    });
    assert!(label > 15, "label band has {label} dark pixels");

    // Nothing drawn outside the card in the empty part of the area.
    let stray = count_pixels(&raster, 100..200, 200..300, |px| {
        !near(px, [0xf0, 0xfd, 0xf4], 2)
    });
    assert_eq!(stray, 0);
}

#[test]
fn png_is_rendered_at_double_density() {
    let artifact = export_layout(
        &garden(5),
        CanvasSize::new(800.0, 400.0),
        ExportFormat::Png,
        "6/10/2024",
        TIMESTAMP,
    )
    .unwrap();

    assert_eq!(artifact.file_name, "dream-garden-1718000000000.png");
    assert_eq!(artifact.mime_type, "image/png");
    assert_eq!(png_dimensions(&artifact.bytes), (1600, 1200));
}

#[test]
fn pdf_caption_counts_plants() {
    for n in [0, 3] {
        let artifact = export_layout(
            &garden(n),
            CanvasSize::new(800.0, 400.0),
            ExportFormat::Pdf,
            "6/10/2024",
            TIMESTAMP,
        )
        .unwrap();
        let caption = format!("Number of plants: {n}");
        assert!(contains(&artifact.bytes, caption.as_bytes()), "missing {caption:?}");
    }
}

#[test]
fn empty_layout_still_exports() {
    let artifact = export_layout(
        &Layout::new(),
        CanvasSize::default(),
        ExportFormat::Png,
        "",
        TIMESTAMP,
    )
    .unwrap();
    assert_eq!(png_dimensions(&artifact.bytes), (1600, 1200));
}

// ─── Document ───────────────────────────────────────────────────────────

#[test]
fn pdf_export_writes_a_document() {
    let dir = scratch_dir("pdf");
    let artifact = export_layout(
        &garden(12),
        CanvasSize::new(1024.0, 480.0),
        ExportFormat::Pdf,
        "6/10/2024",
        TIMESTAMP,
    )
    .unwrap();
    assert_eq!(artifact.mime_type, "application/pdf");

    let path = write_artifact(&dir, &artifact).unwrap();
    assert_eq!(path.file_name().unwrap(), "dream-garden-1718000000000.pdf");
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert!(contains(&bytes, b"Number of plants: 12"));

    // Only the final file remains; no temporary sibling.
    let names: Vec<_> = std::fs::read_dir(&dir)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names.len(), 1);
    let _ = std::fs::remove_dir_all(&dir);
}

// ─── Failure ────────────────────────────────────────────────────────────

#[test]
fn zero_sized_canvas_fails_without_output() {
    let dir = scratch_dir("fail");
    let result = export_layout(
        &garden(2),
        CanvasSize::new(0.0, 0.0),
        ExportFormat::Pdf,
        "",
        TIMESTAMP,
    );
    assert!(matches!(result, Err(ExportError::EmptyCanvas { .. })));
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn writing_into_missing_directory_fails_cleanly() {
    let artifact = export_layout(
        &garden(1),
        CanvasSize::default(),
        ExportFormat::Png,
        "",
        TIMESTAMP,
    )
    .unwrap();
    let missing =
        std::env::temp_dir().join(format!("dg-render-missing-{}/nope", std::process::id()));
    let err = write_artifact(&missing, &artifact).unwrap_err();
    assert!(matches!(err, ExportError::Write { .. }));
    assert!(!missing.join(&artifact.file_name).exists());
    assert!(!missing.join(format!(".{}.part", artifact.file_name)).exists());
}
