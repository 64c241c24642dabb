//! Export entry point: layout → named artifact bytes.
//!
//! Rendering happens fully in memory. Writing goes through a temporary
//! sibling that is renamed into place, so a failed export never leaves a
//! partial file behind.

use crate::document::render_document;
use crate::error::ExportError;
use crate::raster::{EXPORT_DENSITY, rasterize};
use crate::snapshot::ExportScene;
use crate::svg::render_svg;
use crate::theme::ExportTheme;
use dg_core::{CanvasSize, Layout, replace_file};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Prefix of every exported file name.
pub const FILE_STEM: &str = "dream-garden";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// 2× raster image.
    Png,
    /// A4 landscape page embedding the raster.
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Pdf => "pdf",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Pdf => "application/pdf",
        }
    }

    /// `dream-garden-<epoch-ms>.<ext>`
    pub fn file_name(self, timestamp_ms: u64) -> String {
        format!("{FILE_STEM}-{timestamp_ms}.{}", self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" | "image" => Ok(Self::Png),
            "pdf" | "document" => Ok(Self::Pdf),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

/// A finished export, ready to download or write.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Render `layout` as seen on a canvas of `canvas` into `format`.
///
/// `date_label` is printed under the title; `timestamp_ms` names the file.
pub fn export_layout(
    layout: &Layout,
    canvas: CanvasSize,
    format: ExportFormat,
    date_label: &str,
    timestamp_ms: u64,
) -> Result<ExportArtifact, ExportError> {
    let scene = ExportScene::build(layout, canvas, date_label)?;
    let svg = render_svg(&scene, &ExportTheme::garden());
    let raster = rasterize(&svg, EXPORT_DENSITY)?;

    let bytes = match format {
        ExportFormat::Png => raster.encode_png()?,
        ExportFormat::Pdf => render_document(&raster, layout.len())?,
    };
    log::info!(
        "exported {} plants as {} ({} bytes)",
        layout.len(),
        format,
        bytes.len()
    );

    Ok(ExportArtifact {
        file_name: format.file_name(timestamp_ms),
        mime_type: format.mime_type(),
        bytes,
    })
}

/// Write `artifact` into `dir`, returning the final path.
pub fn write_artifact(dir: &Path, artifact: &ExportArtifact) -> Result<PathBuf, ExportError> {
    let path = dir.join(&artifact.file_name);
    let tmp = dir.join(format!(".{}.part", artifact.file_name));
    match replace_file(&path, &tmp, |file| file.write_all(&artifact.bytes)) {
        Ok(()) => Ok(path),
        Err(source) => Err(ExportError::Write { path, source }),
    }
}
