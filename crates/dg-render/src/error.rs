use std::path::PathBuf;
use thiserror::Error;

/// Any failure while turning a layout into an export artifact.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The live canvas has no area, so positions cannot be mapped.
    #[error("canvas has no area ({width}x{height})")]
    EmptyCanvas { width: f64, height: f64 },

    #[error("snapshot SVG is invalid: {0}")]
    Svg(String),

    #[error("cannot allocate a {width}x{height} raster")]
    Raster { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Png(String),

    #[error("document rendering failed: {0}")]
    Document(String),

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
