use thiserror::Error;

/// Errors that can occur while exporting the canvas to a PNG file
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot create a {width}x{height} drawing surface")]
    SurfaceUnavailable { width: u32, height: u32 },

    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to write file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;
